//! 正文提取服务 - 业务能力层
//!
//! 从文章 HTML 中取出标题和正文。选择器按顺序尝试，第一个有内容的命中即采用；
//! 都没有命中时退回到"收集全文中较长段落"的路径。

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::ExtractError;
use crate::models::{Article, BodySource, UNTITLED};

/// 标题候选选择器（按优先级）
const TITLE_SELECTORS: &[&str] = &[
    "h1.headline",
    "h1.title",
    "h1.article_title",
    "h2.title",
    "h1",
    "title",
];

/// 正文容器候选选择器（按优先级）
const BODY_SELECTORS: &[&str] = &[
    "div#article_body",
    "div.article_body",
    "div.article-body",
    "div.article_text",
    "div.content_body",
    "article",
    "div.content",
];

/// 退回路径中段落的最小长度（字符数，不含）
pub const FALLBACK_MIN_PARAGRAPH_CHARS: usize = 50;

const WHITESPACE_PATTERN: &str = r"\s+";

/// 正文的最小长度（字符数）
pub const MIN_BODY_CHARS: usize = 100;

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub body_text: String,
    pub source: BodySource,
}

impl Extracted {
    pub fn into_article(self, url: impl Into<String>) -> Article {
        Article {
            url: url.into(),
            title: self.title,
            body_text: self.body_text,
        }
    }
}

/// 正文提取器
///
/// 选择器在构造时解析一次，之后可重复使用。
pub struct ArticleExtractor {
    title_selectors: Vec<Selector>,
    body_selectors: Vec<(&'static str, Selector)>,
    paragraph: Selector,
    /// 连续空白（换行、制表符、不换行空格）
    whitespace: Regex,
}

impl ArticleExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            title_selectors: TITLE_SELECTORS
                .iter()
                .map(|css| parse_selector(css))
                .collect::<Result<_, _>>()?,
            body_selectors: BODY_SELECTORS
                .iter()
                .map(|css| parse_selector(css).map(|s| (*css, s)))
                .collect::<Result<_, _>>()?,
            paragraph: parse_selector("p")?,
            whitespace: Regex::new(WHITESPACE_PATTERN).map_err(|source| {
                ExtractError::InvalidPattern {
                    pattern: WHITESPACE_PATTERN.to_string(),
                    source,
                }
            })?,
        })
    }

    /// 提取标题和正文
    ///
    /// 正文不足 [`MIN_BODY_CHARS`] 个字符时返回 `BodyNotFound`（附带标题）。
    pub fn extract(&self, html: &str) -> Result<Extracted, ExtractError> {
        let document = Html::parse_document(html);

        let title = self.extract_title(&document);
        let (body_text, source) = self.extract_body(&document);

        debug!(
            "标题: {} | 正文 {} 字 | 来源: {:?}",
            title,
            body_text.chars().count(),
            source
        );

        if body_text.chars().count() < MIN_BODY_CHARS {
            return Err(ExtractError::BodyNotFound { title });
        }

        Ok(Extracted {
            title,
            body_text,
            source,
        })
    }

    fn extract_title(&self, document: &Html) -> String {
        self.title_selectors
            .iter()
            .find_map(|sel| document.select(sel).next())
            .map(|el| self.element_text(&el))
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn extract_body(&self, document: &Html) -> (String, BodySource) {
        for (css, sel) in &self.body_selectors {
            if let Some(container) = document.select(sel).next() {
                let text = self.join_paragraphs(container.select(&self.paragraph), 0);
                if !text.is_empty() {
                    return (text, BodySource::Container(css.to_string()));
                }
                debug!("容器 {} 中没有段落文本，继续尝试下一个", css);
            }
        }

        let text = self.join_paragraphs(
            document.select(&self.paragraph),
            FALLBACK_MIN_PARAGRAPH_CHARS,
        );
        (text, BodySource::Fallback)
    }

    /// 连接段落文本，只保留长度大于 `min_chars` 的非空段落
    fn join_paragraphs<'a>(
        &self,
        paragraphs: impl Iterator<Item = ElementRef<'a>>,
        min_chars: usize,
    ) -> String {
        paragraphs
            .map(|p| self.element_text(&p))
            .filter(|t| !t.is_empty() && t.chars().count() > min_chars)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 元素内全部文本，连续空白合并为一个空格并去掉首尾空白
    fn element_text(&self, el: &ElementRef<'_>) -> String {
        let text = el.text().collect::<String>();
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }
}

fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::InvalidSelector {
        selector: css.to_string(),
    })
}
