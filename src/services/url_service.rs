//! URL 服务 - 业务能力层
//!
//! 只负责"把用户输入变成可抓取的文章地址"：
//! - 补全协议、校验格式
//! - 识别门户首页，并从首页中找出最新一篇文章

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::clients::ArticleClient;
use crate::error::{AppResult, UrlError};
use crate::utils::memo::Memo;

/// 首页识别后附带给用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlNotice {
    /// 已从首页转换为最新文章
    Converted,
    /// 是首页，但没有找到文章链接
    Unresolved,
}

impl UrlNotice {
    pub fn message(&self) -> &'static str {
        match self {
            UrlNotice::Converted => "메인 페이지에서 최신 기사로 자동 변환됨",
            UrlNotice::Unresolved => {
                "최신 기사를 찾을 수 없었습니다. 기사 URL을 직접 입력해주세요."
            }
        }
    }
}

/// 规范化后的地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub url: String,
    pub notice: Option<UrlNotice>,
}

/// 站点首页的文章链接规则
struct SiteRule {
    /// 首页 URL（小写）中包含的关键字
    keyword: &'static str,
    /// 相对链接的拼接前缀；None 表示只接受绝对链接
    relative_base: Option<&'static str>,
}

const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        keyword: "joongang",
        relative_base: Some("https://www.joongang.co.kr"),
    },
    SiteRule {
        keyword: "chosun",
        relative_base: None,
    },
    SiteRule {
        keyword: "donga",
        relative_base: Some("https://www.donga.com"),
    },
];

/// 门户首页的后缀
const HOMEPAGE_SUFFIXES: &[&str] = &["/", "joongang.co.kr", "chosun.com", "donga.com"];

/// 判断是否为首页（只做字符串判断）
pub fn is_homepage(url: &str) -> bool {
    HOMEPAGE_SUFFIXES.iter().any(|s| url.ends_with(s))
        || (url.contains("www.joongang.co.kr") && !url.contains("/article/"))
}

/// 缺少协议时补上 `https://`，并校验格式
pub fn ensure_scheme(url: &str) -> Result<String, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    Url::parse(&candidate)
        .map(|u| u.to_string())
        .map_err(|source| UrlError::Invalid {
            url: url.to_string(),
            source,
        })
}

/// 从首页 HTML 中找出最新一篇文章的地址
///
/// 站点由 `homepage_url` 中的关键字决定；不认识的站点返回 None。
pub fn find_latest_article(homepage_url: &str, html: &str) -> Option<String> {
    let lowered = homepage_url.to_lowercase();
    let rule = SITE_RULES.iter().find(|r| lowered.contains(r.keyword))?;

    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").ok()?;

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains("/article/"))
        .find_map(|href| {
            if href.starts_with("http") {
                Some(href.to_string())
            } else if href.starts_with('/') {
                rule.relative_base.map(|base| format!("{}{}", base, href))
            } else {
                None
            }
        })
}

/// URL 服务
pub struct UrlService {
    client: ArticleClient,
    /// 首页 → 最新文章地址
    latest_cache: Memo<String, String>,
}

impl UrlService {
    pub fn new(client: ArticleClient) -> Self {
        Self {
            client,
            latest_cache: Memo::new(),
        }
    }

    /// 规范化用户输入的地址；首页会尝试转换为最新文章
    pub async fn normalize(&self, raw: &str) -> AppResult<NormalizedUrl> {
        let trimmed = raw.trim();
        let homepage = is_homepage(trimmed);
        let url = ensure_scheme(trimmed)?;

        if !homepage {
            return Ok(NormalizedUrl { url, notice: None });
        }

        info!("🏠 检测到首页地址，查找最新文章: {}", url);
        match self.latest_article(&url).await {
            Some(article_url) => {
                info!("✓ 已转换为最新文章: {}", article_url);
                Ok(NormalizedUrl {
                    url: article_url,
                    notice: Some(UrlNotice::Converted),
                })
            }
            None => {
                warn!("⚠️ 首页中没有找到文章链接: {}", url);
                Ok(NormalizedUrl {
                    url,
                    notice: Some(UrlNotice::Unresolved),
                })
            }
        }
    }

    /// 抓取首页并查找文章链接；任何失败都返回 None
    async fn latest_article(&self, homepage_url: &str) -> Option<String> {
        if let Some(hit) = self.latest_cache.get(&homepage_url.to_string()).await {
            debug!("首页缓存命中: {}", homepage_url);
            return Some(hit);
        }

        let html = match self.client.fetch_html(homepage_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("首页抓取失败: {}", e);
                return None;
            }
        };

        let found = find_latest_article(homepage_url, &html)?;
        self.latest_cache
            .insert(homepage_url.to_string(), found.clone())
            .await;
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 在本地端口上应答一次首页，地址路径含站点关键字
    async fn serve_homepage(html: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                html.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(html.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/joongang/", addr)
    }

    fn service() -> UrlService {
        UrlService::new(ArticleClient::with_settings("test-agent", Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_normalize_converts_homepage_to_latest_article() {
        let homepage = serve_homepage(r#"<a href="/sports">스포츠</a><a href="/article/1">기사</a>"#).await;
        let service = service();

        let normalized = service.normalize(&homepage).await.unwrap();
        assert_eq!(normalized.url, "https://www.joongang.co.kr/article/1");
        assert_eq!(normalized.notice, Some(UrlNotice::Converted));

        // 服务只应答一次，第二次来自缓存
        let again = service.normalize(&homepage).await.unwrap();
        assert_eq!(again, normalized);
    }

    #[tokio::test]
    async fn test_normalize_keeps_homepage_without_article_links() {
        let homepage = serve_homepage(r#"<a href="/sports">스포츠</a>"#).await;
        let normalized = service().normalize(&homepage).await.unwrap();
        assert_eq!(normalized.url, homepage);
        assert_eq!(normalized.notice, Some(UrlNotice::Unresolved));
    }

    #[tokio::test]
    async fn test_normalize_unreachable_homepage_is_unresolved() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let homepage = format!("http://{}/joongang/", addr);
        let normalized = service().normalize(&homepage).await.unwrap();
        assert_eq!(normalized.url, homepage);
        assert_eq!(normalized.notice, Some(UrlNotice::Unresolved));
    }

    #[tokio::test]
    async fn test_normalize_article_url_passes_through() {
        let normalized = service()
            .normalize(" https://www.joongang.co.kr/article/25398258 ")
            .await
            .unwrap();
        assert_eq!(normalized.url, "https://www.joongang.co.kr/article/25398258");
        assert_eq!(normalized.notice, None);
    }

    #[test]
    fn test_is_homepage() {
        assert!(is_homepage("https://www.joongang.co.kr/"));
        assert!(is_homepage("www.chosun.com"));
        assert!(is_homepage("https://www.donga.com"));
        assert!(is_homepage("https://www.joongang.co.kr/politics"));
        assert!(!is_homepage("https://www.joongang.co.kr/article/25398258"));
        assert!(!is_homepage("https://www.chosun.com/article/60012345"));
        assert!(!is_homepage("https://news.example.com/view?id=1"));
    }

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(
            ensure_scheme("  www.donga.com ").unwrap(),
            "https://www.donga.com/"
        );
        assert_eq!(
            ensure_scheme("http://example.com/a?b=1").unwrap(),
            "http://example.com/a?b=1"
        );
        assert!(matches!(ensure_scheme("   "), Err(UrlError::Empty)));
        assert!(matches!(
            ensure_scheme("https://exa mple.com"),
            Err(UrlError::Invalid { .. })
        ));
    }

    #[test]
    fn test_find_latest_article_joongang_relative() {
        let html = r#"
            <a href="/sports">스포츠</a>
            <a href="/article/25398258">기사</a>
            <a href="https://www.joongang.co.kr/article/1">다른 기사</a>
        "#;
        assert_eq!(
            find_latest_article("https://www.joongang.co.kr/", html).as_deref(),
            Some("https://www.joongang.co.kr/article/25398258")
        );
    }

    #[test]
    fn test_find_latest_article_chosun_only_absolute() {
        let html = r#"
            <a href="/politics/article/2">상대 경로</a>
            <a href="https://www.chosun.com/article/60012345">기사</a>
        "#;
        assert_eq!(
            find_latest_article("https://www.CHOSUN.com/", html).as_deref(),
            Some("https://www.chosun.com/article/60012345")
        );
    }

    #[test]
    fn test_find_latest_article_donga_relative() {
        let html = r#"<a href="/news/article/all/20240101/1">기사</a>"#;
        assert_eq!(
            find_latest_article("https://www.donga.com/", html).as_deref(),
            Some("https://www.donga.com/news/article/all/20240101/1")
        );
    }

    #[test]
    fn test_find_latest_article_unknown_site() {
        let html = r#"<a href="https://example.com/article/1">기사</a>"#;
        assert_eq!(find_latest_article("https://example.com/", html), None);
    }

    #[test]
    fn test_notice_messages() {
        assert!(UrlNotice::Converted.message().contains("자동 변환"));
        assert!(UrlNotice::Unresolved.message().contains("직접 입력"));
    }
}
