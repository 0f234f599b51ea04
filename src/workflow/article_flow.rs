//! 文章词云流程 - 流程层
//!
//! 核心职责：定义"一个 URL"的完整处理流程
//!
//! 流程顺序：
//! 1. 规范化地址（首页 → 最新文章）
//! 2. 抓取并提取正文（按最终地址缓存）
//! 3. 名词统计 → 停用词过滤 → 排名表
//! 4. 在阻塞线程中渲染词云

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::ArticleClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, RenderError};
use crate::models::{AnalysisOptions, Article, BodySource, NounFrequencyMap, RankedNoun, RenderOptions};
use crate::services::wordcloud::render;
use crate::services::{
    extract_nouns, ArticleExtractor, FontTypesetter, KoreanAnalyzer, MorphAnalyzer,
    StopwordFilter, Typesetter, UrlNotice, UrlService, WordCloudImage,
};
use crate::utils::memo::Memo;

/// 词云部分的结果
#[derive(Debug, Clone)]
pub enum CloudOutcome {
    /// 渲染成功
    Rendered(WordCloudImage),
    /// 过滤后没有可用的名词
    NoWords,
    /// 渲染失败（字体缺失等），附带给用户的提示
    Failed(String),
}

impl CloudOutcome {
    pub fn image(&self) -> Option<&WordCloudImage> {
        match self {
            CloudOutcome::Rendered(image) => Some(image),
            _ => None,
        }
    }

    /// 没有图片时给用户的提示
    pub fn message(&self) -> Option<String> {
        match self {
            CloudOutcome::Rendered(_) => None,
            CloudOutcome::NoWords => {
                Some("워드 클라우드를 생성할 수 없습니다. (표시할 명사가 없습니다)".to_string())
            }
            CloudOutcome::Failed(message) => Some(message.clone()),
        }
    }
}

/// 一次处理的完整结果
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// 首页转换提示
    pub notice: Option<UrlNotice>,
    pub article: Article,
    pub body_source: BodySource,
    /// 过滤前的名词频率
    pub raw_counts: NounFrequencyMap,
    /// 过滤停用词后的名词频率
    pub filtered: NounFrequencyMap,
    pub top: Vec<RankedNoun>,
    pub cloud: CloudOutcome,
}

/// 文章词云流程
///
/// - 持有各项能力（URL、抓取、提取、分析、排版）
/// - 抓取结果按最终地址缓存，重复请求同一篇文章不再访问网络
/// - 分析参数每次调用时传入，不影响缓存
pub struct ArticleCloudFlow {
    urls: UrlService,
    client: ArticleClient,
    extractor: ArticleExtractor,
    analyzer: Arc<dyn MorphAnalyzer>,
    typesetter: Option<Arc<dyn Typesetter>>,
    scrapes: Memo<String, (Article, BodySource)>,
}

impl ArticleCloudFlow {
    /// 根据配置创建流程
    ///
    /// 显式指定的字体加载失败视为配置错误；自动查找失败时只记录警告，
    /// 之后的词云结果为 [`CloudOutcome::Failed`]。
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = ArticleClient::new(config)?;

        let font = match config.font_path.as_deref() {
            Some(path) => Some(FontTypesetter::from_file(path)?),
            None => match FontTypesetter::discover(None) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warn!("⚠️ {}，将无法生成词云（可用 --font 指定字体）", e);
                    None
                }
            },
        };
        if let Some(ts) = &font {
            debug!("🔤 词云字体: {}", ts.path());
        }
        let typesetter = font.map(|ts| Arc::new(ts) as Arc<dyn Typesetter>);

        Self::with_components(client, Arc::new(KoreanAnalyzer::new()), typesetter)
    }

    /// 使用给定组件创建流程
    pub fn with_components(
        client: ArticleClient,
        analyzer: Arc<dyn MorphAnalyzer>,
        typesetter: Option<Arc<dyn Typesetter>>,
    ) -> AppResult<Self> {
        Ok(Self {
            urls: UrlService::new(client.clone()),
            client,
            extractor: ArticleExtractor::new()?,
            analyzer,
            typesetter,
            scrapes: Memo::new(),
        })
    }

    /// 已缓存的文章数
    pub async fn cached_articles(&self) -> usize {
        self.scrapes.len().await
    }

    /// 处理一个 URL
    pub async fn run(&self, raw_url: &str, options: &AnalysisOptions) -> AppResult<ProcessResult> {
        let normalized = self.urls.normalize(raw_url).await?;
        if let Some(notice) = &normalized.notice {
            info!("ℹ️ {}", notice.message());
        }

        let (article, body_source) = self.scrape(&normalized.url).await?;
        info!(
            "📰 {} (正文 {} 字)",
            article.title,
            article.body_len()
        );

        let raw_counts = extract_nouns(self.analyzer.as_ref(), &article.body_text);
        let filter = StopwordFilter::with_custom(&options.custom_stopwords);
        let filtered = filter.remove_stopwords(&raw_counts);
        info!(
            "🔤 名词 {} 个，过滤停用词后 {} 个",
            raw_counts.len(),
            filtered.len()
        );

        let top = filtered.top(options.top_n);
        let cloud = self.render_cloud(&filtered, &options.render).await;

        Ok(ProcessResult {
            notice: normalized.notice,
            article,
            body_source,
            raw_counts,
            filtered,
            top,
            cloud,
        })
    }

    /// 抓取并提取文章，成功结果按地址缓存
    async fn scrape(&self, url: &str) -> AppResult<(Article, BodySource)> {
        self.scrapes
            .get_or_try_insert_with(url.to_string(), || async {
                info!("🌐 抓取文章: {}", url);
                let html = self.client.fetch_html(url).await?;
                let extracted = self.extractor.extract(&html)?;
                let source = extracted.source.clone();
                Ok::<_, AppError>((extracted.into_article(url), source))
            })
            .await
    }

    async fn render_cloud(&self, filtered: &NounFrequencyMap, options: &RenderOptions) -> CloudOutcome {
        if filtered.is_empty() {
            return CloudOutcome::NoWords;
        }
        let Some(typesetter) = self.typesetter.clone() else {
            return CloudOutcome::Failed(AppError::from(RenderError::FontNotFound).user_message());
        };

        let frequencies = filtered.clone();
        let options = options.clone();
        let task = tokio::task::spawn_blocking(move || {
            render(&frequencies, &options, typesetter.as_ref())
        });

        match task.await {
            Ok(Some(image)) => CloudOutcome::Rendered(image),
            Ok(None) => CloudOutcome::NoWords,
            Err(e) => {
                CloudOutcome::Failed(AppError::from(RenderError::Task(e.to_string())).user_message())
            }
        }
    }
}
