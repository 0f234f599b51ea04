//! 业务能力层（Services）
//!
//! 每个服务只描述"我能做什么"，不关心调用顺序：
//!
//! - `url_service` - 地址规范化、首页 → 最新文章
//! - `extract_service` - 标题与正文提取
//! - `morph_service` / `korean_analyzer` - 形态素分析与名词统计
//! - `stopwords` - 停用词过滤
//! - `wordcloud` - 词云布局与渲染

pub mod extract_service;
pub mod korean_analyzer;
pub mod morph_service;
pub mod stopwords;
pub mod url_service;
pub mod wordcloud;

pub use extract_service::{ArticleExtractor, Extracted};
pub use korean_analyzer::KoreanAnalyzer;
pub use morph_service::{extract_nouns, MorphAnalyzer, Morpheme, PosTag};
pub use stopwords::StopwordFilter;
pub use url_service::{NormalizedUrl, UrlNotice, UrlService};
pub use wordcloud::{FontTypesetter, Typesetter, WordCloudImage};
