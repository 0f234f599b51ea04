//! # Article Cloud
//!
//! 抓取韩文新闻文章，统计名词频率并生成词云 PNG
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - `ArticleClient`：浏览器 UA、超时、UTF-8 解码
//!
//! ### ② 业务能力层（Services）
//! - `UrlService` - 地址规范化、首页 → 最新文章
//! - `ArticleExtractor` - 标题/正文提取（有序候选选择器 + 段落兜底）
//! - `KoreanAnalyzer` - 基于规则的形态素分析（`MorphAnalyzer` 的默认实现）
//! - `StopwordFilter` - 默认停用词 + 用户停用词
//! - `wordcloud` - 布局、渲染、PNG 编码
//!
//! ### ③ 流程层（Workflow）
//! - `ArticleCloudFlow` - 规范化 → 抓取（缓存）→ 名词 → 过滤 → 排名 → 渲染
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 命令行、交互模式、结果展示

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisOptions, Article, NounFrequencyMap, RenderOptions};
pub use orchestrator::App;
pub use workflow::{ArticleCloudFlow, CloudOutcome, ProcessResult};
