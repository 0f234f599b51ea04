//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `cli` - 命令行参数
//! - 解析 `--flag value` / `--flag=value`
//! - 把参数覆盖到配置上
//!
//! ### `app` - 应用入口
//! - 合并配置、初始化日志和处理流程
//! - 单次运行与交互模式
//!
//! ### `report` - 结果展示
//! - 文章信息、名词排名表、JSON 报告
//!
//! ## 层次关系
//!
//! ```text
//! app (单次 / 交互)
//!     ↓
//! workflow::ArticleCloudFlow (处理单个 URL)
//!     ↓
//! services (能力层：url / extract / morph / stopwords / wordcloud)
//!     ↓
//! clients (基础设施：ArticleClient)
//! ```

pub mod app;
pub mod cli;
pub mod report;

pub use app::App;
pub use cli::{parse_args, CliArgs, CliCommand, USAGE};
