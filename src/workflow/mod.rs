//! 流程层（Workflow）
//!
//! 定义"一个 URL"从地址到词云的完整处理流程，只依赖业务能力层。

pub mod article_flow;

pub use article_flow::{ArticleCloudFlow, CloudOutcome, ProcessResult};
