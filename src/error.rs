//! 错误类型
//!
//! 每一层有自己的错误枚举，最终汇总为 [`AppError`]。
//! `user_message()` 返回展示给用户的文本（韩文），日志中使用 `Display`。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// URL 相关错误
    #[error("URL错误: {0}")]
    Url(#[from] UrlError),
    /// 网络请求错误
    #[error("请求错误: {0}")]
    Fetch(#[from] FetchError),
    /// 正文提取错误
    #[error("提取错误: {0}")]
    Extract(#[from] ExtractError),
    /// 词云渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// URL 相关错误
#[derive(Debug, Error)]
pub enum UrlError {
    /// 输入为空
    #[error("URL为空")]
    Empty,
    /// 无法解析
    #[error("无法解析URL '{url}': {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// 网络请求错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 请求超时
    #[error("请求超时: {url}")]
    Timeout { url: String },
    /// 连接失败
    #[error("连接失败: {url}")]
    Connection { url: String },
    /// 服务器返回非 2xx
    #[error("请求失败 ({url}), 状态码 {status}")]
    BadStatus { url: String, status: u16 },
    /// 其他请求错误
    #[error("请求失败 ({url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 正文提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 找不到正文（或正文过短）
    #[error("找不到正文 (标题: {title})")]
    BodyNotFound { title: String },
    /// 选择器无法解析
    #[error("选择器无法解析: {selector}")]
    InvalidSelector { selector: String },
    /// 正则表达式无法编译
    #[error("正则表达式无法编译 ({pattern}): {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// 词云渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 找不到可用字体
    #[error("找不到可用的字体文件")]
    FontNotFound,
    /// 字体读取失败
    #[error("读取字体失败 ({path}): {source}")]
    FontRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 字体解析失败
    #[error("无法解析字体 ({path})")]
    FontParse { path: String },
    /// PNG 编码失败
    #[error("PNG编码失败: {0}")]
    Encode(#[from] image::ImageError),
    /// 渲染线程异常退出
    #[error("渲染任务失败: {0}")]
    Task(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("解析配置文件失败 ({path}): {source}")]
    FileParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl AppError {
    /// 返回展示给用户的韩文提示
    pub fn user_message(&self) -> String {
        match self {
            AppError::Url(UrlError::Empty) => "URL을 입력해주세요!".to_string(),
            AppError::Url(UrlError::Invalid { url, .. }) => {
                format!("올바르지 않은 URL입니다: {}", url)
            }
            AppError::Fetch(FetchError::Timeout { .. }) => "요청 시간 초과 (연결 문제)".to_string(),
            AppError::Fetch(FetchError::Connection { .. }) => "연결 실패".to_string(),
            AppError::Fetch(FetchError::BadStatus { status, .. }) => {
                format!("서버 응답 오류 (상태 코드 {})", status)
            }
            AppError::Fetch(FetchError::Request { source, .. }) => source.to_string(),
            AppError::Extract(ExtractError::BodyNotFound { .. }) => {
                "기사 본문을 찾을 수 없습니다. 개별 기사 URL을 입력해주세요 (메인 페이지 제외)"
                    .to_string()
            }
            AppError::Extract(e) => e.to_string(),
            AppError::Render(e) => format!("워드 클라우드를 생성할 수 없습니다. ({})", e),
            AppError::Config(e) => e.to_string(),
        }
    }

    /// 是否为抓取/提取阶段的失败（需要提示用户检查 URL）
    pub fn is_article_failure(&self) -> bool {
        matches!(self, AppError::Fetch(_) | AppError::Extract(_))
    }

    /// 处理失败时展示的完整提示
    ///
    /// 抓取/提取失败额外提醒用户检查是否为单篇文章地址。
    pub fn failure_message(&self) -> String {
        if self.is_article_failure() {
            format!(
                "❌ 기사를 가져올 수 없습니다.\n\n📝 {}\n\n💡 개별 기사 URL을 입력했는지 확인해주세요. (메인 페이지 제외)",
                self.user_message()
            )
        } else {
            format!("❌ {}", self.user_message())
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
