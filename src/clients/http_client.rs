/// 新闻站点 HTTP 客户端
///
/// 封装对新闻站点的 GET 请求：浏览器 User-Agent、固定超时、重定向上限。
use crate::config::Config;
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// 最多跟随的重定向次数
const MAX_REDIRECTS: usize = 10;

/// 新闻站点 HTTP 客户端
#[derive(Clone)]
pub struct ArticleClient {
    client: Client,
}

impl ArticleClient {
    /// 创建新的 HTTP 客户端
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_settings(
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// 使用指定的 User-Agent 和超时创建客户端
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|source| FetchError::Request {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }

    /// 获取页面 HTML
    ///
    /// 不论响应头声明的编码，正文一律按 UTF-8 解码（非法字节替换）。
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| classify(url, e))?;
        debug!("收到 {} 字节", bytes.len());

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// 把 reqwest 错误归类为超时、连接失败或其他
fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_connect() {
        FetchError::Connection {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: err,
        }
    }
}
