//! 程序配置
//!
//! 优先级（从低到高）：默认值 → TOML 配置文件 → 环境变量 → 命令行参数。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::models::{parse_hex_color, AnalysisOptions, Colormap, RenderOptions};

/// 排名表名词数量的允许范围
pub const TOP_N_RANGE: std::ops::RangeInclusive<usize> = 10..=100;

/// 画布每边的像素范围
pub const CANVAS_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=4096;

/// 环境变量前缀
const ENV_PREFIX: &str = "ARTICLE_CLOUD_";

/// 程序配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 未指定 URL 时使用的地址
    pub default_url: String,
    /// 请求时使用的 User-Agent
    pub user_agent: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 排名表显示的名词数量
    pub top_n: usize,
    /// 追加的停用词
    pub custom_stopwords: Vec<String>,
    // --- 渲染配置 ---
    pub colormap: Colormap,
    pub width: u32,
    pub height: u32,
    /// 背景色（#RRGGBB）
    pub background_color: String,
    pub max_words: usize,
    pub relative_scaling: f32,
    pub min_font_size: u32,
    pub max_font_size: Option<u32>,
    /// 字体文件路径，None 时在常见路径中查找
    pub font_path: Option<String>,
    /// PNG 输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            default_url: "https://www.joongang.co.kr/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            request_timeout_secs: 10,
            top_n: 50,
            custom_stopwords: Vec::new(),
            colormap: render.colormap,
            width: render.width,
            height: render.height,
            background_color: "#FFFFFF".to_string(),
            max_words: render.max_words,
            relative_scaling: render.relative_scaling,
            min_font_size: render.min_font_size,
            max_font_size: render.max_font_size,
            font_path: None,
            output_dir: ".".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::FileParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 默认值叠加进程环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// 用进程环境变量覆盖当前配置
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// 用给定的查找函数覆盖当前配置（变量名不含前缀部分见 [`ENV_PREFIX`]）
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let name = format!("{}{}", ENV_PREFIX, key);
            lookup(&name).map(|value| (name, value))
        };

        if let Some((_, v)) = var("DEFAULT_URL") {
            self.default_url = v;
        }
        if let Some((_, v)) = var("USER_AGENT") {
            self.user_agent = v;
        }
        if let Some((name, v)) = var("TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env(&name, &v, "u64")?;
        }
        if let Some((name, v)) = var("TOP_N") {
            self.top_n = parse_env(&name, &v, "usize")?;
        }
        if let Some((_, v)) = var("STOPWORDS") {
            self.custom_stopwords = crate::services::stopwords::parse_list(&v);
        }
        if let Some((name, v)) = var("COLORMAP") {
            self.colormap =
                Colormap::from_name(&v).ok_or_else(|| ConfigError::EnvVarParseFailed {
                    var_name: name,
                    value: v.clone(),
                    expected_type: format!("colormap ({})", Colormap::names()),
                })?;
        }
        if let Some((name, v)) = var("WIDTH") {
            self.width = parse_env(&name, &v, "u32")?;
        }
        if let Some((name, v)) = var("HEIGHT") {
            self.height = parse_env(&name, &v, "u32")?;
        }
        if let Some((_, v)) = var("BACKGROUND") {
            self.background_color = v;
        }
        if let Some((name, v)) = var("MAX_WORDS") {
            self.max_words = parse_env(&name, &v, "usize")?;
        }
        if let Some((_, v)) = var("FONT_PATH") {
            self.font_path = Some(v);
        }
        if let Some((_, v)) = var("OUTPUT_DIR") {
            self.output_dir = v;
        }
        if let Some((name, v)) = var("VERBOSE") {
            self.verbose_logging = parse_env(&name, &v, "bool")?;
        }

        Ok(self)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TOP_N_RANGE.contains(&self.top_n) {
            return Err(invalid(
                "top_n",
                format!(
                    "{} 不在 {}..={} 范围内",
                    self.top_n,
                    TOP_N_RANGE.start(),
                    TOP_N_RANGE.end()
                ),
            ));
        }
        if !CANVAS_SIZE_RANGE.contains(&self.width) || !CANVAS_SIZE_RANGE.contains(&self.height) {
            return Err(invalid(
                "width/height",
                format!(
                    "画布尺寸 {}x{} 超出 {}..={} 范围",
                    self.width,
                    self.height,
                    CANVAS_SIZE_RANGE.start(),
                    CANVAS_SIZE_RANGE.end()
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(invalid(
                "relative_scaling",
                format!("{} 不在 [0, 1] 范围内", self.relative_scaling),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "超时必须大于 0"));
        }
        if self.max_words == 0 {
            return Err(invalid("max_words", "必须大于 0"));
        }
        if self.min_font_size == 0 {
            return Err(invalid("min_font_size", "必须大于 0"));
        }
        if parse_hex_color(&self.background_color).is_none() {
            return Err(invalid(
                "background_color",
                format!("'{}' 不是 #RRGGBB 格式", self.background_color),
            ));
        }
        Ok(())
    }

    /// 校验并生成单次分析参数
    pub fn analysis_options(&self) -> Result<AnalysisOptions, ConfigError> {
        self.validate()?;
        let background = parse_hex_color(&self.background_color).ok_or_else(|| {
            invalid("background_color", self.background_color.clone())
        })?;

        Ok(AnalysisOptions {
            top_n: self.top_n,
            custom_stopwords: self.custom_stopwords.clone(),
            render: RenderOptions {
                width: self.width,
                height: self.height,
                colormap: self.colormap,
                background,
                max_words: self.max_words,
                relative_scaling: self.relative_scaling,
                min_font_size: self.min_font_size,
                max_font_size: self.max_font_size,
                ..RenderOptions::default()
            },
        })
    }
}

fn parse_env<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
