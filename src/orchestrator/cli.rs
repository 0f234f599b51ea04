//! 命令行参数
//!
//! 同时支持 `--flag value` 和 `--flag=value` 两种写法。

use anyhow::{anyhow, bail, Context, Result};

use crate::config::Config;
use crate::models::Colormap;
use crate::services::stopwords::parse_list;

pub const USAGE: &str = "\
Usage: article-cloud [options] [URL]

Options:
  --config <file.toml>    配置文件
  --top <N>               排名表数量 (10-100)
  --colormap <name>       配色方案
  --stopwords <a,b,c>     追加停用词（逗号分隔）
  --width <px>            画布宽度 (1-4096)
  --height <px>           画布高度 (1-4096)
  --font <path>           字体文件 (TTF/OTF/TTC)
  --output <file.png>     输出文件
  --json                  以 JSON 输出结果
  --interactive           交互模式
  --help                  显示帮助";

/// 解析后的命令行参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<String>,
    pub url: Option<String>,
    pub top: Option<usize>,
    pub colormap: Option<Colormap>,
    pub stopwords: Vec<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font: Option<String>,
    pub output: Option<String>,
    pub json: bool,
    pub interactive: bool,
}

/// 命令行要做的事
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Help,
    Run(CliArgs),
}

/// 解析参数（不含程序名）
pub fn parse_args<I>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = |name: &str| -> Result<String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args
                    .next()
                    .ok_or_else(|| anyhow!("{} 需要一个参数", name)),
            }
        };

        match flag.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--json" => parsed.json = true,
            "--interactive" | "-i" => parsed.interactive = true,
            "--config" => parsed.config_path = Some(value("--config")?),
            "--font" => parsed.font = Some(value("--font")?),
            "--output" => parsed.output = Some(value("--output")?),
            "--top" => parsed.top = Some(parse_number("--top", &value("--top")?)?),
            "--width" => parsed.width = Some(parse_number("--width", &value("--width")?)?),
            "--height" => parsed.height = Some(parse_number("--height", &value("--height")?)?),
            "--stopwords" => parsed.stopwords.extend(parse_list(&value("--stopwords")?)),
            "--colormap" => {
                let name = value("--colormap")?;
                parsed.colormap = Some(parse_colormap(&name)?);
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            _ => {
                if parsed.url.is_some() {
                    bail!("只能指定一个 URL");
                }
                parsed.url = Some(arg);
            }
        }
    }

    Ok(CliCommand::Run(parsed))
}

impl CliArgs {
    /// 用命令行参数覆盖配置
    pub fn apply(&self, config: &mut Config) {
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if let Some(colormap) = self.colormap {
            config.colormap = colormap;
        }
        config.custom_stopwords.extend(self.stopwords.iter().cloned());
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
    }
}

/// 按名称查找配色方案
pub fn parse_colormap(name: &str) -> Result<Colormap> {
    Colormap::from_name(name)
        .ok_or_else(|| anyhow!("未知配色方案 '{}'，可选: {}", name, Colormap::names()))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("{} 需要一个数字，收到 '{}'", flag, value))
}
