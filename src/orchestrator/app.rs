//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：合并配置、启动日志、创建 `ArticleCloudFlow`
//! 2. **单次运行**：处理一个 URL，输出报告并保存 PNG
//! 3. **交互模式**：逐行读取 URL 或设置命令，重复的 URL 使用缓存
//!
//! 所有处理失败都只显示提示（`❌ …`），不会终止程序。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::config::{Config, CANVAS_SIZE_RANGE, TOP_N_RANGE};
use crate::models::{AnalysisOptions, Colormap};
use crate::orchestrator::cli::{parse_colormap, CliArgs};
use crate::orchestrator::report::{format_report, json_report};
use crate::services::stopwords::parse_list;
use crate::utils::logging::{log_request_start, log_startup};
use crate::workflow::{ArticleCloudFlow, ProcessResult};

pub const INTERACTIVE_HELP: &str = "\
URL을 입력하면 워드 클라우드를 생성합니다.
  :top N           상위 명사 개수 (10-100)
  :colormap NAME   색상 테마
  :stopwords a,b   추가 불용어 (쉼표로 구분, 비우면 초기화)
  :size WxH        이미지 크기
  :show            현재 설정
  :help            도움말
  :quit            종료";

/// 交互模式的一行输入
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Analyze(String),
    Top(usize),
    Colormap(Colormap),
    Stopwords(Vec<String>),
    Size(u32, u32),
    Show,
    Help,
    Quit,
}

/// 解析交互模式输入；错误信息直接展示给用户
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Analyze(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "top" => {
            let n: usize = arg
                .parse()
                .map_err(|_| format!("숫자를 입력해주세요: '{}'", arg))?;
            if !TOP_N_RANGE.contains(&n) {
                return Err(format!(
                    "{}에서 {} 사이의 값을 입력해주세요",
                    TOP_N_RANGE.start(),
                    TOP_N_RANGE.end()
                ));
            }
            Ok(Command::Top(n))
        }
        "colormap" => parse_colormap(arg)
            .map(Command::Colormap)
            .map_err(|_| format!("알 수 없는 색상 테마 '{}' ({})", arg, Colormap::names())),
        "stopwords" => Ok(Command::Stopwords(parse_list(arg))),
        "size" => {
            let parsed = arg
                .split_once(['x', 'X'])
                .and_then(|(w, h)| {
                    Some((w.trim().parse::<u32>().ok()?, h.trim().parse::<u32>().ok()?))
                });
            match parsed {
                Some((w, h)) if CANVAS_SIZE_RANGE.contains(&w) && CANVAS_SIZE_RANGE.contains(&h) => {
                    Ok(Command::Size(w, h))
                }
                Some(_) => Err(format!(
                    "가로, 세로는 {}에서 {} 사이로 입력해주세요",
                    CANVAS_SIZE_RANGE.start(),
                    CANVAS_SIZE_RANGE.end()
                )),
                None => Err(format!("WxH 형식으로 입력해주세요: '{}'", arg)),
            }
        }
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("알 수 없는 명령: :{}", other)),
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: ArticleCloudFlow,
    options: AnalysisOptions,
}

impl App {
    /// 初始化应用
    ///
    /// 配置优先级：默认值 → 配置文件 → 环境变量 → 命令行。
    pub fn initialize(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config_path {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };
        config = config.with_env()?;
        args.apply(&mut config);

        crate::utils::logging::init(config.verbose_logging);
        Self::with_config(config)
    }

    /// 使用已合并好的配置初始化
    pub fn with_config(config: Config) -> Result<Self> {
        let options = config.analysis_options()?;
        log_startup(&config);
        let flow = ArticleCloudFlow::new(&config).context("初始化处理流程失败")?;
        Ok(Self {
            config,
            flow,
            options,
        })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn default_url(&self) -> &str {
        &self.config.default_url
    }

    /// 处理一个 URL 并输出结果
    ///
    /// # 返回
    /// 处理成功返回 true；失败时已向用户显示提示，返回 false
    pub async fn run_once(&self, raw_url: &str, output: Option<&str>, as_json: bool) -> bool {
        log_request_start(raw_url);

        let result = match self.flow.run(raw_url, &self.options).await {
            Ok(result) => result,
            Err(e) => {
                error!("处理失败: {}", e);
                eprintln!("{}", e.failure_message());
                return false;
            }
        };

        let image_path = self.save_image(&result, output);

        if as_json {
            let report = json_report(&result, image_path.as_deref());
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("❌ {}", e),
            }
        } else {
            println!("{}", format_report(&result));
            match (&image_path, result.cloud.message()) {
                (Some(path), _) => println!("🖼️  워드 클라우드 저장: {}", path.display()),
                (None, Some(message)) => eprintln!("❌ {}", message),
                (None, None) => {}
            }
        }

        true
    }

    /// 保存 PNG；没有图片或保存失败时返回 None
    fn save_image(&self, result: &ProcessResult, output: Option<&str>) -> Option<PathBuf> {
        let image = result.cloud.image()?;
        let path = match output {
            Some(path) => PathBuf::from(path),
            None => Path::new(&self.config.output_dir).join(result.article.image_file_name()),
        };

        match image.save(&path) {
            Ok(()) => Some(path),
            Err(e) => {
                error!("保存词云失败: {}", e);
                eprintln!("❌ {}", crate::error::AppError::from(e).user_message());
                None
            }
        }
    }

    /// 交互模式：逐行读取标准输入直到 `:quit` 或输入结束
    pub async fn run_interactive(&mut self) -> Result<()> {
        println!("{}", INTERACTIVE_HELP);
        println!("기본 URL: {}", self.config.default_url);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print_prompt();
            let Some(line) = lines.next_line().await.context("读取标准输入失败")? else {
                break;
            };

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.apply_command(command).await,
                Err(message) => eprintln!("❌ {}", message),
            }
        }

        info!("👋 交互模式结束，缓存文章 {} 篇", self.flow.cached_articles().await);
        Ok(())
    }

    async fn apply_command(&mut self, command: Command) {
        match command {
            Command::Empty => {}
            Command::Analyze(url) => {
                self.run_once(&url, None, false).await;
            }
            Command::Top(n) => {
                self.options.top_n = n;
                println!("✓ 상위 {}개 명사", n);
            }
            Command::Colormap(colormap) => {
                self.options.render.colormap = colormap;
                println!("✓ 색상 테마: {}", colormap);
            }
            Command::Stopwords(words) => {
                self.options.custom_stopwords = words;
                println!("✓ 추가 불용어 {}개", self.options.custom_stopwords.len());
            }
            Command::Size(w, h) => {
                self.options.render.width = w;
                self.options.render.height = h;
                println!("✓ 이미지 크기: {}x{}", w, h);
            }
            Command::Show => println!("{}", describe_options(&self.options)),
            Command::Help => println!("{}", INTERACTIVE_HELP),
            Command::Quit => {}
        }
    }
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// 当前设置的文字描述
pub fn describe_options(options: &AnalysisOptions) -> String {
    let stopwords = if options.custom_stopwords.is_empty() {
        "(없음)".to_string()
    } else {
        options.custom_stopwords.join(", ")
    };
    format!(
        "상위 명사: {}\n색상 테마: {}\n추가 불용어: {}\n이미지 크기: {}x{}",
        options.top_n,
        options.render.colormap,
        stopwords,
        options.render.width,
        options.render.height
    )
}
