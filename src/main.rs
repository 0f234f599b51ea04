use anyhow::Result;
use article_cloud::orchestrator::{parse_args, App, CliCommand, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Run(args) => args,
    };

    // 初始化应用（配置、日志、处理流程）
    let mut app = App::initialize(&args)?;

    if args.interactive {
        app.run_interactive().await?;
        return Ok(());
    }

    let url = args
        .url
        .clone()
        .unwrap_or_else(|| app.default_url().to_string());
    if !app.run_once(&url, args.output.as_deref(), args.json).await {
        std::process::exit(1);
    }

    Ok(())
}
