use anyhow::Context;
use clap::Parser;
use fixwell_config::FixwellConfig;
use fixwell_db::StoreService;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("fxw error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = FixwellConfig::load_with_dotenv()?;
    let service = StoreService::connect(&config.database)
        .await
        .context("failed to open the fixwell store")?;

    let result = commands::dispatch(&cli.command, &service, &config).await;

    // Best-effort teardown; mirrors a beforeExit hook, not a hard guarantee.
    service.shutdown().await;
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FIXWELL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
