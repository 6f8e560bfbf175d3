use clap::Parser;
use tracing::debug;

use filer_cli::cli::Cli;
use filer_cli::config::{AppConfig, FileConfig};
use filer_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = FileConfig::load(cli.config.as_deref())?;
    let config = AppConfig::resolve(file_config, cli.overrides());
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;

    debug!(?config, "starting");
    let output = app::execute(cli.command, &config).await?;
    println!("{output}");

    Ok(())
}
