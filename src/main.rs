use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsgrab::cli::{commands, Cli};
use newsgrab::config::RunConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = RunConfig::load(&cli.config)?;

    // One timestamp for every artifact of this run
    let started_at = Utc::now();
    let path = commands::run(&config, started_at).await?;

    println!("{}", path.display());
    Ok(())
}
