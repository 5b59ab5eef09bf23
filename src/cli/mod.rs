pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "newsgrab")]
#[command(about = "Scrape a news category into a spreadsheet", long_about = None)]
pub struct Cli {
    /// Path to the work-item configuration (JSON, or TOML by extension)
    #[arg(env = "ROBOT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
