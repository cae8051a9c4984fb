//! AQM CLI - Command line tool for live air quality readings.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqm",
    version,
    about = "Air quality index lookups backed by OpenWeatherMap"
)]
struct Cli {
    #[command(flatten)]
    config: aqm_cmd::config::Config,

    #[command(subcommand)]
    command: aqm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using API at {}", cli.config.base_url);
    aqm_cmd::run(&cli.config, cli.command).await
}
