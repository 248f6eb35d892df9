//! Clima CLI - command line access to the climate analysis service.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "clima-cli",
    version,
    about = "Climate factors for a place and day of the year"
)]
struct Cli {
    /// Root URL of the analysis service
    #[arg(long, env = "CLIMA_API_BASE", global = true, default_value = "")]
    api_base: String,

    #[command(subcommand)]
    command: clima_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("using service at '{}'", cli.api_base);
    clima_cmd::run(&cli.api_base, cli.command).await
}
