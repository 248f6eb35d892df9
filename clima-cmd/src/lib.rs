//! Command implementations for the Clima CLI.
//!
//! Each subcommand builds the same forms the web app builds, validates them
//! with the same rules and drives the same coordinators against the service.

use clap::Subcommand;
use clima_api::ClimateClient;
use clima_core::config::ApiConfig;

pub mod analyze;
pub mod args;
pub mod series;

use args::{SeriesArgs, TargetArgs};

#[derive(Subcommand)]
pub enum Command {
    /// Run the climatological analysis and print the result rows
    Analyze {
        #[command(flatten)]
        target: TargetArgs,

        /// Only print this factor (precipitation, temperature, humidity, wind, comfort)
        #[arg(short, long)]
        factor: Option<String>,
    },

    /// Save the yearly series chart of one factor as a PNG
    Plot {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        series: SeriesArgs,

        /// Output path for the chart image
        #[arg(short, long)]
        out: String,
    },

    /// Download the yearly series of one factor as CSV
    Csv {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        series: SeriesArgs,

        /// Directory the CSV is written to, under its standard file name
        #[arg(short, long, default_value = ".")]
        out_dir: String,

        /// Print the header and the first N rows
        #[arg(long, default_value_t = 0)]
        preview: usize,
    },
}

fn client(api_base: &str) -> anyhow::Result<ClimateClient> {
    let config = ApiConfig::from_base(Some(api_base));
    if config.base_url().is_empty() {
        anyhow::bail!("no service root given; pass --api-base or set CLIMA_API_BASE");
    }
    Ok(ClimateClient::new(config))
}

pub async fn run(api_base: &str, command: Command) -> anyhow::Result<()> {
    let client = client(api_base)?;
    match command {
        Command::Analyze { target, factor } => {
            analyze::run_analyze(&client, &target, factor.as_deref()).await
        }
        Command::Plot {
            target,
            series,
            out,
        } => series::run_plot(&client, &target, &series, &out).await,
        Command::Csv {
            target,
            series,
            out_dir,
            preview,
        } => series::run_csv(&client, &target, &series, &out_dir, preview).await,
    }
}
