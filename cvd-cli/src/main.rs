//! CVD CLI - Command line tool for the OWID COVID-19 dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cvd-cli",
    version,
    about = "COVID-19 global dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cvd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cvd_cmd::run(cli.command).await
}
