//! Endpoint Validator CLI - validate REST API endpoints against an OAS 3.0 contract
//!
//! `generate` builds a test suite file from a contract; `validate` resolves
//! run parameters and executes the suite against a live API.

use clap::Parser;
use endpoint_validator::common::{logging, settings::Settings};
use endpoint_validator::{cli, commands::Commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "endpoint-validator", about = "Validate REST API endpoints against an OAS 3.0 contract")]
#[command(version, long_about = None)]
struct Cli {
    /// Settings file to use instead of the default config.toml
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.command.verbosity());

    let result = match Settings::load(cli.settings.as_deref()) {
        Ok(settings) => cli::dispatch(cli.command, &settings).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
