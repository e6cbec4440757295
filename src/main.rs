//! Bookstore API scenario harness CLI
//!
//! Runs named end-to-end scenarios against a configured bookstore service
//! and reports per-step progress. Exit code 1 when a scenario fails.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use harness::common::{logging, Config};
use harness::{run_scenario, ApiClient};

#[derive(Parser)]
#[command(name = "bookstore-harness", about = "Scenario harness for the BookStore API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a named scenario
    Run {
        /// Scenario name (see 'list')
        scenario: String,

        /// Path to a TOML configuration file (default: harness.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured base URL for the bookstore service
        #[arg(long)]
        base_url: Option<String>,

        /// Override the per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print failure details for each failed step
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the available scenarios
    List,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            config,
            base_url,
            timeout,
            verbose,
        } => run(scenario, config, base_url, timeout, verbose).await,
        Commands::List => {
            println!("Available scenarios:");
            for name in harness::scenario::SCENARIOS {
                println!("  {name}");
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(
    scenario: String,
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    timeout: Option<u64>,
    verbose: bool,
) -> harness::Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    let base_url = match base_url {
        Some(url) => url,
        None => config.base_url("bookstore")?.to_string(),
    };
    let request_timeout = timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.request_timeout());

    let client = ApiClient::new(&base_url, request_timeout)?;
    let result = run_scenario(&scenario, &client, config.scenario_timeout(), verbose).await?;

    println!(
        "{} {}/{} steps",
        if result.passed {
            "passed".green().bold()
        } else {
            "failed".red().bold()
        },
        result.steps_run,
        result.steps_total
    );

    if let Some(error) = &result.error {
        eprintln!("{error}");
    }
    if !result.passed {
        std::process::exit(1);
    }
    Ok(())
}
