//! Call builder for the SRMV1 DEX.
//!
//! This binary builds the descriptor of one entry point, quote or pool state
//! call from its command line arguments and prints it as JSON. Nothing is sent
//! to the network.

mod command;
mod config;
mod error;

use clap::Parser;
use std::process::exit;
use tracing::{debug, error};

use config::{CliConfig, EnvConfig};
use error::Result;

fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&env_config, &cli_config) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(%e, "Failed to build call");
            exit(1);
        }
    }
}

fn run(env_config: &EnvConfig, cli_config: &CliConfig) -> Result<String> {
    let deployment = env_config.deployment()?;
    let clock = env_config.clock()?;
    let amounts = cli_config.amounts(env_config)?;

    let descriptor = cli_config.command.to_call(&deployment, &amounts, clock)?;
    debug!(call = %descriptor, commands = descriptor.commands().len(), "Built call");

    Ok(serde_json::to_string_pretty(&descriptor)?)
}
