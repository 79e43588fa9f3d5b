//! PulseDeck CLI entry point.
//!
//! Drives the session, route guard and token components against a
//! file-backed session store so a session survives between invocations.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pulsedeck_core::config::AppConfig;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(config = %cli.config, "Configuration loaded");

    if let Err(e) = cli.execute(&config).await {
        output::notice(output::Notice::Fail, &e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and variables
fn load_configuration(config_path: &str) -> Result<AppConfig, pulsedeck_core::AppError> {
    let env = std::env::var("PULSEDECK_ENV").ok();
    AppConfig::load(config_path, env.as_deref())
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays parseable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
