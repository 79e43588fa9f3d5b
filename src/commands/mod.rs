//! CLI command definitions and dispatch.

pub mod guard;
pub mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use pulsedeck_auth::{FileStore, SessionStore};
use pulsedeck_core::config::AppConfig;
use pulsedeck_core::error::AppError;

/// PulseDeck session and route guard tooling for the metrics dashboard
#[derive(Debug, Parser)]
#[command(name = "pulsedeck", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with a demo identity
    Login(session::LoginArgs),
    /// Sign out and delete the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Reissue the current session's token
    Refresh,
    /// Evaluate the route guard for a URL
    Guard(guard::GuardArgs),
    /// List declared routes
    Routes,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => session::login(args, config, self.format).await,
            Commands::Logout => session::logout(config).await,
            Commands::Whoami => session::whoami(config, self.format).await,
            Commands::Refresh => session::refresh(config, self.format).await,
            Commands::Guard(args) => guard::execute(args, config, self.format).await,
            Commands::Routes => guard::routes(self.format),
        }
    }
}

/// Helper: open the file-backed session from config
pub fn open_session(config: &AppConfig) -> Result<SessionStore, AppError> {
    let store = FileStore::new(&config.session.storage_path);
    SessionStore::from_config(config, Arc::new(store))
}
