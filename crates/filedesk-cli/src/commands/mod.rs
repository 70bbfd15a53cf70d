//! CLI command definitions and dispatch.

pub mod config;
pub mod shell;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;

/// FileDesk: in-memory file and folder manager
#[derive(Debug, Parser)]
#[command(name = "filedesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/filedesk.toml")]
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
    /// Start an interactive shell over a fresh workspace
    Shell(shell::ShellArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Shell(args) => shell::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
