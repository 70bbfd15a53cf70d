//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;
use filedesk_entity::file::format_size;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, environment, and defaults)
    Show,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => println!("{}", output::render_json(config)),
            OutputFormat::Table => {
                println!("Configuration (source: {config_path}, FILEDESK__* overrides)");
                for (key, value) in summary(config) {
                    output::print_kv(key, &value);
                }
            }
        },
    }

    Ok(())
}

/// Flattened key/value view of the settings.
fn summary(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("store.file_id_start", config.store.file_id_start.to_string()),
        ("store.folder_id_start", config.store.folder_id_start.to_string()),
        ("store.recent_default", config.store.recent_default.to_string()),
        (
            "notifications.history",
            config.notifications.history_capacity.to_string(),
        ),
        (
            "notifications.channel",
            config.notifications.channel_capacity.to_string(),
        ),
        ("events.channel", config.events.channel_capacity.to_string()),
        ("storage.quota", format_size(config.storage.quota_bytes)),
        (
            "storage.max_upload",
            format_size(config.storage.max_upload_size_bytes),
        ),
        ("logging.level", config.logging.level.clone()),
        ("logging.format", config.logging.format.clone()),
    ]
}
