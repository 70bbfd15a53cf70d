//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use filedesk_core::traits::NotificationLevel;
use filedesk_entity::file::{FileRecord, format_size};
use filedesk_entity::folder::Folder;
use filedesk_entity::notification::Notification;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    pub id: u64,
    /// Name
    pub name: String,
    /// Kind
    pub kind: String,
    /// Human-readable size
    pub size: String,
    /// Folder ID, `/` for root
    pub folder: String,
    /// Upload time
    pub uploaded: String,
}

impl From<&FileRecord> for FileRow {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.id.into_raw(),
            name: file.name.clone(),
            kind: file.kind().to_string(),
            size: format_size(file.size),
            folder: file
                .folder_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "/".to_string()),
            uploaded: file.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    /// Folder ID
    pub id: u64,
    /// Name
    pub name: String,
    /// Files directly inside
    pub files: u64,
    /// Created at
    pub created: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.into_raw(),
            name: folder.name.clone(),
            files: folder.file_count,
            created: folder.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
pub struct NotificationRow {
    /// Notification ID
    pub id: u64,
    /// Level
    pub level: String,
    /// Message
    pub message: String,
    /// Time
    pub time: String,
    /// Dismissed
    pub dismissed: bool,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.into_raw(),
            level: n.level.to_string(),
            message: n.message.clone(),
            time: n.created_at.format("%H:%M:%S").to_string(),
            dismissed: n.dismissed,
        }
    }
}

/// Render a list of items in the selected format
pub fn render_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                "No results found.".to_string()
            } else {
                Table::new(items).to_string()
            }
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Render any serializable value as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(item: &T) -> String {
    serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string())
}

/// Success line
pub fn success_line(msg: &str) -> String {
    format!("✓ {msg}")
}

/// Warning line
pub fn warning_line(msg: &str) -> String {
    format!("⚠ {msg}")
}

/// Error line
pub fn error_line(msg: &str) -> String {
    format!("✗ {msg}")
}

/// Line for a notification, prefixed by its level
pub fn notification_line(n: &Notification) -> String {
    match n.level {
        NotificationLevel::Success => success_line(&n.message),
        NotificationLevel::Warning => warning_line(&n.message),
        NotificationLevel::Error => error_line(&n.message),
        NotificationLevel::Info => format!("• {}", n.message),
    }
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("{}", error_line(msg));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("{}", kv_line(key, value));
}

/// Key-value line with the key padded to a fixed column
pub fn kv_line(key: &str, value: &str) -> String {
    format!("  {:<24} {}", format!("{key}:"), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedesk_core::types::NotificationId;

    #[test]
    fn test_empty_table() {
        let rows: Vec<FolderRow> = Vec::new();
        assert_eq!(render_list(&rows, OutputFormat::Table), "No results found.");
        assert_eq!(render_list(&rows, OutputFormat::Json), "[]");
    }

    #[test]
    fn test_kv_line_pads_key() {
        assert_eq!(kv_line("quota", "10 GB"), format!("  {:<24} 10 GB", "quota:"));
    }

    #[test]
    fn test_notification_line_prefix() {
        let ok = Notification::new(NotificationId(1), NotificationLevel::Success, "Done");
        let bad = Notification::new(NotificationId(2), NotificationLevel::Error, "Failed");
        assert_eq!(notification_line(&ok), "✓ Done");
        assert_eq!(notification_line(&bad), "✗ Failed");
    }
}
