//! Shared test helpers for integration tests.

use filedesk_core::config::AppConfig;
use filedesk_entity::file::UploadBlob;
use filedesk_service::Workspace;

/// Workspace whose folder ids start at 100 and file ids at 200.
pub fn workspace() -> Workspace {
    let config = AppConfig::from_toml(
        r#"
        [store]
        folder_id_start = 100
        file_id_start = 200
        "#,
    )
    .expect("Failed to parse test config");
    Workspace::new(&config)
}

/// A small text blob named `name`.
pub fn blob(name: &str) -> UploadBlob {
    UploadBlob::new(name, "text/plain", name.as_bytes().to_vec())
}
