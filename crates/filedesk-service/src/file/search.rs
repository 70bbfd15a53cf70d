//! Name and kind filtering over file lists.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use filedesk_entity::file::{FileKind, FileRecord};

/// Coarse kind filter offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    /// No kind restriction.
    #[default]
    All,
    /// Images only.
    Images,
    /// PDFs and other documents.
    Documents,
    /// Anything that is neither an image nor a document.
    Other,
}

impl KindFilter {
    /// Whether a file of `kind` passes this filter.
    pub fn accepts(&self, kind: FileKind) -> bool {
        match self {
            Self::All => true,
            Self::Images => kind == FileKind::Image,
            Self::Documents => kind.is_document(),
            Self::Other => kind != FileKind::Image && !kind.is_document(),
        }
    }
}

impl std::str::FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "images" | "image" => Ok(Self::Images),
            "documents" | "document" | "docs" => Ok(Self::Documents),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown kind filter '{other}'")),
        }
    }
}

/// Filter applied to a file list: kind plus case-insensitive name substring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Kind restriction.
    #[serde(default)]
    pub kind: KindFilter,
    /// Name substring. Blank matches everything.
    #[serde(default)]
    pub query: String,
}

impl FileFilter {
    /// A filter on name only.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            kind: KindFilter::All,
            query: query.into(),
        }
    }

    /// Restrict by kind as well.
    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    /// Whether a single record passes.
    pub fn matches(&self, file: &FileRecord) -> bool {
        if !self.kind.accepts(file.kind()) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty() || file.name.to_lowercase().contains(&needle)
    }

    /// Keep the records that pass, preserving order.
    pub fn apply(&self, files: &[Arc<FileRecord>]) -> Vec<Arc<FileRecord>> {
        files.iter().filter(|f| self.matches(f)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use filedesk_core::types::FileId;
    use filedesk_entity::file::ContentRef;

    fn file(id: u64, name: &str, mime: &str) -> Arc<FileRecord> {
        Arc::new(FileRecord {
            id: FileId(id),
            name: name.to_string(),
            size: 1,
            mime_type: mime.to_string(),
            uploaded_at: Utc::now(),
            content: ContentRef::new(format!("blob:test/{id}")),
            folder_id: None,
        })
    }

    fn sample() -> Vec<Arc<FileRecord>> {
        vec![
            file(1, "Holiday.PNG", "image/png"),
            file(2, "report.pdf", "application/pdf"),
            file(3, "notes.txt", "text/plain"),
            file(4, "backup.zip", "application/zip"),
        ]
    }

    fn ids(files: &[Arc<FileRecord>]) -> Vec<u64> {
        files.iter().map(|f| f.id.0).collect()
    }

    #[test]
    fn test_query_is_case_insensitive() {
        assert_eq!(ids(&FileFilter::query("holiday").apply(&sample())), vec![1]);
        assert_eq!(ids(&FileFilter::query("  ").apply(&sample())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_kind_filters() {
        let files = sample();
        let by_kind = |kind| ids(&FileFilter::default().with_kind(kind).apply(&files));
        assert_eq!(by_kind(KindFilter::Images), vec![1]);
        assert_eq!(by_kind(KindFilter::Documents), vec![2, 3]);
        assert_eq!(by_kind(KindFilter::Other), vec![4]);
        assert_eq!(by_kind(KindFilter::All), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_kind_and_query_combine() {
        let filter = FileFilter::query("re").with_kind(KindFilter::Documents);
        assert_eq!(ids(&filter.apply(&sample())), vec![2]);
    }

    #[test]
    fn test_kind_filter_from_str() {
        assert_eq!("Images".parse::<KindFilter>(), Ok(KindFilter::Images));
        assert_eq!("docs".parse::<KindFilter>(), Ok(KindFilter::Documents));
        assert!("videos".parse::<KindFilter>().is_err());
    }
}
