//! Broad file categories derived from MIME types.

use serde::{Deserialize, Serialize};

/// Display category of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `image/*` and anything mentioning "image".
    Image,
    /// PDF documents.
    Pdf,
    /// Video content.
    Video,
    /// Audio content.
    Audio,
    /// Office-style documents and plain text.
    Document,
    /// Everything else.
    Other,
}

impl FileKind {
    /// Classify by substring of the MIME type. Earlier variants win.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("image") {
            Self::Image
        } else if mime.contains("pdf") {
            Self::Pdf
        } else if mime.contains("video") {
            Self::Video
        } else if mime.contains("audio") {
            Self::Audio
        } else if mime.contains("document") || mime.starts_with("text/") {
            Self::Document
        } else {
            Self::Other
        }
    }

    /// Whether the file counts as a document for filtering.
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Pdf | Self::Document)
    }

    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_mime("video/mp4"), FileKind::Video);
        assert_eq!(FileKind::from_mime("audio/ogg"), FileKind::Audio);
        assert_eq!(
            FileKind::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            FileKind::Document
        );
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Document);
        assert_eq!(FileKind::from_mime(""), FileKind::Other);
        assert_eq!(FileKind::from_mime("application/zip"), FileKind::Other);
    }

    #[test]
    fn test_image_wins_over_pdf() {
        assert_eq!(FileKind::from_mime("image/x-pdf-preview"), FileKind::Image);
    }
}
