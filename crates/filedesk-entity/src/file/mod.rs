//! File domain entities.

pub mod kind;
pub mod model;
pub mod size;

pub use kind::FileKind;
pub use model::{ContentRef, FileRecord, UploadBlob};
pub use size::format_size;
