//! Cursor-driven navigation over the two stores.

pub mod navigator;
pub mod view;
pub mod watcher;

pub use navigator::Navigator;
pub use view::FolderView;
pub use watcher::ViewWatcher;
