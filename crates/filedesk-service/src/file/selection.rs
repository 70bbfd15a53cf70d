//! Multi-file selection over a visible list.

use std::collections::HashSet;
use std::sync::Arc;

use filedesk_core::types::FileId;
use filedesk_entity::file::FileRecord;

/// The set of files the user has ticked in the current view.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<FileId>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one file. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: FileId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Whether a file is selected.
    pub fn contains(&self, id: FileId) -> bool {
        self.selected.contains(&id)
    }

    /// Select every visible file, or clear them all if every one was
    /// already selected.
    pub fn toggle_all(&mut self, visible: &[Arc<FileRecord>]) {
        if self.all_selected(visible) {
            self.clear();
        } else {
            self.selected.extend(visible.iter().map(|f| f.id));
        }
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether every visible file is selected. False for an empty list.
    pub fn all_selected(&self, visible: &[Arc<FileRecord>]) -> bool {
        !visible.is_empty() && visible.iter().all(|f| self.selected.contains(&f.id))
    }

    /// Selected files in visible order.
    pub fn selected_in(&self, visible: &[Arc<FileRecord>]) -> Vec<Arc<FileRecord>> {
        visible
            .iter()
            .filter(|f| self.selected.contains(&f.id))
            .cloned()
            .collect()
    }

    /// Selected ids, sorted.
    pub fn ids(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.selected.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Forget selections for files no longer visible.
    pub fn retain_visible(&mut self, visible: &[Arc<FileRecord>]) {
        let visible: HashSet<FileId> = visible.iter().map(|f| f.id).collect();
        self.selected.retain(|id| visible.contains(id));
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
