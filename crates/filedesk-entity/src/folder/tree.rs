//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Depth level (1 for a root-level folder).
    pub depth: usize,
    /// Number of child folders.
    pub child_count: u64,
    /// Number of files directly in this folder.
    pub file_count: u64,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> u64 {
        1 + self.children.iter().map(FolderNode::subtree_len).sum::<u64>()
    }
}

/// The complete folder hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// Root-level folders, then folders whose parent no longer exists.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Build a tree from its roots, counting every node.
    pub fn from_roots(roots: Vec<FolderNode>) -> Self {
        let total_folders = roots.iter().map(FolderNode::subtree_len).sum();
        Self {
            roots,
            total_folders,
        }
    }
}
