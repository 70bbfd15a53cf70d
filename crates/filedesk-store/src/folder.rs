//! Folder store: folder records, hierarchy queries, and derived file counts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, warn};

use filedesk_core::types::{FolderId, IdSequence};
use filedesk_entity::file::FileRecord;
use filedesk_entity::folder::{Folder, FolderNode, FolderTree};

use crate::file::FileStore;
use crate::observable::{Observable, Snapshot};

/// Outcome of [`FolderStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDeletion {
    /// The removed folder, if it existed.
    pub removed: Option<Arc<Folder>>,
    /// Files moved to root because they were in the folder.
    pub reparented_files: usize,
    /// Child folders still pointing at the removed id.
    pub orphaned_children: usize,
}

/// Owns every folder and publishes the full collection after each mutation.
///
/// Holds the file store so that deleting a folder can move its files to
/// root and keep file counts current.
#[derive(Debug)]
pub struct FolderStore {
    folders: Observable<Folder>,
    ids: IdSequence<FolderId>,
    files: Arc<FileStore>,
}

impl FolderStore {
    /// Create an empty store whose first folder id is `first_id`.
    pub fn new(files: Arc<FileStore>, first_id: u64) -> Self {
        Self {
            folders: Observable::new(),
            ids: IdSequence::starting_at(first_id),
            files,
        }
    }

    /// The current collection, in creation order.
    pub fn snapshot(&self) -> Snapshot<Folder> {
        self.folders.snapshot()
    }

    /// Subscribe to every future publish.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Folder>> {
        self.folders.subscribe()
    }

    /// Number of folders.
    pub fn len(&self) -> usize {
        self.folders.snapshot().len()
    }

    /// Whether the store holds no folders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one folder.
    pub fn get(&self, id: FolderId) -> Option<Arc<Folder>> {
        self.folders.snapshot().iter().find(|f| f.id == id).cloned()
    }

    /// Append a new folder. The parent id is stored as given.
    ///
    /// Names are not validated here; callers reject blank names first.
    pub fn create(&self, name: impl Into<String>, parent_id: Option<FolderId>) -> Folder {
        let folder = Folder {
            id: self.ids.next(),
            name: name.into(),
            parent_id,
            created_at: Utc::now(),
            file_count: 0,
        };

        let total = self.folders.publish_with(|current| {
            let mut next = current.to_vec();
            next.push(Arc::new(folder.clone()));
            let total = next.len();
            (next, total)
        });

        debug!(folder_id = %folder.id, parent_id = ?parent_id, total, "Folder store published create");
        folder
    }

    /// Remove a folder and move the files it held to root.
    ///
    /// Child folders are left alone and keep pointing at the removed id.
    /// File counts are recomputed afterwards.
    pub fn delete(&self, id: FolderId) -> FolderDeletion {
        let (removed, orphaned_children) = self.folders.publish_with(|current| {
            let orphaned = current.iter().filter(|f| f.parent_id == Some(id)).count();
            let (gone, kept): (Vec<_>, Vec<_>) =
                current.iter().cloned().partition(|f| f.id == id);
            (kept, (gone.into_iter().next(), orphaned))
        });

        let reparented_files = self.files.reassign_folder(id, None);
        self.refresh_file_counts();

        if orphaned_children > 0 {
            warn!(
                folder_id = %id,
                orphaned_children,
                "Deleted folder still has child folders pointing at it"
            );
        }
        debug!(
            folder_id = %id,
            existed = removed.is_some(),
            reparented_files,
            "Folder store published delete"
        );

        FolderDeletion {
            removed,
            reparented_files,
            orphaned_children,
        }
    }

    /// Breadcrumb from the root-level ancestor down to `id`, root first.
    ///
    /// See [`ancestry`].
    pub fn path_to(&self, id: Option<FolderId>) -> Vec<Arc<Folder>> {
        ancestry(&self.folders.snapshot(), id)
    }

    /// Number of folders on the breadcrumb to `id` (1 for a root-level
    /// folder, 0 for unknown ids).
    pub fn depth_of(&self, id: FolderId) -> usize {
        self.path_to(Some(id)).len()
    }

    /// Folders whose parent is exactly `parent_id`.
    pub fn children_of(&self, parent_id: Option<FolderId>) -> Vec<Arc<Folder>> {
        children(&self.folders.snapshot(), parent_id)
    }

    /// Set each folder's file count from the given file snapshot.
    ///
    /// Counts are direct only: files in descendant folders are not included.
    /// Folders whose count is unchanged keep their `Arc`; nothing is
    /// published when no count changed.
    pub fn recompute_file_counts(&self, files: &[Arc<FileRecord>]) -> bool {
        self.publish_counts(|| count_by_folder(files))
    }

    /// Recompute file counts from the file store's current snapshot.
    ///
    /// The file snapshot is read under the folder store's write lock, so
    /// the last refresh to run always counts the newest files.
    pub fn refresh_file_counts(&self) -> bool {
        self.publish_counts(|| count_by_folder(&self.files.snapshot()))
    }

    fn publish_counts(&self, load: impl FnOnce() -> HashMap<FolderId, u64>) -> bool {
        let changed = self.folders.publish_if_changed(|current| {
            let counts = load();
            let mut any = false;
            let next: Vec<Arc<Folder>> = current
                .iter()
                .map(|folder| {
                    let count = counts.get(&folder.id).copied().unwrap_or(0);
                    if count == folder.file_count {
                        Arc::clone(folder)
                    } else {
                        any = true;
                        Arc::new(folder.with_file_count(count))
                    }
                })
                .collect();
            any.then_some(next)
        });

        if changed {
            debug!("Folder store published file counts");
        }
        changed
    }

    /// Nested view of the whole hierarchy.
    ///
    /// Root-level folders come first, then folders whose parent no longer
    /// exists, each as its own root.
    pub fn tree(&self) -> FolderTree {
        let snapshot = self.folders.snapshot();
        let known: HashSet<FolderId> = snapshot.iter().map(|f| f.id).collect();

        let mut children: HashMap<FolderId, Vec<&Arc<Folder>>> = HashMap::new();
        let mut roots = Vec::new();
        let mut dangling = Vec::new();
        for folder in snapshot.iter() {
            match folder.parent_id {
                None => roots.push(folder),
                Some(parent) if known.contains(&parent) => {
                    children.entry(parent).or_default().push(folder)
                }
                Some(_) => dangling.push(folder),
            }
        }
        roots.extend(dangling);

        let mut visited = HashSet::new();
        let nodes = roots
            .into_iter()
            .filter_map(|folder| build_node(folder, 1, &children, &mut visited))
            .collect();

        FolderTree::from_roots(nodes)
    }
}

/// Breadcrumb to `id` within one folder snapshot, root first.
///
/// Empty for `None` and for unknown ids. The walk stops early at a parent
/// id that no longer exists, and never takes more steps than there are
/// folders.
pub fn ancestry(folders: &[Arc<Folder>], id: Option<FolderId>) -> Vec<Arc<Folder>> {
    let Some(id) = id else {
        return Vec::new();
    };

    let by_id: HashMap<FolderId, &Arc<Folder>> = folders.iter().map(|f| (f.id, f)).collect();

    let mut path = Vec::new();
    let mut cursor = by_id.get(&id).copied();
    while let Some(folder) = cursor {
        if path.len() >= by_id.len() {
            warn!(folder_id = %id, "Folder ancestry exceeds folder count, stopping walk");
            break;
        }
        path.push(Arc::clone(folder));
        cursor = folder.parent_id.and_then(|parent| by_id.get(&parent).copied());
    }

    path.reverse();
    path
}

/// Folders in the snapshot whose parent is exactly `parent_id`.
pub fn children(folders: &[Arc<Folder>], parent_id: Option<FolderId>) -> Vec<Arc<Folder>> {
    folders
        .iter()
        .filter(|f| f.parent_id == parent_id)
        .cloned()
        .collect()
}

fn count_by_folder(files: &[Arc<FileRecord>]) -> HashMap<FolderId, u64> {
    let mut counts = HashMap::new();
    for folder_id in files.iter().filter_map(|f| f.folder_id) {
        *counts.entry(folder_id).or_insert(0) += 1;
    }
    counts
}

fn build_node(
    folder: &Arc<Folder>,
    depth: usize,
    children: &HashMap<FolderId, Vec<&Arc<Folder>>>,
    visited: &mut HashSet<FolderId>,
) -> Option<FolderNode> {
    if !visited.insert(folder.id) {
        return None;
    }

    let child_nodes: Vec<FolderNode> = children
        .get(&folder.id)
        .map(|kids| {
            kids.iter()
                .filter_map(|child| build_node(child, depth + 1, children, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(FolderNode {
        id: folder.id,
        name: folder.name.clone(),
        depth,
        child_count: child_nodes.len() as u64,
        file_count: folder.file_count,
        children: child_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStorage;
    use filedesk_entity::file::UploadBlob;

    fn make_stores() -> (Arc<FileStore>, FolderStore) {
        let files = Arc::new(FileStore::new(Arc::new(MemoryBlobStorage::new()), 200));
        let folders = FolderStore::new(files.clone(), 100);
        (files, folders)
    }

    fn blob(name: &str) -> UploadBlob {
        UploadBlob::new(name, "application/octet-stream", vec![0u8; 4])
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (_, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));

        assert_eq!(a.id, FolderId(100));
        assert_eq!(b.id, FolderId(101));
        assert_eq!(b.parent_id, Some(a.id));
        assert_eq!(b.file_count, 0);
        assert_eq!(folders.len(), 2);
    }

    #[test]
    fn test_create_keeps_unvalidated_parent() {
        let (_, folders) = make_stores();
        let f = folders.create("loose", Some(FolderId(9999)));
        assert_eq!(f.parent_id, Some(FolderId(9999)));
    }

    #[test]
    fn test_path_to_is_root_first_with_depth_length() {
        let (_, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        let c = folders.create("C", Some(b.id));

        let path = folders.path_to(Some(c.id));
        let ids: Vec<FolderId> = path.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert_eq!(folders.depth_of(c.id), 3);
        assert_eq!(folders.depth_of(a.id), 1);
    }

    #[test]
    fn test_path_to_none_and_unknown_are_empty() {
        let (_, folders) = make_stores();
        folders.create("A", None);
        assert!(folders.path_to(None).is_empty());
        assert!(folders.path_to(Some(FolderId(1))).is_empty());
    }

    #[test]
    fn test_path_stops_at_dangling_parent() {
        let (_, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        let c = folders.create("C", Some(b.id));
        folders.delete(a.id);

        let ids: Vec<FolderId> = folders.path_to(Some(c.id)).iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![b.id, c.id]);
    }

    #[test]
    fn test_delete_reparents_files_and_leaves_children_dangling() {
        let (files, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        let uploaded = files.upload(vec![blob("x"), blob("y")]);
        files.move_to(uploaded[0].id, Some(a.id));

        let outcome = folders.delete(a.id);

        assert_eq!(outcome.removed.map(|f| f.id), Some(a.id));
        assert_eq!(outcome.reparented_files, 1);
        assert_eq!(outcome.orphaned_children, 1);
        assert!(folders.get(a.id).is_none());

        let child = folders.get(b.id).expect("child folder survives");
        assert_eq!(child.parent_id, Some(a.id));
        assert!(files.files_in(None).iter().any(|f| f.id == uploaded[0].id));
    }

    #[test]
    fn test_delete_unknown_folder_removes_nothing() {
        let (_, folders) = make_stores();
        folders.create("A", None);
        let outcome = folders.delete(FolderId(5));
        assert!(outcome.removed.is_none());
        assert_eq!(folders.len(), 1);
    }

    #[test]
    fn test_recompute_file_counts_is_direct_only() {
        let (files, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        let uploaded = files.upload(vec![blob("1"), blob("2"), blob("3")]);
        files.move_to(uploaded[0].id, Some(a.id));
        files.move_to(uploaded[1].id, Some(b.id));
        files.move_to(uploaded[2].id, Some(b.id));

        assert!(folders.recompute_file_counts(&files.snapshot()));
        assert_eq!(folders.get(a.id).unwrap().file_count, 1);
        assert_eq!(folders.get(b.id).unwrap().file_count, 2);

        let before = folders.snapshot();
        assert!(!folders.refresh_file_counts());
        assert!(Arc::ptr_eq(&before[0], &folders.snapshot()[0]));
    }

    #[test]
    fn test_concurrent_moves_leave_counts_current() {
        use std::sync::Barrier;
        use std::thread;

        let (files, folders) = make_stores();
        let folders = Arc::new(folders);
        let target = folders.create("A", None).id;

        for _ in 0..500 {
            let uploaded = files.upload(vec![blob("x"), blob("y")]);
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = uploaded
                .iter()
                .map(|record| {
                    let (files, folders, barrier) =
                        (files.clone(), folders.clone(), barrier.clone());
                    let id = record.id;
                    thread::spawn(move || {
                        barrier.wait();
                        files.move_to(id, Some(target));
                        folders.refresh_file_counts();
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("mover thread panicked");
            }

            assert_eq!(
                folders.get(target).unwrap().file_count,
                files.files_in(Some(target)).len() as u64
            );
        }
    }

    #[test]
    fn test_children_of() {
        let (_, folders) = make_stores();
        let a = folders.create("A", None);
        folders.create("B", Some(a.id));
        folders.create("C", Some(a.id));
        folders.create("D", None);

        assert_eq!(folders.children_of(Some(a.id)).len(), 2);
        assert_eq!(folders.children_of(None).len(), 2);
    }

    #[test]
    fn test_tree_includes_dangling_roots() {
        let (_, folders) = make_stores();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        folders.create("C", Some(b.id));
        let d = folders.create("D", None);
        folders.delete(a.id);

        let tree = folders.tree();
        assert_eq!(tree.total_folders, 3);
        let root_ids: Vec<FolderId> = tree.roots.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![d.id, b.id]);
        assert_eq!(tree.roots[1].child_count, 1);
        assert_eq!(tree.roots[1].children[0].depth, 2);
    }
}
