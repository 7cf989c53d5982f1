//! Project tree: root directories, expansion state and the path index.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use tabflow_core::{FileRef, FileResolver, Result};

use crate::disk::DiskFile;
use crate::node::FsNode;

/// Ordered project roots with per-directory expansion state.
///
/// The tree owns a flat index of every file path it has walked; the session
/// engine resolves open requests against that index, so only files actually
/// present in the project can be opened through it.
#[derive(Debug, Default)]
pub struct ProjectTree {
    roots: Vec<FsNode>,
    expanded: HashSet<String>,
    files: HashSet<String>,
}

impl ProjectTree {
    /// An empty tree with no roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `path` and add it as a root.
    ///
    /// Re-adding an existing root replaces it with a fresh walk.
    pub fn add_directory(&mut self, path: &Path) -> Result<()> {
        let node = FsNode::walk(path)?;
        info!(
            "Added project root '{}' ({} file(s))",
            node.path,
            node.file_paths().len()
        );
        self.roots.retain(|root| root.path != node.path);
        self.roots.push(node);
        self.rebuild_index();
        Ok(())
    }

    /// Drop every root and all associated state.
    pub fn remove_all(&mut self) {
        info!("Removing all {} project root(s)", self.roots.len());
        self.roots.clear();
        self.expanded.clear();
        self.files.clear();
    }

    /// Re-walk every root, picking up on-disk changes.
    ///
    /// Roots that no longer exist are dropped with a warning.
    pub fn refresh(&mut self) {
        let mut refreshed = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            match FsNode::walk(Path::new(&root.path)) {
                Ok(node) => refreshed.push(node),
                Err(e) => warn!("Dropping project root '{}': {}", root.path, e),
            }
        }
        self.roots = refreshed;
        self.rebuild_index();
    }

    /// Flip a directory's expansion state; returns the new state.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    /// Whether a directory is currently expanded.
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// The walked roots, in the order they were added.
    pub fn roots(&self) -> &[FsNode] {
        &self.roots
    }

    /// Whether `path` is a file known to the tree.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// Number of files across all roots.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn rebuild_index(&mut self) {
        self.files = self
            .roots
            .iter()
            .flat_map(|root| root.file_paths())
            .map(str::to_string)
            .collect();
        // Expansion state for paths that vanished is dropped with them
        let known: HashSet<&str> = self
            .roots
            .iter()
            .flat_map(|root| {
                let mut dirs = Vec::new();
                root.visit(&mut |node| {
                    if node.is_dir {
                        dirs.push(node.path.as_str());
                    }
                });
                dirs
            })
            .collect();
        self.expanded.retain(|path| known.contains(path.as_str()));
    }
}

impl FileResolver for ProjectTree {
    fn lookup(&self, path: &str) -> Option<FileRef> {
        self.files.contains(path).then(|| DiskFile::shared(path))
    }
}
