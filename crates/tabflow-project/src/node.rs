//! Recursive directory walk producing a sorted file tree.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use tabflow_core::Result;

/// One node of a walked directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsNode {
    /// Final path component.
    pub name: String,
    /// Full path, as handed to file handles and the path index.
    pub path: String,
    /// Whether this node is a directory.
    pub is_dir: bool,
    /// Child nodes, directories first, each group sorted by name.
    pub children: Vec<FsNode>,
}

impl FsNode {
    /// Walk `root` recursively.
    ///
    /// Hidden directories (leading dot) are skipped entirely. Entries that
    /// fail to stat are logged and dropped rather than failing the walk.
    pub fn walk(root: &Path) -> Result<FsNode> {
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        let path = root.to_string_lossy().into_owned();

        let mut node = FsNode {
            name,
            path,
            is_dir: true,
            children: Vec::new(),
        };
        node.read_children(root)?;
        Ok(node)
    }

    fn read_children(&mut self, dir: &Path) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under '{}': {}", self.path, e);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let is_dir = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    warn!("Skipping '{}': {}", path.display(), e);
                    continue;
                }
            };

            if is_dir && name.starts_with('.') {
                debug!("Skipping hidden directory '{}'", path.display());
                continue;
            }

            let mut child = FsNode {
                name,
                path: path.to_string_lossy().into_owned(),
                is_dir,
                children: Vec::new(),
            };
            if is_dir {
                child.read_children(&path)?;
            }
            self.children.push(child);
        }

        // Directories ahead of files, each group alphabetical
        self.children.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(())
    }

    /// Visit every node in the tree, depth-first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a FsNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Paths of every file (non-directory) in the tree.
    pub fn file_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        self.visit(&mut |node| {
            if !node.is_dir {
                paths.push(node.path.as_str());
            }
        });
        paths
    }
}
