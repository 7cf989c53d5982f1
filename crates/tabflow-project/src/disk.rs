//! On-disk file handles.

use std::fs;

use tracing::debug;

use tabflow_core::{Error, FileHandle, FileRef, RetainedToken, Result};

/// A real file on disk, addressed by path.
///
/// Retention yields the path itself as the token, so a retained session can
/// be reopened by resolving the same paths through the project tree.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: String,
}

impl DiskFile {
    /// Wrap `path` as a shared [`FileRef`].
    pub fn shared(path: impl Into<String>) -> FileRef {
        std::sync::Arc::new(Self { path: path.into() })
    }
}

impl FileHandle for DiskFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn read(&self) -> Result<String> {
        debug!("Reading '{}'", self.path);
        fs::read_to_string(&self.path).map_err(|e| Error::ReadFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, content: &str) -> Result<()> {
        debug!("Writing {} byte(s) to '{}'", content.len(), self.path);
        fs::write(&self.path, content).map_err(|e| Error::SaveFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn retain(&self) -> Option<RetainedToken> {
        Some(RetainedToken::new(self.path.clone()))
    }
}
