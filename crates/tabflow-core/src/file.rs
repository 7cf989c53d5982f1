//! File collaborator contracts and retention record types.
//!
//! The session engine never touches a filesystem directly; the host supplies
//! [`FileHandle`] implementations and resolves project paths through a
//! [`FileResolver`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Shared handle to a file collaborator.
pub type FileRef = Arc<dyn FileHandle>;

/// Contract for a file that a tab can be bound to.
///
/// Whether a file is real or virtual is carried by the tab's
/// [`FileBinding`](crate::FileBinding) variant, not by a flag on the handle.
pub trait FileHandle: Send + Sync + fmt::Debug {
    /// Full path (or symbolic name) identifying this file.
    fn path(&self) -> &str;

    /// Read the entire file content.
    fn read(&self) -> Result<String>;

    /// Write `content` back to the file.
    fn save(&self, content: &str) -> Result<()>;

    /// Request a durable token for restoring this file after restart.
    ///
    /// Returns `None` when the file cannot be retained (virtual documents,
    /// transient handles).
    fn retain(&self) -> Option<RetainedToken>;
}

/// Resolves a project path to a file handle.
///
/// Used by `open_existing` after the duplicate-tab scan comes up empty.
pub trait FileResolver {
    /// Look up `path`; `None` when the path is not part of the project.
    fn lookup(&self, path: &str) -> Option<FileRef>;
}

/// Durable token identifying a retained file across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetainedToken(String);

impl RetainedToken {
    /// Wrap a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RetainedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered list of retained file tokens, written wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRecord {
    /// Tokens for the currently open, retainable files, in display order.
    pub files: Vec<RetainedToken>,
}

impl RetentionRecord {
    /// Create a record from an ordered token list.
    pub fn new(files: Vec<RetainedToken>) -> Self {
        Self { files }
    }

    /// True when no files are retained.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
