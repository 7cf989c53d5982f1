//! Tab identity and data model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::{FileRef, RetainedToken};
use crate::{Error, Result};

/// Unique identifier for an editing tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    /// Create a new random tab ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a tab's buffer is bound to.
///
/// Replaces flag-based virtual/real file discrimination with a tagged
/// variant so every consumer matches exhaustively.
#[derive(Debug, Clone)]
pub enum FileBinding {
    /// No file bound; excluded from retention.
    Scratch,
    /// A real project file; the only binding that yields retention tokens.
    Real(FileRef),
    /// A generated document (settings, defaults); excluded from retention.
    Virtual(FileRef),
}

impl FileBinding {
    /// The bound file handle, if any.
    pub fn file(&self) -> Option<&FileRef> {
        match self {
            FileBinding::Scratch => None,
            FileBinding::Real(file) | FileBinding::Virtual(file) => Some(file),
        }
    }

    /// True for tabs with no bound file.
    pub fn is_scratch(&self) -> bool {
        matches!(self, FileBinding::Scratch)
    }

    /// Retention token for this binding; only real files are retainable.
    pub fn retain(&self) -> Option<RetainedToken> {
        match self {
            FileBinding::Real(file) => file.retain(),
            FileBinding::Scratch | FileBinding::Virtual(_) => None,
        }
    }
}

/// One-shot styling hint consumed by the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    /// Tab was just created.
    Enter,
}

/// An open editing buffer.
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    /// Buffer content.
    pub content: String,
    /// What the buffer is bound to.
    pub binding: FileBinding,
    /// Unsaved-changes flag.
    pub modified: bool,
    /// Syntax mode currently in effect, when one has been assigned.
    pub syntax_mode: Option<String>,
    /// True when `syntax_mode` was chosen explicitly; pinned modes survive
    /// re-derivation on restart.
    pub syntax_pinned: bool,
    /// Name shown on the tab.
    pub display_name: String,
    animation: Option<Animation>,
}

impl Tab {
    /// Create a scratch tab with the given display name.
    pub fn scratch(display_name: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            content: String::new(),
            binding: FileBinding::Scratch,
            modified: false,
            syntax_mode: None,
            syntax_pinned: false,
            display_name: display_name.into(),
            animation: Some(Animation::Enter),
        }
    }

    /// Create a tab bound to a real file.
    pub fn from_file(content: String, file: FileRef) -> Self {
        let display_name = basename(file.path()).to_string();
        Self {
            id: TabId::new(),
            content,
            binding: FileBinding::Real(file),
            modified: false,
            syntax_mode: None,
            syntax_pinned: false,
            display_name,
            animation: Some(Animation::Enter),
        }
    }

    /// Create a tab over a virtual (generated) document.
    pub fn virtual_doc(content: String, file: FileRef, display_name: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            content,
            binding: FileBinding::Virtual(file),
            modified: false,
            syntax_mode: None,
            syntax_pinned: false,
            display_name: display_name.into(),
            animation: Some(Animation::Enter),
        }
    }

    /// Get the tab ID.
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Replace the buffer content and clear the modified flag.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.modified = false;
    }

    /// Bind a real file to this tab, updating the display name.
    ///
    /// Used by the reuse-blank-tab rule when a file is opened into a fresh
    /// scratch tab.
    pub fn bind_file(&mut self, file: FileRef) {
        self.display_name = basename(file.path()).to_string();
        self.binding = FileBinding::Real(file);
        self.modified = false;
    }

    /// Save the buffer through the bound file handle.
    ///
    /// Clears the modified flag only when the collaborator reports success.
    pub fn save(&mut self) -> Result<()> {
        let file = match &self.binding {
            FileBinding::Scratch => return Err(Error::NoFileBound),
            FileBinding::Real(file) | FileBinding::Virtual(file) => file.clone(),
        };
        file.save(&self.content)?;
        self.modified = false;
        Ok(())
    }

    /// Path of the bound file, if any.
    pub fn path(&self) -> Option<&str> {
        self.binding.file().map(|f| f.path())
    }

    /// Take the pending animation hint, leaving none.
    pub fn take_animation(&mut self) -> Option<Animation> {
        self.animation.take()
    }

    /// True for a fresh scratch tab that open-into-blank may reuse.
    pub fn is_reusable_blank(&self) -> bool {
        self.binding.is_scratch() && !self.modified
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
