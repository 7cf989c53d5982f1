//! Confirmation dialog collaborator contract.
//!
//! Presentation is the host's concern; the engine only describes the ordered
//! choices and awaits a one-shot answer.

use tokio::sync::oneshot;

/// Resolution of an unsaved-changes confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Save the tab, then close it.
    Save,
    /// Close without saving.
    Discard,
}

/// One choice offered by a confirmation dialog.
#[derive(Debug, Clone)]
pub struct DialogChoice {
    /// Button label.
    pub label: String,
    /// Value produced when chosen; `None` is Cancel.
    pub value: Option<CloseDecision>,
    /// Keyboard shortcut.
    pub shortcut: Option<char>,
}

impl DialogChoice {
    /// Build a choice.
    pub fn new(label: &str, value: Option<CloseDecision>, shortcut: char) -> Self {
        Self {
            label: label.to_string(),
            value,
            shortcut: Some(shortcut),
        }
    }
}

/// A confirmation request handed to the host.
#[derive(Debug, Clone)]
pub struct DialogRequest {
    /// Message shown to the user.
    pub message: String,
    /// Ordered choices.
    pub choices: Vec<DialogChoice>,
}

impl DialogRequest {
    /// The standard three-way unsaved-changes prompt for `display_name`.
    pub fn unsaved_changes(display_name: &str) -> Self {
        Self {
            message: format!(
                "{display_name} has been modified.\nDo you want to save changes?"
            ),
            choices: vec![
                DialogChoice::new("Save", Some(CloseDecision::Save), 'y'),
                DialogChoice::new("Don't save", Some(CloseDecision::Discard), 'n'),
                DialogChoice::new("Cancel", None, 'c'),
            ],
        }
    }
}

/// Host-side dialog presenter.
///
/// `show` returns immediately with a one-shot receiver; the host resolves it
/// later on the same logical thread. Sending `None` - or dropping the sender -
/// is Cancel.
pub trait DialogPresenter: Send + Sync {
    /// Present `request` and hand back the completion signal.
    fn show(&self, request: DialogRequest) -> oneshot::Receiver<Option<CloseDecision>>;
}
