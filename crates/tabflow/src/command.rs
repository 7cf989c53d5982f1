//! The command surface hosts drive the workbench through.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::warn;

use tabflow_core::TabId;
use tabflow_session::DropPosition;

/// One host-originated command.
///
/// Indices are display-order positions; `None` targets the current tab.
/// Commands referencing tabs or indices that no longer exist are no-ops by
/// the time they are dispatched.
#[derive(Debug, Clone)]
pub enum Command {
    /// Open a project file by path, reusing an existing tab for it.
    OpenFile {
        /// Path as indexed by the project tree.
        path: String,
    },
    /// Open an empty scratch tab.
    NewTab,
    /// Close one tab, with confirmation when it has unsaved changes.
    CloseTab {
        /// Display index; `None` closes the current tab.
        index: Option<usize>,
    },
    /// Close every tab to the right of one tab, left to right.
    CloseTabsRight {
        /// Anchor index; `None` anchors on the current tab.
        index: Option<usize>,
    },
    /// Make the tab at a display index current.
    RaiseTab {
        /// Display index.
        index: usize,
    },
    /// Step through tabs in recency order while the switch gesture is held.
    ChangeTab {
        /// Steps to move; negative walks toward more recent.
        delta: isize,
    },
    /// Switch to a display-order neighbor.
    ChangeTabLinear {
        /// Positions to move; wraps at either end.
        shift: isize,
    },
    /// The switch gesture was released; commit the landed tab.
    EndSwitchGesture,
    /// Drop one tab before or after another.
    ReorderTab {
        /// Tab being dragged.
        moving: TabId,
        /// Tab it was dropped on.
        target: TabId,
        /// Side of the target.
        position: DropPosition,
    },
    /// Force a render pass.
    Render,
    /// First-run initialization.
    Startup,
    /// Re-initialize after a configuration change.
    Restart,
    /// Set the current tab's syntax mode explicitly.
    SetSyntax {
        /// Mode name, e.g. `rust`.
        mode: String,
    },
    /// Add a directory as a project root.
    AddDirectory {
        /// Directory to walk.
        path: PathBuf,
    },
    /// Remove every project root.
    RemoveAllDirectories,
    /// Re-walk all project roots.
    RefreshTree,
    /// Toggle a project directory's expansion state.
    ToggleDirectory {
        /// Directory path within the tree.
        path: String,
    },
}

/// Fire-and-forget sender half of the command channel.
#[derive(Debug, Clone)]
pub struct CommandBus {
    sender: mpsc::UnboundedSender<Command>,
}

impl CommandBus {
    /// Create a bus and the receiver the workbench drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Queue a command; dropped silently if the workbench is gone.
    pub fn fire(&self, command: Command) {
        if self.sender.send(command).is_err() {
            warn!("Command dropped: workbench receiver is closed");
        }
    }
}
