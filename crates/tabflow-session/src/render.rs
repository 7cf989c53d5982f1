//! Render target contract and the state handed to it.

use tabflow_core::{Animation, TabId};

/// Snapshot of everything the tab bar needs to draw itself.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    /// Tabs in display order.
    pub tabs: Vec<TabView>,
    /// Identities in recency order, for MRU-derived styling hints.
    pub mru: Vec<TabId>,
}

/// One tab as the renderer sees it.
#[derive(Debug, Clone)]
pub struct TabView {
    /// Tab identity.
    pub id: TabId,
    /// Display index.
    pub index: usize,
    /// Tab label.
    pub title: String,
    /// Unsaved-changes marker.
    pub modified: bool,
    /// Whether this is the current tab.
    pub active: bool,
    /// One-shot animation hint, consumed by this render.
    pub animation: Option<Animation>,
}

/// Opaque sink the controller notifies after every state mutation.
pub trait RenderSink: Send + Sync {
    /// Reflect the current tab state.
    fn render(&self, state: &RenderState);

    /// Move input focus to the editing surface.
    fn focus(&self);

    /// Ask the host to re-check the active file for external changes.
    fn check_file(&self);
}
