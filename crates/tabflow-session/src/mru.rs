//! Most-recently-used tab ordering and the held-switch gesture.

use tracing::debug;

use tabflow_core::TabId;

/// Recency ordering over the same tab identities the strip holds.
///
/// Front of the stack is the most recently activated tab. During a held
/// "switch" gesture, [`step_cyclic`](MruStack::step_cyclic) walks a
/// transient offset through the stack without reordering it; the landed tab
/// is promoted exactly once, on release, by [`commit`](MruStack::commit).
#[derive(Debug, Default)]
pub struct MruStack {
    stack: Vec<TabId>,
    offset: usize,
    gesture_active: bool,
}

impl MruStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `id` to the front, inserting it if absent.
    ///
    /// Called on every deliberate activation.
    pub fn promote(&mut self, id: TabId) {
        self.stack.retain(|member| *member != id);
        self.stack.insert(0, id);
    }

    /// Drop `id` from the stack (tab closed).
    pub fn remove(&mut self, id: TabId) {
        self.stack.retain(|member| *member != id);
        if self.offset >= self.stack.len() {
            self.offset = 0;
        }
    }

    /// Step the transient gesture offset by `delta` and return the tab there.
    ///
    /// The first step after idle/commit begins a gesture (offset reset to
    /// zero first). Steps wrap modulo the stack length, negatives wrapping
    /// from the far end. The stack order itself is not touched.
    pub fn step_cyclic(&mut self, delta: isize) -> Option<TabId> {
        if self.stack.is_empty() {
            return None;
        }
        if !self.gesture_active {
            debug!("Switch gesture started");
            self.gesture_active = true;
            self.offset = 0;
        }
        let len = self.stack.len() as isize;
        let mut offset = (self.offset as isize + delta) % len;
        if offset < 0 {
            offset += len;
        }
        self.offset = offset as usize;
        Some(self.stack[self.offset])
    }

    /// End the gesture: promote the landed tab once and reset the offset.
    ///
    /// `tab` overrides the default (the tab at the current offset). Returns
    /// the promoted tab, or `None` when the stack is empty. Safe to call
    /// when no gesture is active; a single release listener therefore needs
    /// no further deduplication.
    pub fn commit(&mut self, tab: Option<TabId>) -> Option<TabId> {
        let raised = tab.or_else(|| self.stack.get(self.offset).copied())?;
        debug!("Switch gesture committed: id={}", raised);
        self.promote(raised);
        self.offset = 0;
        self.gesture_active = false;
        Some(raised)
    }

    /// True while a switch gesture is being held.
    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Identities in recency order, most recent first.
    pub fn ids(&self) -> &[TabId] {
        &self.stack
    }

    /// Number of tracked tabs.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when no tabs are tracked.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// True when `id` is a member.
    pub fn contains(&self, id: TabId) -> bool {
        self.stack.contains(&id)
    }
}
