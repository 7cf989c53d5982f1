//! Display-order tab sequence.

use tracing::debug;

use tabflow_core::{Tab, TabId};

/// Where a dragged tab lands relative to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert immediately before the target.
    Before,
    /// Insert immediately after the target.
    After,
}

/// Ordered sequence of all open tabs, in display order.
///
/// Display order is independent from MRU order and changes only via
/// append, remove and explicit reorder. The strip owns the tabs; the MRU
/// stack tracks the same identities separately.
#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
}

impl TabStrip {
    /// Create an empty strip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab to the end of the display order.
    pub fn append(&mut self, tab: Tab) -> TabId {
        let id = tab.id();
        debug!("Appending tab: id={}, name={}", id, tab.display_name);
        self.tabs.push(tab);
        id
    }

    /// Remove the tab at `index`.
    ///
    /// Out-of-range indexes are a silent no-op, returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<Tab> {
        if index >= self.tabs.len() {
            return None;
        }
        Some(self.tabs.remove(index))
    }

    /// Relocate `moving` to sit immediately before/after `target`.
    ///
    /// No-op when the two are the same tab or either is unknown.
    pub fn reorder(&mut self, moving: TabId, target: TabId, position: DropPosition) {
        if moving == target {
            return;
        }
        let Some(from) = self.index_of(moving) else {
            return;
        };
        if self.index_of(target).is_none() {
            return;
        }

        let tab = self.tabs.remove(from);
        // Target index may have shifted after the removal
        let target_index = self
            .index_of(target)
            .expect("target still present after removing the moving tab");
        let insert_at = match position {
            DropPosition::Before => target_index,
            DropPosition::After => target_index + 1,
        };
        debug!(
            "Reordering tab: id={}, to index {} ({:?} target)",
            moving, insert_at, position
        );
        self.tabs.insert(insert_at, tab);
    }

    /// Tab at `(index(id) + shift) mod length`, wrapping negatives.
    ///
    /// Used for linear (non-MRU) switching. Returns `None` when `id` is not
    /// a member; the strip is never empty at call time.
    pub fn neighbor_of(&self, id: TabId, shift: isize) -> Option<TabId> {
        let index = self.index_of(id)? as isize;
        let len = self.tabs.len() as isize;
        let mut shifted = (index + shift) % len;
        if shifted < 0 {
            shifted += len;
        }
        Some(self.tabs[shifted as usize].id())
    }

    /// Display index of a tab.
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    /// Tab at a display index.
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Mutable tab at a display index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    /// Tab by identity.
    pub fn by_id(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    /// Mutable tab by identity.
    pub fn by_id_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id() == id)
    }

    /// First tab bound to `path`, if the file is already open.
    ///
    /// This is the lookup behind the one-tab-per-path invariant.
    pub fn find_by_path(&self, path: &str) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|tab| tab.path() == Some(path))
            .map(|tab| tab.id())
    }

    /// Number of open tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// True when no tabs are open.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Iterate tabs in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    /// Iterate tabs mutably in display order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tab> {
        self.tabs.iter_mut()
    }

    /// Identities in display order.
    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|tab| tab.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabflow_core::Tab;

    fn strip_of(names: &[&str]) -> (TabStrip, Vec<TabId>) {
        let mut strip = TabStrip::new();
        let ids = names
            .iter()
            .map(|name| strip.append(Tab::scratch(*name)))
            .collect();
        (strip, ids)
    }

    #[test]
    fn test_append_preserves_order() {
        let (strip, ids) = strip_of(&["a", "b", "c"]);
        assert_eq!(strip.ids(), ids);
        assert_eq!(strip.len(), 3);
    }

    #[test]
    fn test_remove_at() {
        let (mut strip, ids) = strip_of(&["a", "b", "c"]);
        let removed = strip.remove_at(1).unwrap();
        assert_eq!(removed.id(), ids[1]);
        assert_eq!(strip.ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let (mut strip, _) = strip_of(&["a", "b"]);
        assert!(strip.remove_at(5).is_none());
        assert_eq!(strip.len(), 2);
    }

    #[test]
    fn test_reorder_before() {
        // reorder(T3, T1, before) on [T1, T2, T3] yields [T3, T1, T2]
        let (mut strip, ids) = strip_of(&["t1", "t2", "t3"]);
        strip.reorder(ids[2], ids[0], DropPosition::Before);
        assert_eq!(strip.ids(), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_reorder_after() {
        let (mut strip, ids) = strip_of(&["t1", "t2", "t3"]);
        strip.reorder(ids[0], ids[2], DropPosition::After);
        assert_eq!(strip.ids(), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_reorder_same_tab_is_noop() {
        let (mut strip, ids) = strip_of(&["t1", "t2"]);
        strip.reorder(ids[0], ids[0], DropPosition::After);
        assert_eq!(strip.ids(), vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_reorder_unknown_tab_is_noop() {
        let (mut strip, ids) = strip_of(&["t1", "t2"]);
        strip.reorder(TabId::new(), ids[0], DropPosition::Before);
        strip.reorder(ids[0], TabId::new(), DropPosition::Before);
        assert_eq!(strip.ids(), vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_neighbor_wraps_forward() {
        let (strip, ids) = strip_of(&["a", "b", "c"]);
        assert_eq!(strip.neighbor_of(ids[2], 1), Some(ids[0]));
        assert_eq!(strip.neighbor_of(ids[0], 1), Some(ids[1]));
    }

    #[test]
    fn test_neighbor_wraps_backward() {
        let (strip, ids) = strip_of(&["a", "b", "c"]);
        assert_eq!(strip.neighbor_of(ids[0], -1), Some(ids[2]));
        assert_eq!(strip.neighbor_of(ids[1], -2), Some(ids[2]));
    }

    #[test]
    fn test_neighbor_large_shift() {
        let (strip, ids) = strip_of(&["a", "b", "c"]);
        assert_eq!(strip.neighbor_of(ids[0], 7), Some(ids[1]));
        assert_eq!(strip.neighbor_of(ids[0], -7), Some(ids[2]));
    }

    #[test]
    fn test_find_by_path_scratch_excluded() {
        let (strip, _) = strip_of(&["a"]);
        assert_eq!(strip.find_by_path("/anything"), None);
    }
}
