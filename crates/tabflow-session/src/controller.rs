//! Session orchestration across the display and recency orderings.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use tabflow_core::{
    FileBinding, FileRef, FileResolver, Result, RetentionStore, Tab, TabId, WorkbenchConfig,
};

use crate::dialog::{CloseDecision, DialogPresenter, DialogRequest};
use crate::mru::MruStack;
use crate::render::{RenderSink, RenderState, TabView};
use crate::retention::RetentionPersister;
use crate::strip::{DropPosition, TabStrip};

/// How a close request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed.
    Closed,
    /// The user cancelled; nothing changed.
    Cancelled,
    /// Invalid index, or a close was already pending for the tab.
    Skipped,
}

/// Result of one MRU cycling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchOutcome {
    /// The tab now showing.
    pub id: TabId,
    /// True when this step began a new gesture; the host binds its
    /// modifier-release watcher exactly once, on this signal.
    pub gesture_started: bool,
}

/// Orchestrates open/close/raise/switch across the tab strip and MRU stack.
///
/// One controller instance per editor window owns all session state; command
/// handlers receive it by reference. Every mutation ends in a re-render,
/// which in turn regenerates the retention record.
pub struct SessionController {
    config: WorkbenchConfig,
    strip: TabStrip,
    mru: MruStack,
    current: TabId,
    /// Tabs with a confirmation dialog pending; re-entrant closes are
    /// rejected at entry.
    closing: HashSet<TabId>,
    dialogs: Arc<dyn DialogPresenter>,
    sink: Arc<dyn RenderSink>,
    store: Arc<dyn RetentionStore>,
    persister: RetentionPersister,
}

impl SessionController {
    /// Create a controller with one fresh scratch tab and render it.
    pub fn new(
        config: WorkbenchConfig,
        dialogs: Arc<dyn DialogPresenter>,
        sink: Arc<dyn RenderSink>,
        store: Arc<dyn RetentionStore>,
    ) -> Self {
        let persister = RetentionPersister::new(store.clone(), config.retention.key.clone());
        let mut controller = Self {
            config,
            strip: TabStrip::new(),
            mru: MruStack::new(),
            current: TabId::new(), // replaced before first use
            closing: HashSet::new(),
            dialogs,
            sink,
            store,
            persister,
        };

        let tab = controller.scratch_tab();
        let id = controller.strip.append(tab);
        controller.mru.promote(id);
        controller.current = id;
        controller.render();
        controller
    }

    /// The current tab's identity.
    pub fn current(&self) -> TabId {
        self.current
    }

    /// Display order, read-only.
    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    /// Recency order, read-only.
    pub fn mru(&self) -> &MruStack {
        &self.mru
    }

    /// Mutable access to one tab, for the host's editing surface.
    ///
    /// The host updates `content` and `modified` as the user types and calls
    /// [`render`](Self::render) when the tab bar should reflect it.
    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.strip.by_id_mut(id)
    }

    /// Open `content`, optionally bound to `file`, and raise the tab.
    ///
    /// When a file is given and the current tab is a never-modified scratch
    /// tab, that tab is rebound in place instead of a new one accumulating.
    pub fn open(&mut self, content: String, file: Option<FileRef>) -> TabId {
        let id = match file {
            Some(file) => {
                let reusable = self
                    .strip
                    .by_id(self.current)
                    .map(Tab::is_reusable_blank)
                    .unwrap_or(false);
                if reusable {
                    info!("Reusing blank tab for '{}'", file.path());
                    let tab = self
                        .strip
                        .by_id_mut(self.current)
                        .expect("current tab is a strip member");
                    tab.set_content(content);
                    tab.bind_file(file);
                    tab.syntax_mode = None;
                    tab.syntax_pinned = false;
                    self.current
                } else {
                    info!("Opening '{}' in a new tab", file.path());
                    let id = self.strip.append(Tab::from_file(content, file));
                    self.mru.promote(id);
                    id
                }
            }
            None => {
                debug!("Opening new scratch tab");
                let mut tab = self.scratch_tab();
                tab.content = content;
                let id = self.strip.append(tab);
                self.mru.promote(id);
                id
            }
        };

        self.apply_syntax(id);
        self.raise(id);
        id
    }

    /// Open a path, reusing the already-open tab when there is one.
    ///
    /// Returns `Ok(None)` for paths the resolver does not know. A read
    /// failure surfaces as `Err` and no tab is created.
    pub fn open_existing(
        &mut self,
        path: &str,
        resolver: &dyn FileResolver,
    ) -> Result<Option<TabId>> {
        if let Some(id) = self.strip.find_by_path(path) {
            debug!("'{}' already open, raising", path);
            self.raise(id);
            return Ok(Some(id));
        }

        let Some(file) = resolver.lookup(path) else {
            debug!("'{}' not found in project", path);
            return Ok(None);
        };
        let content = file.read()?;
        Ok(Some(self.open(content, Some(file))))
    }

    /// Open a generated (virtual) document; excluded from retention.
    pub fn open_virtual(
        &mut self,
        content: String,
        file: FileRef,
        display_name: &str,
    ) -> TabId {
        info!("Opening virtual document '{}'", display_name);
        let id = self
            .strip
            .append(Tab::virtual_doc(content, file, display_name));
        self.mru.promote(id);
        self.apply_syntax(id);
        self.raise(id);
        id
    }

    /// Close the tab at `index` (default: the current tab).
    ///
    /// Unmodified tabs close immediately. Modified tabs prompt
    /// {Save / Don't save / Cancel}; Save proceeds only once the save
    /// collaborator reports success, Cancel leaves every ordering untouched.
    pub async fn close(&mut self, index: Option<usize>) -> Result<CloseOutcome> {
        let index = match index {
            Some(index) => index,
            None => self.strip.index_of(self.current).unwrap_or(0),
        };
        let Some(tab) = self.strip.get(index) else {
            debug!("Close ignored: no tab at index {}", index);
            return Ok(CloseOutcome::Skipped);
        };
        let id = tab.id();

        if self.closing.contains(&id) {
            warn!("Close ignored: confirmation already pending for {}", id);
            return Ok(CloseOutcome::Skipped);
        }

        if tab.modified {
            let request = DialogRequest::unsaved_changes(&tab.display_name);
            self.closing.insert(id);
            let receiver = self.dialogs.show(request);
            // Dropped sender reads as Cancel
            let decision = receiver.await.unwrap_or(None);
            self.closing.remove(&id);

            match decision {
                Some(CloseDecision::Save) => {
                    let Some(tab) = self.strip.by_id_mut(id) else {
                        return Ok(CloseOutcome::Skipped);
                    };
                    tab.save()?;
                }
                Some(CloseDecision::Discard) => {}
                None => {
                    info!("Close cancelled for {}", id);
                    return Ok(CloseOutcome::Cancelled);
                }
            }
        }

        // The index may have shifted while the dialog was pending
        let Some(index) = self.strip.index_of(id) else {
            return Ok(CloseOutcome::Skipped);
        };
        self.remove_tab(index, id);
        Ok(CloseOutcome::Closed)
    }

    /// Close every tab to the right of `from` (default: the current tab),
    /// strictly one at a time so confirmation dialogs never overlap.
    ///
    /// A cancelled close aborts the remainder.
    pub async fn close_tabs_right(&mut self, from: Option<usize>) -> Result<()> {
        let anchor = match from {
            Some(index) => index,
            None => self.strip.index_of(self.current).unwrap_or(0),
        };

        while self.strip.len() > anchor + 1 {
            match self.close(Some(anchor + 1)).await? {
                CloseOutcome::Closed => {}
                CloseOutcome::Cancelled | CloseOutcome::Skipped => break,
            }
        }
        Ok(())
    }

    /// Make `id` current: promote, re-render, focus, file-change check.
    pub fn raise(&mut self, id: TabId) {
        if self.strip.by_id(id).is_none() {
            debug!("Raise ignored: {} is not open", id);
            return;
        }
        self.mru.promote(id);
        self.activate(id, true);
    }

    /// Same as [`raise`](Self::raise) without moving input focus.
    ///
    /// Used for background/preview activation.
    pub fn raise_blurred(&mut self, id: TabId) {
        if self.strip.by_id(id).is_none() {
            return;
        }
        self.mru.promote(id);
        self.activate(id, false);
    }

    /// Raise by display index; out-of-range is a no-op.
    pub fn raise_by_index(&mut self, index: usize) {
        if let Some(tab) = self.strip.get(index) {
            let id = tab.id();
            self.raise(id);
        }
    }

    /// One step of MRU cycling while the switch gesture is held.
    ///
    /// Activates the tab at the new offset WITHOUT promoting it; promotion
    /// happens once, on [`end_switch_gesture`](Self::end_switch_gesture).
    pub fn switch_cyclic(&mut self, delta: isize) -> Option<SwitchOutcome> {
        let gesture_started = !self.mru.gesture_active();
        let id = self.mru.step_cyclic(delta)?;
        self.activate(id, true);
        Some(SwitchOutcome {
            id,
            gesture_started,
        })
    }

    /// Commit the held gesture: promote the landed tab exactly once.
    pub fn end_switch_gesture(&mut self) {
        if !self.mru.gesture_active() {
            return;
        }
        self.mru.commit(None);
        self.render();
    }

    /// Switch to the linear neighbor `shift` positions away.
    ///
    /// Linear switching is a deliberate choice, so unlike MRU cycling it
    /// promotes the target immediately.
    pub fn switch_linear(&mut self, shift: isize) -> Option<TabId> {
        let id = self.strip.neighbor_of(self.current, shift)?;
        self.raise(id);
        Some(id)
    }

    /// Drag-reorder: move `moving` before/after `target` in display order.
    pub fn reorder_tab(&mut self, moving: TabId, target: TabId, position: DropPosition) {
        self.strip.reorder(moving, target, position);
        self.render();
    }

    /// Pin the current tab to an explicit syntax mode.
    pub fn set_syntax(&mut self, mode: &str) {
        if let Some(tab) = self.strip.by_id_mut(self.current) {
            tab.syntax_mode = Some(mode.to_string());
            tab.syntax_pinned = true;
        }
        self.render();
        self.sink.focus();
    }

    /// Swap in a fresh configuration and re-derive every tab's syntax.
    ///
    /// Handler for restart-init.
    pub fn reload_config(&mut self, config: WorkbenchConfig) {
        self.persister = RetentionPersister::new(self.store.clone(), config.retention.key.clone());
        self.config = config;
        let ids = self.strip.ids();
        for id in ids {
            self.rederive_syntax(id);
        }
        self.render();
    }

    /// Rebuild the render state, notify the sink, then persist retention.
    pub fn render(&mut self) {
        let current = self.current;
        let tabs = self
            .strip
            .iter_mut()
            .enumerate()
            .map(|(index, tab)| TabView {
                id: tab.id(),
                index,
                title: tab.display_name.clone(),
                modified: tab.modified,
                active: tab.id() == current,
                animation: tab.take_animation(),
            })
            .collect();
        let state = RenderState {
            tabs,
            mru: self.mru.ids().to_vec(),
        };
        self.sink.render(&state);
        self.persister.persist(&self.strip);
    }

    fn scratch_tab(&self) -> Tab {
        Tab::scratch(&self.config.session.default_tab_name)
    }

    fn activate(&mut self, id: TabId, focus: bool) {
        self.current = id;
        self.render();
        if focus {
            self.sink.focus();
        }
        self.sink.check_file();
    }

    /// Remove a tab and restore the invariants: strip never empty, current
    /// always a member.
    fn remove_tab(&mut self, index: usize, id: TabId) {
        let was_current = id == self.current;
        self.mru.remove(id);
        self.strip.remove_at(index);
        info!("Closed tab {}", id);

        if self.strip.is_empty() {
            let tab = self.scratch_tab();
            let fresh = self.strip.append(tab);
            self.raise(fresh);
            return;
        }

        if was_current {
            let next = index.saturating_sub(1);
            let next_id = self
                .strip
                .get(next)
                .expect("strip is non-empty")
                .id();
            self.raise(next_id);
        } else {
            // Current is unchanged; re-render without stealing focus
            self.render();
        }
    }

    /// Derive a tab's syntax mode: a pinned mode wins, virtual documents
    /// are javascript, real files go through the extension table.
    fn apply_syntax(&mut self, id: TabId) {
        let Some(tab) = self.strip.by_id(id) else {
            return;
        };
        if tab.syntax_mode.is_some() {
            return;
        }
        self.derive_syntax(id);
    }

    /// Re-derive after a configuration change; pinned modes are kept.
    fn rederive_syntax(&mut self, id: TabId) {
        let Some(tab) = self.strip.by_id(id) else {
            return;
        };
        if tab.syntax_pinned {
            return;
        }
        self.derive_syntax(id);
    }

    fn derive_syntax(&mut self, id: TabId) {
        let Some(tab) = self.strip.by_id(id) else {
            return;
        };
        let resolved = match &tab.binding {
            FileBinding::Scratch => None,
            FileBinding::Virtual(_) => Some("javascript".to_string()),
            FileBinding::Real(file) => {
                let extension = file.path().rsplit('.').next().unwrap_or("");
                Some(
                    self.config
                        .syntax
                        .mode_for_extension(extension)
                        .unwrap_or(&self.config.syntax.fallback)
                        .to_string(),
                )
            }
        };
        if let Some(mode) = resolved {
            if let Some(tab) = self.strip.by_id_mut(id) {
                tab.syntax_mode = Some(mode);
            }
        }
    }
}
