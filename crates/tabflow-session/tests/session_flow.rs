//! End-to-end session lifecycle tests exercising the controller through its
//! public surface, with scripted collaborators standing in for the host.

use std::sync::Arc;

use tabflow_core::{FileRef, FileResolver, MemoryStore, RetentionRecord, WorkbenchConfig};
use tabflow_session::testing::{FakeFile, RecordingSink, ScriptedDialog};
use tabflow_session::{CloseDecision, CloseOutcome, DropPosition, SessionController};

struct World {
    controller: SessionController,
    dialog: Arc<ScriptedDialog>,
    sink: Arc<RecordingSink>,
    store: Arc<MemoryStore>,
}

fn world() -> World {
    let dialog = Arc::new(ScriptedDialog::new());
    let sink = Arc::new(RecordingSink::new());
    let store = Arc::new(MemoryStore::new());
    let controller = SessionController::new(
        WorkbenchConfig::default(),
        dialog.clone(),
        sink.clone(),
        store.clone(),
    );
    World {
        controller,
        dialog,
        sink,
        store,
    }
}

fn open(world: &mut World, path: &str) -> tabflow_core::TabId {
    world
        .controller
        .open(String::new(), Some(FakeFile::shared(path)))
}

fn retained(store: &MemoryStore) -> Vec<String> {
    let record: RetentionRecord =
        serde_json::from_str(&store.get("retained").unwrap()).unwrap();
    record
        .files
        .iter()
        .map(|token| token.as_str().to_string())
        .collect()
}

struct MapResolver(Vec<(String, FileRef)>);

impl MapResolver {
    fn new(paths: &[&str]) -> Self {
        Self(
            paths
                .iter()
                .map(|path| (path.to_string(), FakeFile::with_content(path, "x")))
                .collect(),
        )
    }
}

impl FileResolver for MapResolver {
    fn lookup(&self, path: &str) -> Option<FileRef> {
        self.0
            .iter()
            .find(|(known, _)| known == path)
            .map(|(_, file)| file.clone())
    }
}

#[test]
fn test_strip_is_never_empty() {
    let world = world();
    assert!(!world.controller.strip().is_empty());
}

#[tokio::test]
async fn test_closing_everything_leaves_a_scratch_tab() {
    let mut world = world();
    open(&mut world, "/src/a.rs");
    open(&mut world, "/src/b.rs");

    for _ in 0..5 {
        world.controller.close(Some(0)).await.unwrap();
    }

    assert_eq!(world.controller.strip().len(), 1);
    let current = world.controller.current();
    let tab = world.controller.strip().by_id(current).unwrap();
    assert!(tab.binding.is_scratch());
    assert_eq!(tab.display_name, "untitled.txt");
}

#[tokio::test]
async fn test_orderings_stay_in_sync() {
    let mut world = world();
    let a = open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    let c = open(&mut world, "/src/c.rs");

    world.controller.raise(a);
    world.controller.reorder_tab(c, a, DropPosition::Before);
    world.controller.close(Some(1)).await.unwrap();

    let mut strip_ids = world.controller.strip().ids();
    let mut mru_ids = world.controller.mru().ids().to_vec();
    strip_ids.sort_by_key(|id| *id.as_uuid());
    mru_ids.sort_by_key(|id| *id.as_uuid());
    assert_eq!(strip_ids, mru_ids);
    assert!(world.controller.mru().contains(b) || world.controller.mru().contains(c));
}

#[test]
fn test_one_tab_per_path() {
    let mut world = world();
    let resolver = MapResolver::new(&["/src/a.rs", "/src/b.rs"]);

    world.controller.open_existing("/src/a.rs", &resolver).unwrap();
    world.controller.open_existing("/src/b.rs", &resolver).unwrap();
    world.controller.open_existing("/src/a.rs", &resolver).unwrap();
    world.controller.open_existing("/src/a.rs", &resolver).unwrap();

    let opens_of_a = world
        .controller
        .strip()
        .iter()
        .filter(|tab| tab.path() == Some("/src/a.rs"))
        .count();
    assert_eq!(opens_of_a, 1);
    assert_eq!(world.controller.strip().len(), 2);
}

#[tokio::test]
async fn test_cancel_preserves_every_ordering() {
    let mut world = world();
    open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    world.controller.tab_mut(b).unwrap().modified = true;

    let strip_before = world.controller.strip().ids();
    let mru_before = world.controller.mru().ids().to_vec();
    let current_before = world.controller.current();

    // ScriptedDialog with no queued answers resolves to Cancel
    let outcome = world.controller.close(None).await.unwrap();

    assert_eq!(outcome, CloseOutcome::Cancelled);
    assert_eq!(world.controller.strip().ids(), strip_before);
    assert_eq!(world.controller.mru().ids(), mru_before.as_slice());
    assert_eq!(world.controller.current(), current_before);
    assert_eq!(world.dialog.shown_count(), 1);
}

#[tokio::test]
async fn test_save_decision_writes_before_closing() {
    let mut world = world();
    let file = FakeFile::with_content("/src/a.rs", "stale");
    let id = world.controller.open("fresh".to_string(), Some(file.clone()));
    world.controller.tab_mut(id).unwrap().modified = true;
    world.dialog.push_answer(Some(CloseDecision::Save));

    let outcome = world.controller.close(None).await.unwrap();

    assert_eq!(outcome, CloseOutcome::Closed);
    assert_eq!(file.read().unwrap(), "fresh");
    assert!(world.controller.strip().by_id(id).is_none());
}

#[tokio::test]
async fn test_dialog_names_the_tab() {
    let mut world = world();
    let id = open(&mut world, "/deep/nested/module.rs");
    world.controller.tab_mut(id).unwrap().modified = true;
    world.dialog.push_answer(Some(CloseDecision::Discard));

    world.controller.close(None).await.unwrap();

    let messages = world.dialog.shown_messages();
    assert!(messages[0].starts_with("module.rs has been modified."));
}

#[tokio::test]
async fn test_close_rightward_sweep_stops_at_cancel() {
    let mut world = world();
    let keep = open(&mut world, "/src/keep.rs");
    open(&mut world, "/src/one.rs");
    let blocker = open(&mut world, "/src/two.rs");
    open(&mut world, "/src/three.rs");
    world.controller.tab_mut(blocker).unwrap().modified = true;
    world.controller.raise(keep);

    // The modified tab answers Cancel; the sweep must stop there
    world.controller.close_tabs_right(None).await.unwrap();

    let names: Vec<&str> = world
        .controller
        .strip()
        .iter()
        .map(|tab| tab.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["keep.rs", "two.rs", "three.rs"]);
    assert_eq!(world.dialog.shown_count(), 1);
}

#[test]
fn test_mru_cycle_and_release() {
    let mut world = world();
    let a = open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    let c = open(&mut world, "/src/c.rs");
    // Recency: [c, b, a]
    assert_eq!(world.controller.current(), c);

    // One step back lands on the previously-current tab
    let first = world.controller.switch_cyclic(1).unwrap();
    assert_eq!(first.id, b);
    assert!(first.gesture_started);

    // Holding the gesture and stepping again walks deeper
    let second = world.controller.switch_cyclic(1).unwrap();
    assert_eq!(second.id, a);
    assert!(!second.gesture_started);

    // Stack is untouched until release
    assert_eq!(world.controller.mru().ids()[0], c);

    world.controller.end_switch_gesture();
    assert_eq!(world.controller.mru().ids(), [a, c, b]);
    assert_eq!(world.controller.current(), a);
}

#[test]
fn test_quick_double_switch_toggles_two_tabs() {
    let mut world = world();
    open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    let c = open(&mut world, "/src/c.rs");

    // Tap: step once, release
    world.controller.switch_cyclic(1).unwrap();
    world.controller.end_switch_gesture();
    assert_eq!(world.controller.current(), b);

    // Tap again: back to where we started
    world.controller.switch_cyclic(1).unwrap();
    world.controller.end_switch_gesture();
    assert_eq!(world.controller.current(), c);
}

#[test]
fn test_linear_switch_wraps_both_ways() {
    let mut world = world();
    let a = open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    let c = open(&mut world, "/src/c.rs");
    assert_eq!(world.controller.strip().ids(), vec![a, b, c]);

    assert_eq!(world.controller.switch_linear(1), Some(a));
    assert_eq!(world.controller.switch_linear(-1), Some(c));
    assert_eq!(world.controller.switch_linear(-1), Some(b));
    assert_eq!(world.controller.current(), b);
}

#[tokio::test]
async fn test_retention_follows_the_session() {
    let mut world = world();
    open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    world
        .controller
        .open_virtual("{}".to_string(), FakeFile::shared("settings"), "settings.json");

    assert_eq!(retained(&world.store), vec!["/src/a.rs", "/src/b.rs"]);

    let index = world.controller.strip().index_of(b).unwrap();
    world.controller.close(Some(index)).await.unwrap();
    assert_eq!(retained(&world.store), vec!["/src/a.rs"]);

    // Closing the rest clears the record rather than leaving it stale
    world.controller.close(Some(1)).await.unwrap();
    world.controller.close(Some(0)).await.unwrap();
    assert!(retained(&world.store).is_empty());
}

#[test]
fn test_render_reaches_the_sink_after_every_mutation() {
    let mut world = world();
    let baseline = world.sink.render_count();

    let a = open(&mut world, "/src/a.rs");
    let b = open(&mut world, "/src/b.rs");
    world.controller.raise(a);
    world.controller.reorder_tab(a, b, DropPosition::After);
    world.controller.switch_cyclic(1).unwrap();
    world.controller.end_switch_gesture();

    assert!(world.sink.render_count() >= baseline + 6);
    let state = world.sink.last_state().unwrap();
    assert_eq!(state.tabs.len(), 2);
    assert_eq!(state.tabs.iter().filter(|view| view.active).count(), 1);
}

#[test]
fn test_syntax_derivation_from_extension() {
    let mut world = world();
    let rs = open(&mut world, "/src/lib.rs");
    let md = open(&mut world, "/docs/README.md");
    let odd = open(&mut world, "/data/blob.xyz");

    let mode = |id| {
        world
            .controller
            .strip()
            .by_id(id)
            .unwrap()
            .syntax_mode
            .clone()
    };
    assert_eq!(mode(rs).as_deref(), Some("rust"));
    assert_eq!(mode(md).as_deref(), Some("markdown"));
    assert_eq!(mode(odd).as_deref(), Some("plain_text"));
}
