//! Reusable test doubles for the session engine's collaborator seams.
//!
//! Shared between this crate's unit tests and the integration tests; hosts
//! embedding the engine can use them for their own wiring tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;

use tabflow_core::{Error, FileHandle, FileRef, RetainedToken, Result};

use crate::dialog::{CloseDecision, DialogPresenter, DialogRequest};
use crate::render::{RenderSink, RenderState};

/// In-memory file handle with scriptable failure modes.
#[derive(Debug)]
pub struct FakeFile {
    path: String,
    content: Mutex<String>,
    retainable: bool,
    fail_read: bool,
    fail_save: bool,
}

impl FakeFile {
    /// A retainable file with empty content, boxed as a [`FileRef`].
    pub fn shared(path: &str) -> FileRef {
        std::sync::Arc::new(Self::new(path, ""))
    }

    /// A retainable file with the given content.
    pub fn with_content(path: &str, content: &str) -> FileRef {
        std::sync::Arc::new(Self::new(path, content))
    }

    /// A file whose `retain()` yields no token.
    pub fn transient(path: &str) -> FileRef {
        let mut file = Self::new(path, "");
        file.retainable = false;
        std::sync::Arc::new(file)
    }

    /// A file whose reads fail.
    pub fn unreadable(path: &str) -> FileRef {
        let mut file = Self::new(path, "");
        file.fail_read = true;
        std::sync::Arc::new(file)
    }

    /// A file whose saves fail.
    pub fn unsavable(path: &str) -> FileRef {
        let mut file = Self::new(path, "");
        file.fail_save = true;
        std::sync::Arc::new(file)
    }

    fn new(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: Mutex::new(content.to_string()),
            retainable: true,
            fail_read: false,
            fail_save: false,
        }
    }
}

impl FileHandle for FakeFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn read(&self) -> Result<String> {
        if self.fail_read {
            return Err(Error::ReadFailed {
                path: self.path.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self.content.lock().unwrap().clone())
    }

    fn save(&self, content: &str) -> Result<()> {
        if self.fail_save {
            return Err(Error::SaveFailed {
                path: self.path.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        *self.content.lock().unwrap() = content.to_string();
        Ok(())
    }

    fn retain(&self) -> Option<RetainedToken> {
        self.retainable.then(|| RetainedToken::new(self.path.clone()))
    }
}

/// Dialog presenter answering from a scripted queue.
///
/// An empty queue answers Cancel, matching an undismissed dialog.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    answers: Mutex<VecDeque<Option<CloseDecision>>>,
    shown: Mutex<Vec<DialogRequest>>,
}

impl ScriptedDialog {
    /// A presenter with no scripted answers (always Cancel).
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter that will answer with `answers` in order.
    pub fn answering(answers: Vec<Option<CloseDecision>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more answer.
    pub fn push_answer(&self, answer: Option<CloseDecision>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    /// Number of dialogs presented so far.
    pub fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    /// Messages of the dialogs presented so far.
    pub fn shown_messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.message.clone())
            .collect()
    }
}

impl DialogPresenter for ScriptedDialog {
    fn show(&self, request: DialogRequest) -> oneshot::Receiver<Option<CloseDecision>> {
        self.shown.lock().unwrap().push(request);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(None);
        let (sender, receiver) = oneshot::channel();
        // Buffered in the channel; the controller awaits it later
        let _ = sender.send(answer);
        receiver
    }
}

/// Render sink that records every call for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    states: Mutex<Vec<RenderState>>,
    focus_count: AtomicUsize,
    check_count: AtomicUsize,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of renders received.
    pub fn render_count(&self) -> usize {
        self.states.lock().unwrap().len()
    }

    /// The most recent render state, if any.
    pub fn last_state(&self) -> Option<RenderState> {
        self.states.lock().unwrap().last().cloned()
    }

    /// Number of focus requests received.
    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }

    /// Number of file-change checks requested.
    pub fn check_count(&self) -> usize {
        self.check_count.load(Ordering::SeqCst)
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, state: &RenderState) {
        self.states.lock().unwrap().push(state.clone());
    }

    fn focus(&self) {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
    }

    fn check_file(&self) {
        self.check_count.fetch_add(1, Ordering::SeqCst);
    }
}
