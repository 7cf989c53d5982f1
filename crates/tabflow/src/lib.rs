//! # tabflow
//!
//! Embedding facade for the tabflow editor session engine.
//!
//! ## Overview
//!
//! A host (an editor shell) builds a [`Workbench`] from its own dialog,
//! render and storage collaborators, then drives it with [`Command`]s over a
//! [`CommandBus`]:
//! - Tab lifecycle (open, close with save confirmation, close-to-the-right)
//! - Two orderings: display order and most-recently-used cycling
//! - Project roots resolved to on-disk files
//! - Retention of open files across restarts
//!
//! ## Architecture
//!
//! This is Layer 2 - the embedding surface that ties together:
//! - tabflow-core: Core types, configuration, collaborator traits
//! - tabflow-session: Tab strip, MRU stack, session controller
//! - tabflow-project: Directory trees and disk file handles

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod workbench;

pub use command::{Command, CommandBus};
pub use workbench::Workbench;

// The full engine surface, re-exported for hosts
pub use tabflow_core::{
    Error, FileBinding, FileHandle, FileRef, FileResolver, MemoryStore, RetainedToken,
    Result, RetentionRecord, RetentionStore, Tab, TabId, WorkbenchConfig,
};
pub use tabflow_project::{DiskFile, FsNode, ProjectTree};
pub use tabflow_session::{
    CloseDecision, CloseOutcome, DialogPresenter, DialogRequest, DropPosition, MruStack,
    RenderSink, RenderState, SessionController, SwitchOutcome, TabStrip, TabView,
};

/// Initialize tracing from `RUST_LOG`, defaulting to `info`.
///
/// Hosts embedding the engine in a larger process should configure their own
/// subscriber instead.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
