//! # tabflow-session
//!
//! Tab/session lifecycle and ordering engine for the tabflow workbench.
//!
//! This crate provides:
//! - Display-order tab sequence with drag reordering ([`TabStrip`])
//! - Most-recently-used ordering with held-gesture cycling ([`MruStack`])
//! - Open/close/raise/switch orchestration ([`SessionController`])
//! - Durable retention of open files ([`RetentionPersister`])
//! - Collaborator contracts for dialogs and rendering
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends only on tabflow-core.
//! The controller owns both orderings as instance state; there is no
//! module-global session state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod dialog;
pub mod mru;
pub mod render;
pub mod retention;
pub mod strip;
pub mod testing;

// Re-export commonly used types
pub use controller::{CloseOutcome, SessionController, SwitchOutcome};
pub use dialog::{CloseDecision, DialogChoice, DialogPresenter, DialogRequest};
pub use mru::MruStack;
pub use render::{RenderSink, RenderState, TabView};
pub use retention::RetentionPersister;
pub use strip::{DropPosition, TabStrip};
