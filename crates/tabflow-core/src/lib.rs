//! # tabflow-core
//!
//! Core types for the tabflow editor session engine.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other tabflow crates. It provides:
//!
//! - Tab identity and data model (TabId, Tab, FileBinding)
//! - Collaborator contracts (FileHandle, FileResolver, RetentionStore)
//! - Retention record types
//! - Workbench configuration
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other tabflow crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod error;
pub mod file;
pub mod storage;
pub mod tab;

// Re-export commonly used types
pub use config::{RetentionSettings, SessionSettings, SyntaxMode, SyntaxSettings, WorkbenchConfig};
pub use error::{Error, Result};
pub use file::{FileHandle, FileRef, FileResolver, RetainedToken, RetentionRecord};
pub use storage::{MemoryStore, RetentionStore};
pub use tab::{Animation, FileBinding, Tab, TabId};
