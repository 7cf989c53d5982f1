//! Project directory trees and on-disk file handles.
//!
//! Layer 1: depends only on `tabflow-core`. Walks project directories into
//! [`FsNode`] trees, tracks expansion state in a [`ProjectTree`], and resolves
//! tree paths to [`DiskFile`] handles for the session engine to open.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod disk;
pub mod node;
pub mod tree;

pub use disk::DiskFile;
pub use node::FsNode;
pub use tree::ProjectTree;
