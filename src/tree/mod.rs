//! Directory tree walking logic
//!
//! - `traversal`: the depth-first primitive with a skip-subtree signal
//! - `TreeWalker`: applies exclusion/inclusion rules and transcribes files

mod traversal;
mod walker;

// Re-export public types
pub use traversal::{Node, NodeKind, ROOT_RELATIVE, Visitor, WalkControl, walk_depth_first};
pub use walker::{TreeWalker, WalkStats};
