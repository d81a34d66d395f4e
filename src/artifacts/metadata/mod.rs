//! Repository-wide mutable state
//!
//! - `repository_metadata`: current branch, branch heads, HEAD and the staged path set

pub mod repository_metadata;
