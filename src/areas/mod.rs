//! Storage areas of a repository
//!
//! - `database`: Commit records under `.vcs/objects`
//! - `metadata`: The metadata record at `.vcs/info`
//! - `repository`: Coordination of the areas and path resolution
//! - `workspace`: Working tree traversal and file I/O

pub mod database;
pub mod metadata;
pub mod repository;
pub mod workspace;
