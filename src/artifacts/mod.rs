//! Version control data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `core`: Shared utilities (pager wrapper)
//! - `log`: History entries
//! - `merge`: Common ancestor search and conflict policies
//! - `metadata`: The repository metadata record
//! - `objects`: Commit records and their identifiers
//! - `status`: Working tree status

pub mod branch;
pub mod core;
pub mod log;
pub mod merge;
pub mod metadata;
pub mod objects;
pub mod status;
