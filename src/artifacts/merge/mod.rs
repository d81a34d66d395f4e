//! Merge support
//!
//! - `conflict_policy`: How a path changed on both sides is settled
//! - `lca_finder`: Lowest common ancestor search over single-parent histories
//! - `merge_report`: Per-path outcome of a merge

pub mod conflict_policy;
pub mod lca_finder;
pub mod merge_report;
