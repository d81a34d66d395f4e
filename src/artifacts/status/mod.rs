//! Working tree status
//!
//! - `file_change`: Change kinds and their labels
//! - `status_info`: The four path sets reported by `status`

pub mod file_change;
pub mod status_info;
