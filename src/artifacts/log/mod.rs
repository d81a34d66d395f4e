//! Commit history as shown by `log`
//!
//! - `log_entry`: One commit of the first-parent history and its rendering

pub mod log_entry;
