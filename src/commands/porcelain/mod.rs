//! User-facing repository operations
//!
//! Each module adds one group of methods to [`crate::areas::repository::Repository`].
//!
//! ## Commands
//!
//! - `init`: Create the storage directory and the initial metadata
//! - `add` / `remove`: Stage and unstage paths
//! - `commit`: Record the staged set as a new commit
//! - `status`: Added, changed, deleted and untracked paths
//! - `log`: History from HEAD
//! - `branch`: Create, remove and list branches
//! - `checkout`: Rebuild the working tree from a revision
//! - `merge`: Replay another history over the working tree
//! - `reset`: Restore one file from history
//! - `clean`: Delete everything that is not staged

pub mod add;
pub mod branch;
pub mod checkout;
pub mod clean;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remove;
pub mod reset;
pub mod status;
