//! A single-user, local version-control engine
//!
//! A [`Repository`] tracks a working directory, stages files, records
//! immutable commits linked into branch histories, rebuilds any past state,
//! merges branches and restores individual files. Everything it persists lives
//! in the `.vcs` directory at the repository root.
//!
//! ```no_run
//! use vcs::{KeepLocal, Repository};
//!
//! # fn main() -> vcs::VcsResult<()> {
//! let repository = Repository::new("/tmp/project")?;
//! repository.init()?;
//! repository.add("a.txt")?;
//! repository.commit("m1")?;
//! repository.new_branch("test")?;
//! repository.checkout("master")?;
//! repository.merge("test", KeepLocal)?;
//! # Ok(())
//! # }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use artifacts::branch::branch_name::BranchName;
pub use artifacts::log::log_entry::{LogEntry, LogFormat};
pub use artifacts::merge::conflict_policy::{ConflictPolicy, KeepLocal, TakeIncoming};
pub use artifacts::merge::merge_report::MergeReport;
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::status::status_info::Status;
pub use errors::{VcsError, VcsResult};
