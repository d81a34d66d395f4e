//! Error taxonomy of the core engine
//!
//! Every fallible core operation returns [`VcsResult`]. Conditions a caller is
//! expected to handle (a missing branch, an already staged path) get their own
//! variants; failures of the backing storage and of the working tree carry the
//! underlying [`std::io::Error`] as their source.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    /// A repository, branch or staged path is already present.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A commit, branch, revision or staged path could not be found.
    #[error("{0} not found")]
    NotFound(String),

    /// The metadata record or a commit record could not be read or written.
    #[error("store failure: {context}")]
    Store {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A working-tree file could not be read or written.
    #[error("unable to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The commit graph violates an invariant (e.g. two histories without a shared root).
    #[error("inconsistent history: {0}")]
    Consistency(String),

    /// The operation is not allowed in the current state.
    #[error("{0}")]
    InvalidOperation(String),
}

impl VcsError {
    pub fn store(context: impl Into<String>, source: std::io::Error) -> Self {
        VcsError::Store {
            context: context.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VcsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type VcsResult<T> = Result<T, VcsError>;
