//! Commit identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Commit records are
//! stored in `.vcs/objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{VcsError, VcsResult};
use std::path::PathBuf;

/// Minimum number of hex digits accepted as an abbreviated object ID
pub const MIN_PREFIX_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full object ID
    pub fn try_parse(id: impl Into<String>) -> VcsResult<Self> {
        let id = id.into();

        if Self::is_full_oid(&id) {
            Ok(Self(id.to_ascii_lowercase()))
        } else {
            Err(VcsError::NotFound(format!("commit {}", id)))
        }
    }

    /// Build an object ID from raw digest bytes
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    pub fn is_full_oid(id: &str) -> bool {
        id.len() == OBJECT_ID_LENGTH && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn looks_like_prefix(id: &str) -> bool {
        (MIN_PREFIX_LENGTH..=OBJECT_ID_LENGTH).contains(&id.len())
            && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Splits the hash as `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
