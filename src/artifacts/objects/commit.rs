//! Commit object
//!
//! A commit records the full set of tracked paths (the snapshot) but only
//! carries content for the paths that changed relative to its parent. The
//! content of every other snapshot path lives in the nearest ancestor that
//! changed it.
//!
//! ## Format
//!
//! On disk (big-endian, see [`crate::artifacts::objects::object`]):
//! ```text
//! "VCSC" <version>
//! <oid> <branch> <parent or ""> <generation:u64> <secs:i64> <nanos:u32> <message>
//! <snapshot count> <path>...
//! <blob count> (<path> <len:u64> <bytes>)...
//! ```
//!
//! ## Identity
//!
//! The object ID is a SHA-1 digest over the parent ID, the branch name, the
//! message, every snapshot path and every `(path, content)` pair in path
//! order, each field prefixed by its length and each list by its count. The
//! timestamp is not part of the identity: the same change
//! committed twice on top of the same parent yields the same commit.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::{Packable, RecordRead, RecordWrite, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

const COMMIT_SIGNATURE: &[u8; 4] = b"VCSC";

/// Slim representation of a commit
///
/// Contains only what ancestry walks need: identity, parent and generation.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parent: Option<ObjectId>,
    /// 1 for a root commit, parent's generation + 1 otherwise
    pub generation: u64,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    branch: BranchName,
    parent: Option<ObjectId>,
    generation: u64,
    timestamp: DateTime<Utc>,
    message: String,
    /// Every path tracked as of this commit
    snapshot: BTreeSet<PathBuf>,
    /// Content of the paths changed relative to the parent
    blobs: BTreeMap<PathBuf, Bytes>,
}

impl Commit {
    pub fn new(
        parent: Option<&Commit>,
        branch: BranchName,
        message: String,
        timestamp: DateTime<Utc>,
        snapshot: BTreeSet<PathBuf>,
        blobs: BTreeMap<PathBuf, Bytes>,
    ) -> Self {
        let generation = parent.map_or(1, |parent| parent.generation + 1);
        let parent = parent.map(|parent| parent.oid.clone());
        let oid = Self::digest(parent.as_ref(), &branch, &message, &snapshot, &blobs);

        Commit {
            oid,
            branch,
            parent,
            generation,
            timestamp,
            message,
            snapshot,
            blobs,
        }
    }

    pub fn digest(
        parent: Option<&ObjectId>,
        branch: &BranchName,
        message: &str,
        snapshot: &BTreeSet<PathBuf>,
        blobs: &BTreeMap<PathBuf, Bytes>,
    ) -> ObjectId {
        fn update_field(hasher: &mut Sha1, field: &[u8]) {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }

        let mut hasher = Sha1::new();
        update_field(&mut hasher, parent.map_or("", |oid| oid.as_ref()).as_bytes());
        update_field(&mut hasher, branch.as_ref().as_bytes());
        update_field(&mut hasher, message.as_bytes());

        hasher.update((snapshot.len() as u64).to_be_bytes());
        for path in snapshot {
            update_field(&mut hasher, path.to_string_lossy().as_bytes());
        }

        hasher.update((blobs.len() as u64).to_be_bytes());
        for (path, data) in blobs {
            update_field(&mut hasher, path.to_string_lossy().as_bytes());
            update_field(&mut hasher, data);
        }

        ObjectId::from_digest(&hasher.finalize())
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn snapshot(&self) -> &BTreeSet<PathBuf> {
        &self.snapshot
    }

    pub fn blobs(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.blobs
    }

    pub fn blob(&self, path: &Path) -> Option<&Bytes> {
        self.blobs.get(path)
    }

    pub fn changed_paths(&self) -> impl Iterator<Item = &Path> {
        self.blobs.keys().map(PathBuf::as_path)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.oid.clone(),
            parent: self.parent.clone(),
            generation: self.generation,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> io::Result<Bytes> {
        let mut content = Vec::new();

        content.write_header(COMMIT_SIGNATURE)?;
        content.write_str(self.oid.as_ref())?;
        content.write_str(self.branch.as_ref())?;
        content.write_str(self.parent.as_ref().map_or("", |oid| oid.as_ref()))?;
        content.write_u64::<BigEndian>(self.generation)?;
        content.write_i64::<BigEndian>(self.timestamp.timestamp())?;
        content.write_u32::<BigEndian>(self.timestamp.timestamp_subsec_nanos())?;
        content.write_str(&self.message)?;

        content.write_count(self.snapshot.len())?;
        for path in &self.snapshot {
            content.write_path(path)?;
        }

        content.write_count(self.blobs.len())?;
        for (path, data) in &self.blobs {
            content.write_path(path)?;
            content.write_blob(data)?;
        }

        Ok(content.into())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        fn corrupt(message: String) -> io::Error {
            io::Error::new(io::ErrorKind::InvalidData, message)
        }

        reader.read_header(COMMIT_SIGNATURE)?;

        let oid = ObjectId::try_parse(reader.read_str()?).map_err(|e| corrupt(e.to_string()))?;
        let branch =
            BranchName::try_parse(reader.read_str()?).map_err(|e| corrupt(e.to_string()))?;
        let parent = match reader.read_str()? {
            parent if parent.is_empty() => None,
            parent => Some(ObjectId::try_parse(parent).map_err(|e| corrupt(e.to_string()))?),
        };
        let generation = reader.read_u64::<BigEndian>()?;
        let seconds = reader.read_i64::<BigEndian>()?;
        let nanos = reader.read_u32::<BigEndian>()?;
        let timestamp = DateTime::from_timestamp(seconds, nanos)
            .ok_or_else(|| corrupt(format!("invalid commit timestamp {seconds}.{nanos}")))?;
        let message = reader.read_str()?;

        let snapshot = (0..reader.read_count()?)
            .map(|_| reader.read_path())
            .collect::<io::Result<BTreeSet<_>>>()?;

        let blobs = (0..reader.read_count()?)
            .map(|_| -> io::Result<(PathBuf, Bytes)> {
                Ok((reader.read_path()?, reader.read_blob()?))
            })
            .collect::<io::Result<BTreeMap<_, _>>>()?;

        reader.expect_end()?;

        let digest = Self::digest(parent.as_ref(), &branch, &message, &snapshot, &blobs);
        if digest != oid {
            return Err(corrupt(format!(
                "commit {} does not match its content (digest {})",
                oid, digest
            )));
        }

        Ok(Commit {
            oid,
            branch,
            parent,
            generation,
            timestamp,
            message,
            snapshot,
            blobs,
        })
    }
}
