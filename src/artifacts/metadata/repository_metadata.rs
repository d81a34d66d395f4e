//! Repository metadata record
//!
//! One record per repository, stored at `.vcs/info`:
//! ```text
//! "VCSM" <version>
//! <current branch> <head or "">
//! <branch count> (<name> <head or "">)...
//! <staged count> <path>...
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::{Packable, RecordRead, RecordWrite, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

const METADATA_SIGNATURE: &[u8; 4] = b"VCSM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    current_branch: BranchName,
    /// `None` marks a branch without commits
    branch_heads: BTreeMap<BranchName, Option<ObjectId>>,
    head: Option<ObjectId>,
    staged: BTreeSet<PathBuf>,
}

impl Default for RepositoryMetadata {
    fn default() -> Self {
        let mut metadata = RepositoryMetadata {
            current_branch: BranchName::default_branch(),
            branch_heads: BTreeMap::new(),
            head: None,
            staged: BTreeSet::new(),
        };
        metadata.sync_current_branch();
        metadata
    }
}

impl RepositoryMetadata {
    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    pub fn staged(&self) -> &BTreeSet<PathBuf> {
        &self.staged
    }

    pub fn branch_heads(&self) -> &BTreeMap<BranchName, Option<ObjectId>> {
        &self.branch_heads
    }

    /// Head of the given branch: `None` if the branch does not exist,
    /// `Some(None)` if it exists without commits.
    pub fn branch_head(&self, name: &BranchName) -> Option<Option<&ObjectId>> {
        self.branch_heads.get(name).map(Option::as_ref)
    }

    pub fn has_branch(&self, name: &BranchName) -> bool {
        self.branch_heads.contains_key(name)
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.staged.contains(path)
    }

    pub fn set_head(&mut self, head: ObjectId) {
        self.head = Some(head);
    }

    pub fn set_current_branch(&mut self, branch: BranchName) {
        self.current_branch = branch;
    }

    pub fn set_staged(&mut self, staged: BTreeSet<PathBuf>) {
        self.staged = staged;
    }

    /// Returns `false` if the path was already staged
    pub fn stage(&mut self, path: PathBuf) -> bool {
        self.staged.insert(path)
    }

    /// Returns `false` if the path was not staged
    pub fn unstage(&mut self, path: &Path) -> bool {
        self.staged.remove(path)
    }

    /// Point a new branch at the current head and make it current
    pub fn create_branch(&mut self, name: BranchName) {
        self.branch_heads.insert(name.clone(), self.head.clone());
        self.current_branch = name;
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> Option<Option<ObjectId>> {
        self.branch_heads.remove(name)
    }

    /// Re-derive the current branch pointer from HEAD
    pub fn sync_current_branch(&mut self) {
        self.branch_heads
            .insert(self.current_branch.clone(), self.head.clone());
    }
}

impl Packable for RepositoryMetadata {
    fn serialize(&self) -> io::Result<Bytes> {
        let mut content = Vec::new();

        content.write_header(METADATA_SIGNATURE)?;
        content.write_str(self.current_branch.as_ref())?;
        content.write_str(self.head.as_ref().map_or("", |oid| oid.as_ref()))?;

        content.write_count(self.branch_heads.len())?;
        for (name, head) in &self.branch_heads {
            content.write_str(name.as_ref())?;
            content.write_str(head.as_ref().map_or("", |oid| oid.as_ref()))?;
        }

        content.write_count(self.staged.len())?;
        for path in &self.staged {
            content.write_path(path)?;
        }

        Ok(content.into())
    }
}

impl Unpackable for RepositoryMetadata {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        fn corrupt(message: String) -> io::Error {
            io::Error::new(io::ErrorKind::InvalidData, message)
        }

        fn parse_head(head: String) -> io::Result<Option<ObjectId>> {
            if head.is_empty() {
                return Ok(None);
            }
            ObjectId::try_parse(head)
                .map(Some)
                .map_err(|e| corrupt(e.to_string()))
        }

        reader.read_header(METADATA_SIGNATURE)?;

        let current_branch =
            BranchName::try_parse(reader.read_str()?).map_err(|e| corrupt(e.to_string()))?;
        let head = parse_head(reader.read_str()?)?;

        let branch_heads = (0..reader.read_count()?)
            .map(|_| -> io::Result<(BranchName, Option<ObjectId>)> {
                let name = BranchName::try_parse(reader.read_str()?)
                    .map_err(|e| corrupt(e.to_string()))?;
                Ok((name, parse_head(reader.read_str()?)?))
            })
            .collect::<io::Result<BTreeMap<_, _>>>()?;

        let staged = (0..reader.read_count()?)
            .map(|_| reader.read_path())
            .collect::<io::Result<BTreeSet<_>>>()?;

        reader.expect_end()?;

        Ok(RepositoryMetadata {
            current_branch,
            branch_heads,
            head,
            staged,
        })
    }
}
