use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Outcome of merging another history into the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// The merge commit, now at HEAD
    pub commit: ObjectId,
    /// Lowest common ancestor of the two histories
    pub base: ObjectId,
    /// Incoming files that did not exist locally (written and staged)
    pub adopted: BTreeSet<PathBuf>,
    /// Local files replaced by their incoming version
    pub overwritten: BTreeSet<PathBuf>,
    /// Local files kept despite a differing incoming version
    pub kept: BTreeSet<PathBuf>,
}

impl MergeReport {
    /// True when no file was written, kept or adopted
    pub fn is_empty(&self) -> bool {
        self.adopted.is_empty() && self.overwritten.is_empty() && self.kept.is_empty()
    }
}
