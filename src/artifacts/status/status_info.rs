use crate::artifacts::status::file_change::FileChangeType;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;

/// Working tree status relative to HEAD and the staged set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub added: FileSet,
    pub changed: FileSet,
    pub deleted: FileSet,
    pub untracked: FileSet,
}

impl Status {
    pub fn is_clean(&self) -> bool {
        self.added.is_empty()
            && self.changed.is_empty()
            && self.deleted.is_empty()
            && self.untracked.is_empty()
    }

    /// Every reported path with its change kind, grouped by kind and in path order
    pub fn changes(&self) -> impl Iterator<Item = (FileChangeType, &Path)> {
        fn tagged(
            change: FileChangeType,
            files: &FileSet,
        ) -> impl Iterator<Item = (FileChangeType, &Path)> {
            files.iter().map(move |file| (change, file.as_path()))
        }

        tagged(FileChangeType::Added, &self.added)
            .chain(tagged(FileChangeType::Changed, &self.changed))
            .chain(tagged(FileChangeType::Deleted, &self.deleted))
            .chain(tagged(FileChangeType::Untracked, &self.untracked))
    }
}
