use crate::errors::{VcsError, VcsResult};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use filetime::FileTime;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// The working tree rooted at the repository directory
///
/// Every traversal prunes the private storage directory. Unreadable entries
/// are skipped with a warning instead of aborting the walk.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    storage_path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>, storage_path: Box<Path>) -> Self {
        Workspace { path, storage_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tracked paths present on disk and modified strictly after `since`
    pub fn updated(&self, since: DateTime<Utc>, tracked: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        self.files()
            .filter(|entry| tracked.contains(entry.path()))
            .filter(|entry| match entry.metadata().map(|m| m.modified()) {
                Ok(Ok(modified)) => DateTime::<Utc>::from(modified) > since,
                _ => {
                    warn!(path = %entry.path().display(), "unable to read modification time");
                    false
                }
            })
            .map(DirEntry::into_path)
            .collect()
    }

    /// Tracked paths missing from disk
    pub fn deleted(&self, tracked: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        tracked
            .iter()
            .filter(|path| !path.exists())
            .cloned()
            .collect()
    }

    /// Files on disk that are not tracked
    pub fn untracked(&self, tracked: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        self.files()
            .filter(|entry| !tracked.contains(entry.path()))
            .map(DirEntry::into_path)
            .collect()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        file_path.is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> VcsResult<Bytes> {
        std::fs::read(file_path)
            .map(Bytes::from)
            .map_err(|e| VcsError::io(file_path, e))
    }

    /// Write a file, creating missing parent directories
    ///
    /// The modification time is stamped explicitly so that a write is always
    /// observable by [`Workspace::updated`], even on file systems with coarse clocks.
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> VcsResult<()> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VcsError::io(parent, e))?;
        }

        if file_path.is_dir() {
            std::fs::remove_dir_all(file_path).map_err(|e| VcsError::io(file_path, e))?;
        }

        std::fs::write(file_path, data).map_err(|e| VcsError::io(file_path, e))?;
        filetime::set_file_mtime(file_path, FileTime::now())
            .map_err(|e| VcsError::io(file_path, e))?;

        debug!(path = %file_path.display(), bytes = data.len(), "wrote file");
        Ok(())
    }

    pub fn set_mtime(&self, file_path: &Path, timestamp: DateTime<Utc>) -> VcsResult<()> {
        filetime::set_file_mtime(file_path, FileTime::from_system_time(timestamp.into()))
            .map_err(|e| VcsError::io(file_path, e))
    }

    /// Remove a file, returning `false` if it was already gone
    pub fn remove_file(&self, file_path: &Path) -> VcsResult<bool> {
        match std::fs::remove_file(file_path) {
            Ok(()) => {
                debug!(path = %file_path.display(), "removed file");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VcsError::io(file_path, e)),
        }
    }

    /// Delete every file not in `keep`, then every directory left empty
    pub fn clear(&self, keep: &BTreeSet<PathBuf>) -> VcsResult<()> {
        let entries = self.entries().collect::<Vec<_>>();

        for entry in entries.iter().filter(|entry| !entry.file_type().is_dir()) {
            if !keep.contains(entry.path()) {
                self.remove_file(entry.path())?;
            }
        }

        // remove directories in reverse order so children go before their parents
        for entry in entries.iter().rev().filter(|entry| entry.file_type().is_dir()) {
            let dir_path = entry.path();
            let is_empty = std::fs::read_dir(dir_path)
                .map_err(|e| VcsError::io(dir_path, e))?
                .next()
                .is_none();

            if is_empty {
                std::fs::remove_dir(dir_path).map_err(|e| VcsError::io(dir_path, e))?;
                debug!(path = %dir_path.display(), "removed empty directory");
            }
        }

        Ok(())
    }

    fn files(&self) -> impl Iterator<Item = DirEntry> + '_ {
        self.entries().filter(|entry| entry.file_type().is_file())
    }

    /// Pre-order walk below the root, without the root and the storage directory
    fn entries(&self) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.path() != self.storage_path.as_ref())
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
    }
}
