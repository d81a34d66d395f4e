use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{VcsError, VcsResult};
use fake::rand;
use file_guard::Lock;
use std::io::{Cursor, Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The metadata record at `.vcs/info`
///
/// Reads hold a shared lock on the record while it is read. A save encodes the
/// record into a sibling temp file and renames it over the old one while
/// holding an exclusive lock, so a reader never observes a half-written record.
#[derive(Debug)]
pub struct MetadataStore {
    path: Box<Path>,
}

impl MetadataStore {
    pub fn new(path: Box<Path>) -> Self {
        MetadataStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> VcsResult<RepositoryMetadata> {
        let mut file = std::fs::File::open(&self.path).map_err(|e| {
            VcsError::store(
                format!("not a repository (missing {})", self.path.display()),
                e,
            )
        })?;

        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)
            .map_err(|e| VcsError::store("unable to lock repository metadata", e))?;

        let mut content = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut content)
            .map_err(|e| VcsError::store("unable to read repository metadata", e))?;

        RepositoryMetadata::deserialize(Cursor::new(content))
            .map_err(|e| VcsError::store("corrupt repository metadata", e))
    }

    /// Persist the record, re-deriving the current branch pointer from HEAD first
    pub fn save(&self, metadata: &mut RepositoryMetadata) -> VcsResult<()> {
        metadata.sync_current_branch();

        let content = metadata
            .serialize()
            .map_err(|e| VcsError::store("unable to encode repository metadata", e))?;

        let temp_path = self.temp_path();
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| {
                VcsError::store(
                    format!("unable to open metadata file {}", temp_path.display()),
                    e,
                )
            })?;
        temp_file
            .write_all(&content)
            .and_then(|_| temp_file.sync_all())
            .map_err(|e| {
                let _ = std::fs::remove_file(&temp_path);
                VcsError::store(
                    format!("unable to write metadata file {}", temp_path.display()),
                    e,
                )
            })?;

        self.replace_with(&temp_path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp_path);
        })?;

        debug!(
            branch = %metadata.current_branch(),
            head = ?metadata.head().map(|oid| oid.to_short_oid()),
            staged = metadata.staged().len(),
            "saved repository metadata"
        );
        Ok(())
    }

    fn replace_with(&self, temp_path: &Path) -> VcsResult<()> {
        let rename = || {
            std::fs::rename(temp_path, &self.path).map_err(|e| {
                VcsError::store(
                    format!("unable to replace metadata file {}", self.path.display()),
                    e,
                )
            })
        };

        if !self.exists() {
            return rename();
        }

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| VcsError::store("unable to open repository metadata", e))?;
        let _lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)
            .map_err(|e| VcsError::store("unable to lock repository metadata", e))?;

        rename()
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.path
            .with_file_name(format!("{}.tmp-{}", file_name, rand::random::<u32>()))
    }
}
