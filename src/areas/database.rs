use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcsError, VcsResult};
use bytes::Bytes;
use fake::rand;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> VcsResult<Commit> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(VcsError::NotFound(format!("commit {}", object_id)));
        }

        let content = self.read_object(&object_path)?;
        let commit = Commit::deserialize(Cursor::new(content))
            .map_err(|e| VcsError::store(format!("corrupt commit record {}", object_id), e))?;

        // the record is named after its digest, a mismatch means it was moved or overwritten
        if commit.oid() != object_id {
            return Err(VcsError::store(
                format!("commit record {} holds commit {}", object_id, commit.oid()),
                io::Error::from(io::ErrorKind::InvalidData),
            ));
        }

        Ok(commit)
    }

    /// Store a commit unless a record with the same identity is already present
    pub fn store(&self, commit: &Commit) -> VcsResult<()> {
        let object_path = self.path.join(commit.oid().to_path());

        if object_path.exists() {
            debug!(oid = %commit.oid(), "commit already stored");
            return Ok(());
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            VcsError::store(
                format!("invalid object path {}", object_path.display()),
                io::Error::from(io::ErrorKind::InvalidInput),
            )
        })?;
        std::fs::create_dir_all(object_dir).map_err(|e| {
            VcsError::store(
                format!("unable to create object directory {}", object_dir.display()),
                e,
            )
        })?;

        let content = commit
            .serialize()
            .map_err(|e| VcsError::store(format!("unable to encode commit {}", commit.oid()), e))?;
        self.write_object(object_dir, &object_path, content)?;

        debug!(oid = %commit.oid(), path = %object_path.display(), "stored commit");
        Ok(())
    }

    /// All stored object IDs starting with the given hex prefix, in order
    pub fn find_objects_by_prefix(&self, prefix: &str) -> VcsResult<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 {
            return Ok(Vec::new());
        }

        let (dir_prefix, file_prefix) = prefix.split_at(2);
        let object_dir = self.path.join(dir_prefix);
        if !object_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&object_dir).map_err(|e| {
            VcsError::store(
                format!("unable to list object directory {}", object_dir.display()),
                e,
            )
        })?;

        let mut object_ids = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|file_name| file_name.starts_with(file_prefix))
            .filter_map(|file_name| ObjectId::try_parse(format!("{dir_prefix}{file_name}")).ok())
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    /// Walk first-parent history starting at `start`, newest first
    pub fn ancestors(&self, start: Option<ObjectId>) -> Ancestors<'_> {
        Ancestors {
            database: self,
            next: start,
        }
    }

    fn read_object(&self, object_path: &Path) -> VcsResult<Bytes> {
        std::fs::read(object_path)
            .map(Bytes::from)
            .map_err(|e| {
                VcsError::store(
                    format!("unable to read object file {}", object_path.display()),
                    e,
                )
            })
    }

    fn write_object(&self, object_dir: &Path, object_path: &Path, content: Bytes) -> VcsResult<()> {
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(|e| {
                VcsError::store(
                    format!("unable to open object file {}", temp_object_path.display()),
                    e,
                )
            })?;

        file.write_all(&content)
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                VcsError::store(
                    format!("unable to write object file {}", temp_object_path.display()),
                    e,
                )
            })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_object_path);
            VcsError::store(
                format!("unable to rename object file to {}", object_path.display()),
                e,
            )
        })
    }

    fn generate_temp_name() -> PathBuf {
        PathBuf::from(format!("tmp-obj-{}", rand::random::<u32>()))
    }
}

/// Iterator over a first-parent chain of commits
pub struct Ancestors<'d> {
    database: &'d Database,
    next: Option<ObjectId>,
}

impl Iterator for Ancestors<'_> {
    type Item = VcsResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        match self.database.load(&oid) {
            Ok(commit) => {
                self.next = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(VcsError::NotFound(what)) => Some(Err(VcsError::Consistency(format!(
                "{} is referenced in history but missing from the store",
                what
            )))),
            Err(e) => Some(Err(e)),
        }
    }
}
