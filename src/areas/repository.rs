use crate::areas::database::Database;
use crate::areas::metadata::MetadataStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{VcsError, VcsResult};
use std::path::{Component, Path, PathBuf};

/// Name of the private storage directory inside the repository root
pub const STORAGE_DIR: &str = ".vcs";
pub const METADATA_FILE: &str = "info";
pub const OBJECTS_DIR: &str = "objects";

#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    metadata: MetadataStore,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    ///
    /// Nothing is read from disk: a repository that was never initialized fails
    /// on its first operation instead.
    pub fn new(path: impl AsRef<Path>) -> VcsResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| VcsError::io(path, e))?;
        }
        let path = path.canonicalize().map_err(|e| VcsError::io(path, e))?;

        let storage_path = path.join(STORAGE_DIR);
        let metadata = MetadataStore::new(storage_path.join(METADATA_FILE).into_boxed_path());
        let database = Database::new(storage_path.join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path(), storage_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            metadata,
            database,
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn storage_path(&self) -> PathBuf {
        self.path.join(STORAGE_DIR)
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata.exists()
    }

    /// Resolve a user-supplied path to the absolute form used as a tracking key
    ///
    /// Relative paths are taken relative to the repository root. The result is
    /// lexically normalized and must lie strictly inside the root and outside
    /// the storage directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> VcsResult<PathBuf> {
        let path = path.as_ref();
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other.as_os_str()),
            }
        }

        if normalized.as_path() == self.path.as_ref() || !normalized.starts_with(&self.path) {
            return Err(VcsError::InvalidOperation(format!(
                "{} is outside the repository at {}",
                path.display(),
                self.path.display()
            )));
        }

        if normalized.starts_with(self.storage_path()) {
            return Err(VcsError::InvalidOperation(format!(
                "{} is inside the repository storage",
                path.display()
            )));
        }

        Ok(normalized)
    }

    pub(crate) fn load_metadata(&self) -> VcsResult<RepositoryMetadata> {
        self.metadata.load()
    }

    pub(crate) fn save_metadata(&self, metadata: &mut RepositoryMetadata) -> VcsResult<()> {
        self.metadata.save(metadata)
    }

    pub(crate) fn head_commit(&self, metadata: &RepositoryMetadata) -> VcsResult<Option<Commit>> {
        metadata
            .head()
            .map(|head| self.database.load(head))
            .transpose()
    }

    /// Where the current content of `file_path` lives, walking back from `start`
    pub(crate) fn find_content_owner(
        &self,
        start: &Commit,
        file_path: &Path,
    ) -> VcsResult<Option<Commit>> {
        if start.blob(file_path).is_some() {
            return Ok(Some(start.clone()));
        }

        for commit in self.database.ancestors(start.parent().cloned()) {
            let commit = commit?;
            if commit.blob(file_path).is_some() {
                return Ok(Some(commit));
            }
        }

        Ok(None)
    }
}
