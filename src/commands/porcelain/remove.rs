use crate::areas::repository::Repository;
use crate::errors::{VcsError, VcsResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl Repository {
    /// Unstage a path and delete it from the working tree
    pub fn remove(&self, path: impl AsRef<Path>) -> VcsResult<PathBuf> {
        let path = self.resolve_path(path)?;
        let mut metadata = self.load_metadata()?;

        if !metadata.unstage(&path) {
            return Err(VcsError::NotFound(format!("staged path {}", path.display())));
        }

        if !self.workspace().remove_file(&path)? {
            warn!(path = %path.display(), "unstaged file was already missing from disk");
        }
        self.save_metadata(&mut metadata)?;

        info!(path = %path.display(), "removed");
        Ok(path)
    }
}
