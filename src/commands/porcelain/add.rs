use crate::areas::repository::Repository;
use crate::errors::{VcsError, VcsResult};
use std::path::{Path, PathBuf};
use tracing::info;

impl Repository {
    /// Stage a path for the next commit
    ///
    /// The file does not need to exist yet: an unreadable staged path surfaces
    /// when committing.
    pub fn add(&self, path: impl AsRef<Path>) -> VcsResult<PathBuf> {
        let path = self.resolve_path(path)?;
        let mut metadata = self.load_metadata()?;

        if !metadata.stage(path.clone()) {
            return Err(VcsError::AlreadyExists(format!(
                "staged path {}",
                path.display()
            )));
        }

        self.save_metadata(&mut metadata)?;

        info!(path = %path.display(), "staged");
        Ok(path)
    }
}
