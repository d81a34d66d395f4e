use crate::areas::repository::Repository;
use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::errors::{VcsError, VcsResult};
use std::fs;
use tracing::info;

impl Repository {
    pub fn init(&self) -> VcsResult<()> {
        let storage_path = self.storage_path();
        if storage_path.exists() {
            return Err(VcsError::AlreadyExists(format!(
                "repository at {}",
                self.path().display()
            )));
        }

        fs::create_dir_all(self.database().objects_path()).map_err(|e| {
            VcsError::store(
                format!("unable to create {}", self.database().objects_path().display()),
                e,
            )
        })?;

        let mut metadata = RepositoryMetadata::default();
        self.save_metadata(&mut metadata)?;

        info!(path = %self.path().display(), "initialized repository");
        Ok(())
    }
}
