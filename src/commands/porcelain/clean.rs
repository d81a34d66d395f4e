use crate::areas::repository::Repository;
use crate::errors::VcsResult;
use tracing::info;

impl Repository {
    /// Delete every file that is not staged, along with directories left empty
    pub fn clean(&self) -> VcsResult<()> {
        let metadata = self.load_metadata()?;

        self.workspace().clear(metadata.staged())?;

        info!(kept = metadata.staged().len(), "cleaned working tree");
        Ok(())
    }
}
