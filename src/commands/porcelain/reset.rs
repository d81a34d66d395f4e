use crate::areas::repository::Repository;
use crate::errors::VcsResult;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Restore a file to its content as of HEAD
    ///
    /// Returns `false` when no commit in the history holds content for the path.
    pub fn reset(&self, path: impl AsRef<Path>) -> VcsResult<bool> {
        let path = self.resolve_path(path)?;
        let metadata = self.load_metadata()?;

        let Some(head) = self.head_commit(&metadata)? else {
            return Ok(false);
        };
        let Some(owner) = self.find_content_owner(&head, &path)? else {
            info!(path = %path.display(), "nothing to reset");
            return Ok(false);
        };

        if let Some(data) = owner.blob(&path) {
            self.workspace().write_file(&path, data)?;
            self.workspace().set_mtime(&path, head.timestamp())?;
        }

        info!(path = %path.display(), from = %owner.oid().to_short_oid(), "reset file");
        Ok(true)
    }
}
