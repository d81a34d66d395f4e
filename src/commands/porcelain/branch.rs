use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{VcsError, VcsResult};
use tracing::info;

impl Repository {
    /// Create a branch at the current head and switch to it
    ///
    /// The working tree and the staged set are left untouched.
    pub fn new_branch(&self, name: &str) -> VcsResult<BranchName> {
        let name = BranchName::try_parse(name.to_string())?;
        if name.is_head() {
            return Err(VcsError::InvalidOperation(format!(
                "{} is not a valid branch name",
                name
            )));
        }

        let mut metadata = self.load_metadata()?;
        if metadata.has_branch(&name) {
            return Err(VcsError::AlreadyExists(format!("branch {}", name)));
        }

        metadata.create_branch(name.clone());
        self.save_metadata(&mut metadata)?;

        info!(branch = %name, head = ?metadata.head().map(|oid| oid.to_short_oid()), "created branch");
        Ok(name)
    }

    pub fn remove_branch(&self, name: &str) -> VcsResult<()> {
        let mut metadata = self.load_metadata()?;

        if metadata.current_branch().as_ref() == name {
            return Err(VcsError::InvalidOperation(format!(
                "cannot remove the current branch {}, check out another branch first",
                name
            )));
        }

        let name = BranchName::try_parse(name.to_string())
            .map_err(|_| VcsError::NotFound(format!("branch {}", name)))?;
        if metadata.delete_branch(&name).is_none() {
            return Err(VcsError::NotFound(format!("branch {}", name)));
        }

        self.save_metadata(&mut metadata)?;

        info!(branch = %name, "removed branch");
        Ok(())
    }

    pub fn branch(&self) -> VcsResult<BranchName> {
        Ok(self.load_metadata()?.current_branch().clone())
    }

    /// All branch names in order
    pub fn branches(&self) -> VcsResult<Vec<BranchName>> {
        Ok(self.load_metadata()?.branch_heads().keys().cloned().collect())
    }
}
