use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsResult;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl Repository {
    /// Check out a branch or any other revision
    ///
    /// Checking out a commit switches to the branch it was created on and
    /// moves that branch to the commit.
    pub fn checkout(&self, target: &str) -> VcsResult<ObjectId> {
        let metadata = self.load_metadata()?;
        let oid = self.resolve_revision(&metadata, target)?;

        self.checkout_commit(&oid)?;
        Ok(oid)
    }

    /// Rebuild the working tree from a commit and make it HEAD
    pub fn checkout_commit(&self, oid: &ObjectId) -> VcsResult<()> {
        let mut metadata = self.load_metadata()?;
        let target = self.database().load(oid)?;

        self.workspace().clear(&BTreeSet::new())?;
        self.restore_snapshot(&target)?;

        metadata.set_current_branch(target.branch().clone());
        metadata.set_head(oid.clone());
        metadata.set_staged(target.snapshot().clone());
        self.save_metadata(&mut metadata)?;

        info!(oid = %oid, branch = %target.branch(), "checked out");
        Ok(())
    }

    pub(crate) fn resolve_revision(
        &self,
        metadata: &RepositoryMetadata,
        target: &str,
    ) -> VcsResult<ObjectId> {
        Revision::try_parse(target)?.resolve(self, metadata)
    }

    /// Write every snapshot path with the content of the nearest commit that changed it
    fn restore_snapshot(&self, target: &Commit) -> VcsResult<()> {
        let mut pending = target
            .snapshot()
            .iter()
            .map(PathBuf::as_path)
            .collect::<BTreeSet<&Path>>();

        for commit in self.database().ancestors(Some(target.oid().clone())) {
            if pending.is_empty() {
                break;
            }

            let commit = commit?;
            for (path, data) in commit.blobs() {
                if pending.remove(path.as_path()) {
                    self.workspace().write_file(path, data)?;
                    // stamped with the commit time so the restored tree reads as unchanged
                    self.workspace().set_mtime(path, target.timestamp())?;
                }
            }
            debug!(oid = %commit.oid().to_short_oid(), pending = pending.len(), "replayed commit");
        }

        if !pending.is_empty() {
            warn!(
                oid = %target.oid(),
                missing = ?pending,
                "no content found in history for some tracked paths"
            );
        }

        Ok(())
    }
}
