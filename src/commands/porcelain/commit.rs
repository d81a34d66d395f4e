use crate::areas::repository::Repository;
use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcsError, VcsResult};
use bytes::Bytes;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{debug, info};

impl Repository {
    pub fn commit(&self, message: &str) -> VcsResult<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            return Err(VcsError::InvalidOperation(
                "commit message cannot be empty".to_string(),
            ));
        }

        let mut metadata = self.load_metadata()?;
        let commit = self.build_commit(&metadata, message)?;

        // the commit record goes first so the metadata never points at a missing commit
        self.database().store(&commit)?;
        metadata.set_head(commit.oid().clone());
        metadata.set_staged(commit.snapshot().clone());
        self.save_metadata(&mut metadata)?;

        info!(
            oid = %commit.oid(),
            branch = %commit.branch(),
            changed = commit.blobs().len(),
            tracked = commit.snapshot().len(),
            "committed"
        );
        Ok(commit.oid().clone())
    }

    fn build_commit(&self, metadata: &RepositoryMetadata, message: &str) -> VcsResult<Commit> {
        // taken before scanning so that edits racing with the commit show up as changes later
        let timestamp = Utc::now();
        let parent = self.head_commit(metadata)?;
        let staged = metadata.staged();

        let (snapshot, changed) = match &parent {
            None => (staged.clone(), staged.clone()),
            Some(parent) => {
                let updated = self
                    .workspace()
                    .updated(parent.timestamp(), parent.snapshot());
                let deleted = self.workspace().deleted(parent.snapshot());
                debug!(updated = ?updated, deleted = ?deleted, "scanned working tree");

                let snapshot = staged.difference(&deleted).cloned().collect::<BTreeSet<_>>();
                let changed = snapshot
                    .iter()
                    .filter(|path| !parent.snapshot().contains(*path) || updated.contains(*path))
                    .cloned()
                    .collect::<BTreeSet<_>>();

                (snapshot, changed)
            }
        };

        let blobs = changed
            .into_iter()
            .map(|path| -> VcsResult<(PathBuf, Bytes)> {
                let data = self.workspace().read_file(&path)?;
                Ok((path, data))
            })
            .collect::<VcsResult<BTreeMap<_, _>>>()?;

        Ok(Commit::new(
            parent.as_ref(),
            metadata.current_branch().clone(),
            message.to_string(),
            timestamp,
            snapshot,
            blobs,
        ))
    }
}
