use crate::areas::repository::Repository;
use crate::artifacts::merge::conflict_policy::ConflictPolicy;
use crate::artifacts::merge::lca_finder::LcaFinder;
use crate::artifacts::merge::merge_report::MergeReport;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcsError, VcsResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Repository {
    /// Merge another history into the current branch
    ///
    /// Commits of `target` newer than the common ancestor are replayed over the
    /// working tree, newest first, and each tracked path of `target` is settled
    /// once: files missing locally are written and staged, files with differing
    /// content are kept or overwritten as `policy` decides. The result is
    /// recorded as an ordinary commit on the current branch.
    pub fn merge(&self, target: &str, mut policy: impl ConflictPolicy) -> VcsResult<MergeReport> {
        let mut metadata = self.load_metadata()?;
        let other_oid = self.resolve_revision(&metadata, target)?;
        let head_oid = metadata.head().cloned().ok_or_else(|| {
            VcsError::InvalidOperation(format!(
                "branch {} has no commits to merge into",
                metadata.current_branch()
            ))
        })?;

        let other = self.database().load(&other_oid)?;
        let base = LcaFinder::new(|oid: &ObjectId| self.database().load(oid).map(|c| c.slim()))
            .find_lowest_common_ancestor(&head_oid, &other_oid)?;
        debug!(head = %head_oid, other = %other_oid, base = %base, "merge base");

        let mut pending = other
            .snapshot()
            .iter()
            .map(PathBuf::as_path)
            .collect::<BTreeSet<&Path>>();
        let mut adopted = BTreeSet::new();
        let mut overwritten = BTreeSet::new();
        let mut kept = BTreeSet::new();

        for commit in self.database().ancestors(Some(other_oid.clone())) {
            let commit = commit?;
            if commit.oid() == &base || pending.is_empty() {
                break;
            }

            for (path, incoming) in commit.blobs() {
                if !pending.remove(path.as_path()) {
                    continue;
                }

                if !path.exists() {
                    self.workspace().write_file(path, incoming)?;
                    metadata.stage(path.clone());
                    adopted.insert(path.clone());
                    continue;
                }

                if self.workspace().read_file(path)? == *incoming {
                    continue;
                }

                if policy.keep_local(path) {
                    kept.insert(path.clone());
                } else {
                    self.workspace().write_file(path, incoming)?;
                    overwritten.insert(path.clone());
                }
            }
        }

        self.save_metadata(&mut metadata)?;

        let message = format!(
            "Merge with revision {} of branch {}",
            other_oid,
            metadata.current_branch()
        );
        let commit = self.commit(&message)?;

        info!(
            commit = %commit,
            base = %base,
            adopted = adopted.len(),
            overwritten = overwritten.len(),
            kept = kept.len(),
            "merged"
        );

        Ok(MergeReport {
            commit,
            base,
            adopted,
            overwritten,
            kept,
        })
    }
}
