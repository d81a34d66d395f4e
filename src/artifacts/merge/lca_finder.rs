//! Lowest common ancestor search for merge operations
//!
//! Every commit has at most one parent, so the history reachable from a commit
//! is a chain and two chains that share a root join at exactly one commit.
//!
//! ## Algorithm
//!
//! Two cursors start at the source and target commits. While they differ, the
//! cursor with the larger generation number moves to its parent; on equal
//! generations both move. Generations strictly decrease along a chain, so the
//! cursors meet at the deepest commit both chains contain.
//!
//! Generation numbers are recorded when a commit is created and do not depend
//! on wall-clock time, so clock skew between commits cannot mislead the search.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut finder = LcaFinder::new(|oid| database.load(oid).map(|commit| commit.slim()));
//! let base = finder.find_lowest_common_ancestor(&head, &other)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcsError, VcsResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

pub struct LcaFinder<CommitLoaderFn>
where
    CommitLoaderFn: FnMut(&ObjectId) -> VcsResult<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
    loaded: HashMap<ObjectId, SlimCommit>,
}

impl<CommitLoaderFn> LcaFinder<CommitLoaderFn>
where
    CommitLoaderFn: FnMut(&ObjectId) -> VcsResult<SlimCommit>,
{
    /// Creates a finder over the commits returned by `commit_loader`
    ///
    /// The loader is called at most once per commit.
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            loaded: HashMap::new(),
        }
    }

    /// Finds the nearest commit reachable from both `source` and `target`
    ///
    /// Fails with [`VcsError::Consistency`] when the two histories do not share
    /// a root.
    pub fn find_lowest_common_ancestor(
        &mut self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> VcsResult<ObjectId> {
        let mut source = self.load(source)?;
        let mut target = self.load(target)?;

        while source.oid != target.oid {
            debug!(
                source = %source.oid.to_short_oid(),
                source_generation = source.generation,
                target = %target.oid.to_short_oid(),
                target_generation = target.generation,
                "advancing ancestor search"
            );

            match source.generation.cmp(&target.generation) {
                Ordering::Greater => source = self.parent_of(&source)?,
                Ordering::Less => target = self.parent_of(&target)?,
                Ordering::Equal => {
                    source = self.parent_of(&source)?;
                    target = self.parent_of(&target)?;
                }
            }
        }

        debug!(ancestor = %source.oid, "found lowest common ancestor");
        Ok(source.oid)
    }

    fn parent_of(&mut self, commit: &SlimCommit) -> VcsResult<SlimCommit> {
        match &commit.parent {
            Some(parent) => self.load(parent),
            None => Err(VcsError::Consistency(format!(
                "reached root commit {} without finding a common ancestor",
                commit.oid.to_short_oid()
            ))),
        }
    }

    fn load(&mut self, oid: &ObjectId) -> VcsResult<SlimCommit> {
        if let Some(commit) = self.loaded.get(oid) {
            return Ok(commit.clone());
        }

        let commit = (self.commit_loader)(oid)?;
        self.loaded.insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}
