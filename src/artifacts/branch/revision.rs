use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::metadata::repository_metadata::RepositoryMetadata;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcsError, VcsResult};
use tracing::debug;

/// A user-supplied name for a commit
///
/// Supported forms:
/// - Branch names: `master`, `feature/new-feature`
/// - `HEAD` and its alias `@`
/// - Full object IDs: 40 hexadecimal characters
/// - Abbreviated object IDs: 4 to 39 hexadecimal characters, unique among stored commits
/// - Parent notation: `<revision>^` (e.g. `master^`, `HEAD^`, `abc123^`)
/// - Ancestor notation: `<revision>~<n>` (e.g. `master~3`, `HEAD~5`)
///
/// # Parsing Strategy
///
/// OID-like strings are parsed as `Ref` variants. Resolution prefers a branch
/// with that name and only then falls back to the object store.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A branch, `HEAD`, or potentially an object ID
    Ref(BranchName),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn resolve(
        &self,
        repository: &Repository,
        metadata: &RepositoryMetadata,
    ) -> VcsResult<ObjectId> {
        match self {
            Revision::Ref(name) => Self::resolve_ref(name, repository, metadata),
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(&base_revision.resolve(repository, metadata)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository, metadata)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_ref(
        name: &BranchName,
        repository: &Repository,
        metadata: &RepositoryMetadata,
    ) -> VcsResult<ObjectId> {
        if let Some(head) = metadata.branch_head(name) {
            return head
                .cloned()
                .ok_or_else(|| VcsError::NotFound(format!("commit on branch {}", name)));
        }

        if name.is_head() {
            return metadata
                .head()
                .cloned()
                .ok_or_else(|| VcsError::NotFound("commit at HEAD".to_string()));
        }

        if ObjectId::looks_like_prefix(name.as_ref()) {
            return Self::resolve_oid(name.as_ref(), repository);
        }

        Err(VcsError::NotFound(format!("revision {}", name)))
    }

    fn resolve_commit_parent(oid: &ObjectId, repository: &Repository) -> VcsResult<ObjectId> {
        let commit = repository.database().load(oid)?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| VcsError::NotFound(format!("parent of root commit {}", oid.to_short_oid())))
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> VcsResult<ObjectId> {
        if ObjectId::is_full_oid(oid_str) {
            let oid = ObjectId::try_parse(oid_str)?;
            return if repository.database().exists(&oid) {
                Ok(oid)
            } else {
                Err(VcsError::NotFound(format!("commit {}", oid)))
            };
        }

        let mut matches = repository.database().find_objects_by_prefix(oid_str)?;
        debug!(prefix = oid_str, candidates = matches.len(), "resolving abbreviated id");

        match matches.len() {
            0 => Err(VcsError::NotFound(format!("revision {}", oid_str))),
            1 => Ok(matches.remove(0)),
            _ => {
                let mut error_msg = format!(
                    "short object id {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for oid in &matches {
                    error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                }
                Err(VcsError::InvalidOperation(error_msg))
            }
        }
    }

    /// Parse a revision expression; malformed input is reported as an unknown revision
    pub fn try_parse(revision: &str) -> VcsResult<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .map_err(|e| VcsError::InvalidOperation(format!("invalid parent regex: {e}")))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .map_err(|e| VcsError::InvalidOperation(format!("invalid ancestor regex: {e}")))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .map_err(|_| VcsError::NotFound(format!("revision {}", revision)))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name.to_string())
                .map_err(|_| VcsError::NotFound(format!("revision {}", revision)))?;

            Ok(Revision::Ref(branch_name))
        }
    }
}
