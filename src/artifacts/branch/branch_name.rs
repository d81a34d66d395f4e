use crate::artifacts::branch::{HEAD_REF_NAME, INVALID_BRANCH_NAME_REGEX};
use crate::errors::{VcsError, VcsResult};

pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> VcsResult<Self> {
        if name.is_empty() {
            return Err(VcsError::InvalidOperation(
                "branch name cannot be empty".to_string(),
            ));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX).map_err(|e| {
            VcsError::InvalidOperation(format!("invalid branch name regex: {e}"))
        })?;

        if re.is_match(&name) {
            Err(VcsError::InvalidOperation(format!(
                "invalid branch name: {}",
                name
            )))
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    pub fn is_head(&self) -> bool {
        self.0 == HEAD_REF_NAME
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
