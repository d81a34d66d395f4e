use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{FileSet, Status};
use crate::errors::VcsResult;

impl Repository {
    /// Staged paths the head commit does not track
    pub fn added(&self) -> VcsResult<FileSet> {
        let metadata = self.load_metadata()?;
        let head = self.head_commit(&metadata)?;

        Ok(match head {
            Some(head) => metadata
                .staged()
                .difference(head.snapshot())
                .cloned()
                .collect(),
            None => metadata.staged().clone(),
        })
    }

    /// Tracked paths modified since the head commit
    pub fn changed(&self) -> VcsResult<FileSet> {
        let metadata = self.load_metadata()?;

        Ok(match self.head_commit(&metadata)? {
            Some(head) => self.workspace().updated(head.timestamp(), head.snapshot()),
            None => FileSet::new(),
        })
    }

    /// Tracked paths missing from disk
    pub fn deleted(&self) -> VcsResult<FileSet> {
        let metadata = self.load_metadata()?;

        Ok(match self.head_commit(&metadata)? {
            Some(head) => self.workspace().deleted(head.snapshot()),
            None => FileSet::new(),
        })
    }

    /// Files on disk that are not staged
    pub fn untracked(&self) -> VcsResult<FileSet> {
        let metadata = self.load_metadata()?;

        Ok(self.workspace().untracked(metadata.staged()))
    }

    pub fn status(&self) -> VcsResult<Status> {
        let metadata = self.load_metadata()?;
        let head = self.head_commit(&metadata)?;
        let workspace = self.workspace();

        let status = match head {
            Some(head) => Status {
                added: metadata
                    .staged()
                    .difference(head.snapshot())
                    .cloned()
                    .collect(),
                changed: workspace.updated(head.timestamp(), head.snapshot()),
                deleted: workspace.deleted(head.snapshot()),
                untracked: workspace.untracked(metadata.staged()),
            },
            None => Status {
                added: metadata.staged().clone(),
                untracked: workspace.untracked(metadata.staged()),
                ..Status::default()
            },
        };

        Ok(status)
    }
}
