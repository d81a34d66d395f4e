use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::errors::VcsResult;

impl Repository {
    /// History from HEAD back to the root commit, newest first
    pub fn log(&self) -> VcsResult<Vec<LogEntry>> {
        let metadata = self.load_metadata()?;

        self.database()
            .ancestors(metadata.head().cloned())
            .map(|commit| commit.map(|commit| LogEntry::from(&commit)))
            .collect()
    }
}
