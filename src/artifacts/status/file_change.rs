use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileChangeType {
    /// Staged but absent from the head snapshot
    Added,
    /// Tracked by head and modified since the head commit
    Changed,
    /// Tracked by head and missing from disk
    Deleted,
    /// Present on disk but not staged
    Untracked,
}

impl From<&FileChangeType> for &str {
    fn from(change: &FileChangeType) -> Self {
        match change {
            FileChangeType::Added => "A",
            FileChangeType::Changed => "M",
            FileChangeType::Deleted => "D",
            FileChangeType::Untracked => "??",
        }
    }
}

impl FileChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            FileChangeType::Added => "new file:   ",
            FileChangeType::Changed => "modified:   ",
            FileChangeType::Deleted => "deleted:    ",
            FileChangeType::Untracked => "untracked:  ",
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let colored_str = match self {
            FileChangeType::Added => self.label().green(),
            FileChangeType::Changed | FileChangeType::Deleted => self.label().red(),
            FileChangeType::Untracked => self.label().normal(),
        };

        write!(f, "{}", colored_str)
    }
}
