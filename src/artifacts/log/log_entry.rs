use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Medium,
    Oneline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub branch: BranchName,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Commit> for LogEntry {
    fn from(commit: &Commit) -> Self {
        LogEntry {
            oid: commit.oid().clone(),
            branch: commit.branch().clone(),
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
        }
    }
}

impl LogEntry {
    pub fn write_to(
        &self,
        writer: &mut (impl Write + ?Sized),
        format: LogFormat,
    ) -> io::Result<()> {
        match format {
            LogFormat::Medium => {
                writeln!(writer, "{}", format!("commit {}", self.oid).yellow())?;
                writeln!(writer, "Branch: {}", self.branch)?;
                writeln!(
                    writer,
                    "Date:   {}",
                    self.timestamp.format("%a %b %-d %H:%M:%S %Y %z")
                )?;
                writeln!(writer)?;
                for message_line in self.message.lines() {
                    writeln!(writer, "    {}", message_line)?;
                }
                writeln!(writer)
            }
            LogFormat::Oneline => writeln!(
                writer,
                "{} {}",
                self.oid.to_short_oid().yellow(),
                self.message.lines().next().unwrap_or("")
            ),
        }
    }
}
