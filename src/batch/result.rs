use std::fmt;
use std::path::PathBuf;

pub const REASON_SKIPPED_QUOTA: &str = "skipped due to quota";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Artifact already present and regeneration not forced.
    Skipped(PathBuf),
    Generated(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub script: String,
    pub status: FileStatus,
}

/// Outcome of one batch, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub files: Vec<FileReport>,
    pub quota_exhausted: bool,
    pub interrupted: bool,
}

impl BatchResult {
    pub fn record(&mut self, script: impl Into<String>, status: FileStatus) {
        self.files.push(FileReport {
            script: script.into(),
            status,
        });
    }

    pub fn generated(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Generated(_)))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Skipped(_)))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed(_)))
    }

    pub fn generated_count(&self) -> usize {
        self.generated().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

impl fmt::Display for BatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interrupted {
            writeln!(f, "Audio generation interrupted.")?;
        } else {
            writeln!(f, "Audio generation complete.")?;
        }

        writeln!(f, "Generated {} audio file(s):", self.generated_count())?;
        for report in self.generated() {
            if let FileStatus::Generated(path) = &report.status {
                writeln!(f, "  - {}", path.display())?;
            }
        }

        writeln!(f, "Skipped {} existing file(s):", self.skipped_count())?;
        for report in self.skipped() {
            writeln!(f, "  - {}", report.script)?;
        }

        writeln!(f, "Failed {} file(s):", self.failed_count())?;
        for report in self.failed() {
            if let FileStatus::Failed(reason) = &report.status {
                writeln!(f, "  - {}: {}", report.script, reason)?;
            }
        }

        if self.quota_exhausted {
            writeln!(
                f,
                "ElevenLabs quota exhausted. Add credits to your account and re-run to finish the remaining files."
            )?;
        }
        Ok(())
    }
}
