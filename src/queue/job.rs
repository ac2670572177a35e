use crate::error::StripError;
use crate::stripper::StripReport;
use std::fmt;
use std::path::PathBuf;

/// Process-local job number, assigned at submit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A path waiting for, or undergoing, stripping
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub path: PathBuf,
}

/// Outcome of exactly one job
#[derive(Debug, Clone)]
pub struct JobResult {
    pub id: JobId,
    pub path: PathBuf,
    pub outcome: Result<StripReport, StripError>,
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Get the filename of the input
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
