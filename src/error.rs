use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to load dataset from {path}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("Invalid date '{value}' on line {line}")]
    Parse { line: u64, value: String },
    #[error("Please select at least one country")]
    EmptySelection,
    #[error("Please select both a start and an end date")]
    DegenerateRange,
}

impl DashboardError {
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Recoverable errors halt the pipeline and ask the user for new input;
    /// the rest are fatal for the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::DegenerateRange)
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
