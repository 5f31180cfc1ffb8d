use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a whole call rather than a single item
#[derive(Debug, Error)]
pub enum RenameError {
    /// The rename mode configuration is malformed (bad regex, empty pattern, ...)
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The file selection itself is unusable (bad glob, missing directory)
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(String),
}

impl RenameError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why the planner left an item out of execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The computed target is not a legal file name
    InvalidName(String),
    /// Another item in the same plan resolves to the same target
    Collision,
    /// The target is already present on disk
    TargetExists,
    /// The computed target equals the source
    Unchanged,
    /// The source no longer exists or is not a regular file
    SourceMissing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(detail) => write!(f, "invalid name ({})", detail),
            Self::Collision => write!(f, "collision"),
            Self::TargetExists => write!(f, "target exists"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::SourceMissing => write!(f, "source missing"),
        }
    }
}

/// Why the executor could not apply an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FailReason {
    BackupFailed(String),
    Io(String),
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackupFailed(detail) => write!(f, "backup failed: {}", detail),
            Self::Io(detail) => write!(f, "{}", detail),
        }
    }
}
