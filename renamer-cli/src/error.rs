use thiserror::Error;

/// Command-line usage the parser cannot reject by itself
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("no rename mode given")]
    MissingMode,

    #[error("--output json needs --yes or --dry-run")]
    JsonNeedsApproval,
}
