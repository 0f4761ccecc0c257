use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("diff error: {0}")]
    Diff(#[from] triad_diff::DiffError),
}

pub type ReportResult<T> = Result<T, ReportError>;
