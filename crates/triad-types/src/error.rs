use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("content identifier is empty")]
    EmptyCid,

    #[error("version count must be 2 or 3, got {0}")]
    InvalidVersionCount(usize),
}
