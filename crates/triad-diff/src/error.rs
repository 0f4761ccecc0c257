use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("positional diff requires 2 or 3 versions, got {0}")]
    InvalidVersionCount(usize),
}

pub type DiffResult<T> = Result<T, DiffError>;
