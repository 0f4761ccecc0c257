use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("entity fetch task failed: {0}")]
    Task(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
