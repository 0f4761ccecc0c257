use thiserror::Error;

use triad_types::Cid;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The root document for a hash could not be fetched from any mirror.
    /// Fatal: comparison requires every root.
    #[error("root document unreachable on all mirrors: {0}")]
    RootUnreachable(Cid),

    #[error("link resolution task failed: {0}")]
    Task(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
