use thiserror::Error;

use triad_types::Cid;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analysis requires 2 or 3 hashes, got {0}")]
    InvalidVersionCount(usize),

    #[error("failed to collect links for hash {hash}: {source}")]
    Collection {
        hash: Cid,
        #[source]
        source: triad_graph::GraphError,
    },

    #[error("failed to fetch entities for hash {hash}: {source}")]
    Fetch {
        hash: Cid,
        #[source]
        source: triad_fetch::FetchError,
    },

    #[error("diff error: {0}")]
    Diff(#[from] triad_diff::DiffError),

    #[error("analysis task failed: {0}")]
    Task(String),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
