//! Analysis orchestration for Triad.
//!
//! [`Analyzer`] sequences the whole pipeline: link collection for every
//! input hash runs concurrently, then entity content fetch for every
//! collected link set runs concurrently, then one positional diff covers
//! all versions. The two network phases are timed separately.
//!
//! A failure to collect or fetch for any one hash aborts the whole
//! analysis — a comparison over a partial set of hashes would be
//! meaningless and is never produced.

pub mod analyzer;
pub mod error;

pub use analyzer::{Analyzer, DEFAULT_WORKERS};
pub use error::{AnalyzerError, AnalyzerResult};
