//! Report generation for Triad.
//!
//! Renders one analysis run into its durable outputs: a human-readable
//! markdown report, a machine-readable three-way comparison document,
//! pairwise comparison documents for each version pair, and a plain-text
//! executive summary. The output directory is cleared before each run so
//! no stale artifacts from a previous comparison survive.
//!
//! # Key Types
//!
//! - [`ReportGenerator`] / [`ReportPaths`] — Emission and resulting file inventory
//! - [`ComparisonDocument`] / [`DifferenceRecord`] — The JSON data contract

pub mod contract;
pub mod error;
pub mod generator;
pub mod markdown;
pub mod summary;

pub use contract::{ComparisonDocument, DifferenceRecord, EntityRef};
pub use error::{ReportError, ReportResult};
pub use generator::{ReportGenerator, ReportPaths, DEFAULT_OUTPUT_DIR};
