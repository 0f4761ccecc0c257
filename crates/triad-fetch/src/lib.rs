//! Order-preserving entity content fetch for Triad.
//!
//! Fetches every collected entity location through a bounded worker pool
//! while guaranteeing that output order matches input order: results land
//! in pre-sized slots addressed by index, never by completion order. A
//! failed fetch leaves its slot empty, and empty slots are meaningful
//! downstream (they become `Missing` differences), so the output always
//! has exactly as many slots as there were input locations.

pub mod error;
pub mod stage;

pub use error::{FetchError, FetchResult};
pub use stage::{EntityFetchStage, DEFAULT_WORKERS};
