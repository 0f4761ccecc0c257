//! Gateway layer for Triad.
//!
//! Resolves content identifiers to their published content by trying an
//! ordered list of mirror endpoints until one succeeds. Resilience comes
//! from mirror diversity, not per-mirror retries: a mirror that errors or
//! times out is skipped, and only when every mirror is exhausted does a
//! fetch come back absent. Absence is data, never an error.
//!
//! # Key Types
//!
//! - [`ContentGateway`] — Async resolution interface
//! - [`HttpGateway`] — Mirror-list HTTP resolver
//! - [`InMemoryGateway`] — Map-backed resolver for tests and embedding
//! - [`GatewayConfig`] — Mirror list and per-request timeout

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use config::{extract_cid, join_mirror, GatewayConfig, DEFAULT_MIRRORS};
pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
pub use traits::ContentGateway;
