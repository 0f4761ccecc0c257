//! Relationship graph traversal for Triad.
//!
//! A root document declares its relationships as an unordered map. This
//! crate turns that map into an order-stable sequence of leaf entity
//! locations: relationship names are enumerated through a fixed catalog,
//! resolved through a bounded worker pool, re-sorted by declared
//! priority, labeled deterministically, and deduplicated by resolved URL.
//! Two versions of the same dataset therefore always produce the same
//! entity ordering, no matter how the pool schedules its fetches.
//!
//! # Key Types
//!
//! - [`LinkCollector`] — Root-to-leaves traversal
//! - [`RELATIONSHIP_CATALOG`] / [`RelationshipKind`] — Fixed enumeration order
//! - [`decode_pointer`] — Wire pointer decoding (`{"/": cid}` or bare string)

pub mod catalog;
pub mod collector;
pub mod error;
pub mod pointer;

pub use catalog::{split_roles, RelationshipKind, RelationshipSpec, RELATIONSHIP_CATALOG, ROLE_SEPARATOR};
pub use collector::{LinkCollector, DEFAULT_WORKERS};
pub use error::{GraphError, GraphResult};
pub use pointer::decode_pointer;
