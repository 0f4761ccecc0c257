//! Foundation types for Triad.
//!
//! Triad compares independently published versions of a content-addressed
//! dataset. This crate provides the types shared by every stage of that
//! pipeline. Every other triad crate depends on `triad-types`.
//!
//! # Key Types
//!
//! - [`Cid`] — Opaque content identifier used as a fetch key
//! - [`Content`] — Decoded gateway payload (JSON or raw text)
//! - [`EntityLocation`] — Synthesized label plus resolved content URL
//! - [`FetchedEntity`] — An entity's fetched raw and parsed content
//! - [`FieldDiff`] / [`Difference`] / [`DiffKind`] — Position and field level divergence
//! - [`AnalysisResult`] / [`PhaseTiming`] — Aggregate output of one analysis run

pub mod analysis;
pub mod cid;
pub mod content;
pub mod difference;
pub mod entity;
pub mod error;

pub use analysis::{AnalysisResult, PhaseTiming};
pub use cid::Cid;
pub use content::Content;
pub use difference::{DiffKind, Difference, FieldDiff};
pub use entity::{EntityLocation, FetchedEntity};
pub use error::TypeError;
