//! Positional diff engine for Triad.
//!
//! Compares 2 or 3 ordered entity sequences slot-by-slot — position, not
//! name, is the cross-version join key — and reduces every divergence to
//! its minimal set of leaf field paths.
//!
//! # Key Functions
//!
//! - [`diff_entity_sets`] — Position walk producing [`Difference`]s
//! - [`structural_diff`] — Recursive minimal field diff of parsed values
//! - [`render_minimal`] — Sparse per-version reconstruction of diverging fields
//! - [`insert_at_path`] / [`parse_path`] — Field path plumbing
//!
//! [`Difference`]: triad_types::Difference

pub mod error;
pub mod minimal;
pub mod path;
pub mod positional;
pub mod structural;

pub use error::{DiffError, DiffResult};
pub use minimal::render_minimal;
pub use path::{insert_at_path, parse_path, PathSegment};
pub use positional::diff_entity_sets;
pub use structural::structural_diff;
