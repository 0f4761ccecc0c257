use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Content;

/// A labeled location of one entity in the relationship graph.
///
/// The `name` is a deterministic label synthesized during link collection
/// (e.g. `person_003`). It gives a position a stable, human-readable
/// identity within one version; it is never used to match entities across
/// versions — position is the only cross-version join key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLocation {
    /// Synthesized, version-local label.
    pub name: String,
    /// URL resolving to the entity's content.
    pub url: String,
}

impl EntityLocation {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// An entity whose content was successfully fetched.
///
/// A failed fetch never produces a `FetchedEntity`; it leaves an empty
/// `Option<FetchedEntity>` slot, which downstream stages treat as data
/// (a `Missing` difference), not as an error.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedEntity {
    /// Label carried over from the entity's [`EntityLocation`].
    pub name: String,
    /// URL the content was resolved from.
    pub url: String,
    /// Canonical string form, used for the fast equality short-circuit.
    pub raw: String,
    /// Structured form, used for recursive field diffing.
    pub parsed: Value,
}

impl FetchedEntity {
    /// Build a fetched entity from its location and decoded content.
    pub fn new(location: &EntityLocation, content: Content) -> Self {
        Self {
            name: location.name.clone(),
            url: location.url.clone(),
            raw: content.canonical_string(),
            parsed: content.into_value(),
        }
    }
}
