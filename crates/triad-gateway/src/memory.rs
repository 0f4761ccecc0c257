use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use triad_types::Content;

use crate::traits::ContentGateway;

/// In-memory, HashMap-backed gateway.
///
/// Intended for tests and embedding. Entries are held behind a `RwLock`
/// and cloned on fetch. A CID with no entry resolves to `None`, exactly
/// like an identifier no mirror can serve.
pub struct InMemoryGateway {
    entries: RwLock<HashMap<String, Content>>,
}

impl InMemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of resolvable identifiers.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no identifiers are resolvable.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Publish content under a CID.
    pub fn insert(&self, cid: impl Into<String>, content: Content) {
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(cid.into(), content);
    }

    /// Publish a JSON document under a CID.
    pub fn insert_json(&self, cid: impl Into<String>, value: Value) {
        self.insert(cid, Content::Json(value));
    }

    /// Remove an identifier, simulating content that became unreachable.
    pub fn remove(&self, cid: &str) -> bool {
        self.entries
            .write()
            .expect("lock poisoned")
            .remove(cid)
            .is_some()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGateway")
            .field("entry_count", &self.len())
            .finish()
    }
}

#[async_trait]
impl ContentGateway for InMemoryGateway {
    async fn fetch(&self, cid: &str) -> Option<Content> {
        self.entries.read().expect("lock poisoned").get(cid).cloned()
    }
}
