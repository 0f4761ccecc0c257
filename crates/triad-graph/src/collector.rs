//! Root-to-leaves link collection.
//!
//! [`LinkCollector`] fetches a root document, resolves every declared
//! relationship through a bounded worker pool, and reduces the results
//! into one ordered sequence of leaf [`EntityLocation`]s.
//!
//! # Invariants
//!
//! - Output order is deterministic for a given root document: tasks are
//!   re-sorted by `(priority, index)` after the pool completes, so
//!   completion order never leaks into the result.
//! - Deduplication is by resolved URL, never by label. Two relationships
//!   pointing at the same content collapse to one entity.
//! - Only `to`-role leaves that are never a `from` target in the same
//!   pass are returned; relationship objects themselves never appear.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use triad_gateway::{join_mirror, ContentGateway, DEFAULT_MIRRORS};
use triad_types::{Cid, Content, EntityLocation};

use crate::catalog::{split_roles, RelationshipKind, RELATIONSHIP_CATALOG};
use crate::error::{GraphError, GraphResult};
use crate::pointer::decode_pointer;

/// Default worker pool size for relationship resolution.
pub const DEFAULT_WORKERS: usize = 10;

/// One relationship pointer queued for resolution.
#[derive(Clone, Debug)]
struct ResolveTask {
    cid: String,
    name: &'static str,
    /// Element index for array relationships, `None` for single-valued.
    index: Option<usize>,
    /// Catalog ordinal of the relationship name.
    priority: usize,
}

impl ResolveTask {
    /// Sort key restoring declared order after the pool completes.
    /// Single-valued tasks sort before any indexed element of the same
    /// relationship.
    fn order_key(&self) -> (usize, i64) {
        (self.priority, self.index.map_or(-1, |i| i as i64))
    }
}

/// An entity URL observed while walking resolved relationships.
#[derive(Debug)]
struct Candidate {
    label: String,
    url: String,
    reached_as_to: bool,
}

/// Deterministic traversal from a root document to its leaf entities.
pub struct LinkCollector {
    gateway: Arc<dyn ContentGateway>,
    workers: usize,
    url_base: String,
}

impl LinkCollector {
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self {
            gateway,
            workers: DEFAULT_WORKERS,
            url_base: DEFAULT_MIRRORS[0].to_string(),
        }
    }

    /// Bound the relationship resolution pool.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Base URL used when rendering entity locations.
    pub fn with_url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }

    /// Collect the ordered leaf entity locations reachable from `root`.
    ///
    /// An unreachable root is fatal ([`GraphError::RootUnreachable`]); an
    /// unresolvable or malformed relationship is dropped with a warning
    /// and shrinks the output instead.
    pub async fn collect(&self, root: &Cid) -> GraphResult<Vec<EntityLocation>> {
        let root_doc = self
            .gateway
            .fetch(root.as_str())
            .await
            .ok_or_else(|| GraphError::RootUnreachable(root.clone()))?;

        let relationships = match relationships_map(&root_doc) {
            Some(map) => map,
            None => {
                warn!(root = %root.short(), "root document has no relationships map");
                return Ok(Vec::new());
            }
        };
        debug!(root = %root.short(), count = relationships.len(), "found relationships");

        let tasks = build_tasks(relationships);
        let resolved = self.resolve_all(tasks).await?;
        Ok(reduce_to_leaves(&resolved, &self.url_base))
    }

    /// Resolve every task through the bounded pool, then restore declared
    /// order with a stable sort.
    async fn resolve_all(
        &self,
        tasks: Vec<ResolveTask>,
    ) -> GraphResult<Vec<(ResolveTask, Value)>> {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed");
            let gateway = Arc::clone(&self.gateway);
            handles.push(tokio::spawn(async move {
                let document = resolve_relationship(gateway.as_ref(), &task).await;
                drop(permit);
                (task, document)
            }));
        }

        let mut resolved = Vec::with_capacity(handles.len());
        for handle in handles {
            let (task, document) = handle
                .await
                .map_err(|e| GraphError::Task(e.to_string()))?;
            if let Some(document) = document {
                resolved.push((task, document));
            }
        }

        resolved.sort_by_key(|(task, _)| task.order_key());
        Ok(resolved)
    }
}

/// The root document's `relationships` map, if it has one.
fn relationships_map(content: &Content) -> Option<&Map<String, Value>> {
    match content {
        Content::Json(value) => value.get("relationships")?.as_object(),
        Content::Text(_) => None,
    }
}

/// Enumerate resolution tasks in catalog order: the single-valued group
/// first, then each array element with its index.
fn build_tasks(relationships: &Map<String, Value>) -> Vec<ResolveTask> {
    let mut tasks = Vec::new();

    for (priority, spec) in RELATIONSHIP_CATALOG.iter().enumerate() {
        let Some(value) = relationships.get(spec.name) else {
            continue;
        };
        match spec.kind {
            RelationshipKind::Single => {
                if let Some(cid) = decode_pointer(value) {
                    tasks.push(ResolveTask {
                        cid: cid.to_string(),
                        name: spec.name,
                        index: None,
                        priority,
                    });
                }
            }
            RelationshipKind::Array => {
                let Some(items) = value.as_array() else {
                    warn!(relationship = spec.name, "expected pointer array, skipping");
                    continue;
                };
                debug!(relationship = spec.name, items = items.len(), "processing array relationship");
                for (index, item) in items.iter().enumerate() {
                    if let Some(cid) = decode_pointer(item) {
                        tasks.push(ResolveTask {
                            cid: cid.to_string(),
                            name: spec.name,
                            index: Some(index),
                            priority,
                        });
                    }
                }
            }
        }
    }

    tasks
}

/// Fetch one relationship document. Unreachable or non-JSON results are
/// dropped with a warning; the collection as a whole continues.
async fn resolve_relationship(gateway: &dyn ContentGateway, task: &ResolveTask) -> Option<Value> {
    match gateway.fetch(&task.cid).await {
        Some(Content::Json(value)) => Some(value),
        Some(Content::Text(_)) => {
            warn!(
                relationship = task.name,
                index = task.index,
                cid = %task.cid,
                "relationship document is not JSON, dropping"
            );
            None
        }
        None => {
            warn!(
                relationship = task.name,
                index = task.index,
                cid = %task.cid,
                "could not fetch relationship from any mirror, dropping"
            );
            None
        }
    }
}

/// Walk resolved relationships in declared order, labeling and
/// deduplicating entity URLs, then keep only the deepest entities: those
/// reached through a `to` pointer that are never themselves a `from`.
fn reduce_to_leaves(resolved: &[(ResolveTask, Value)], url_base: &str) -> Vec<EntityLocation> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut by_url: HashMap<String, usize> = HashMap::new();
    let mut from_urls: HashSet<String> = HashSet::new();

    for (task, document) in resolved {
        let Some(to_cid) = document.get("to").and_then(decode_pointer) else {
            warn!(
                relationship = task.name,
                index = task.index,
                "relationship document has no to pointer, dropping"
            );
            continue;
        };
        let (from_role, to_role) = split_roles(task.name);

        if let Some(from_cid) = document.get("from").and_then(decode_pointer) {
            let url = join_mirror(url_base, from_cid);
            from_urls.insert(url.clone());
            if !by_url.contains_key(&url) {
                by_url.insert(url.clone(), candidates.len());
                candidates.push(Candidate {
                    label: synthesize_label(from_role, task.index),
                    url,
                    reached_as_to: false,
                });
            }
        }

        let url = join_mirror(url_base, to_cid);
        match by_url.get(&url) {
            Some(&existing) => candidates[existing].reached_as_to = true,
            None => {
                by_url.insert(url.clone(), candidates.len());
                candidates.push(Candidate {
                    label: synthesize_label(to_role, task.index),
                    url,
                    reached_as_to: true,
                });
            }
        }
    }

    let leaves: Vec<EntityLocation> = candidates
        .into_iter()
        .filter(|c| c.reached_as_to && !from_urls.contains(&c.url))
        .map(|c| EntityLocation::new(c.label, c.url))
        .collect();
    debug!(count = leaves.len(), "collected leaf entities in declared order");
    leaves
}

/// Label for an entity: the role name, suffixed with a 1-based,
/// zero-padded element index when the relationship came from an array.
fn synthesize_label(role: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{role}_{:03}", i + 1),
        None => role.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triad_gateway::InMemoryGateway;

    fn rel(from: &str, to: &str) -> Value {
        json!({"from": {"/": from}, "to": {"/": to}})
    }

    /// Root with one single-valued and two array relationships. The
    /// property entity is a `from` everywhere, so only the deepest
    /// entities survive the leaf filter.
    fn seeded_gateway() -> Arc<InMemoryGateway> {
        let gateway = InMemoryGateway::new();
        gateway.insert_json(
            "root",
            json!({
                "relationships": {
                    "property_has_address": {"/": "rel-addr"},
                    "property_has_lot": "rel-lot",
                    "property_has_sales_history": [
                        {"/": "rel-sh-1"},
                        {"/": "rel-sh-2"}
                    ]
                }
            }),
        );
        gateway.insert_json("rel-addr", rel("prop", "addr"));
        gateway.insert_json("rel-lot", rel("prop", "lot"));
        gateway.insert_json("rel-sh-1", rel("prop", "sh1"));
        gateway.insert_json("rel-sh-2", rel("prop", "sh2"));
        Arc::new(gateway)
    }

    fn collector(gateway: Arc<InMemoryGateway>) -> LinkCollector {
        LinkCollector::new(gateway).with_workers(4)
    }

    #[tokio::test]
    async fn collects_leaves_in_declared_order() {
        let links = collector(seeded_gateway())
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();

        let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["address", "lot", "sales_history_001", "sales_history_002"]
        );
        assert_eq!(links[0].url, "https://ipfs.io/ipfs/addr");
    }

    #[tokio::test]
    async fn collection_is_deterministic() {
        let gateway = seeded_gateway();
        let first = collector(Arc::clone(&gateway))
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        let second = collector(gateway)
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn from_entities_are_filtered_out() {
        let links = collector(seeded_gateway())
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert!(links.iter().all(|l| !l.url.ends_with("/prop")));
    }

    #[tokio::test]
    async fn intermediate_to_entities_are_filtered_out() {
        // person1 is a `to` of sales_history_has_person and a `from` of
        // person_has_property, so it is not a leaf.
        let gateway = InMemoryGateway::new();
        gateway.insert_json(
            "root",
            json!({
                "relationships": {
                    "person_has_property": [{"/": "rel-pp"}],
                    "sales_history_has_person": [{"/": "rel-shp"}]
                }
            }),
        );
        gateway.insert_json("rel-pp", rel("person1", "prop"));
        gateway.insert_json("rel-shp", rel("sh1", "person1"));

        let links = collector(Arc::new(gateway))
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["property_001"]);
    }

    #[tokio::test]
    async fn duplicate_targets_collapse_to_one_entity() {
        let gateway = InMemoryGateway::new();
        gateway.insert_json(
            "root",
            json!({
                "relationships": {
                    "property_has_file": [{"/": "rel-f1"}, {"/": "rel-f2"}]
                }
            }),
        );
        // Both relationships point at the same underlying content.
        gateway.insert_json("rel-f1", rel("prop", "file-shared"));
        gateway.insert_json("rel-f2", rel("prop", "file-shared"));

        let links = collector(Arc::new(gateway))
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "file_001");
    }

    #[tokio::test]
    async fn unresolvable_relationship_is_dropped_not_fatal() {
        let gateway = seeded_gateway();
        gateway.remove("rel-sh-1");

        let links = collector(gateway)
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["address", "lot", "sales_history_002"]);
    }

    #[tokio::test]
    async fn unreachable_root_is_fatal() {
        let gateway = Arc::new(InMemoryGateway::new());
        let err = collector(gateway)
            .collect(&Cid::parse("nowhere").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::RootUnreachable(_)));
    }

    #[tokio::test]
    async fn root_without_relationships_yields_no_links() {
        let gateway = InMemoryGateway::new();
        gateway.insert_json("root", json!({"label": "no relationships here"}));
        let links = collector(Arc::new(gateway))
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn relationship_without_to_pointer_is_dropped() {
        let gateway = InMemoryGateway::new();
        gateway.insert_json(
            "root",
            json!({"relationships": {"property_has_address": {"/": "rel-bad"}}}),
        );
        gateway.insert_json("rel-bad", json!({"from": {"/": "prop"}}));
        let links = collector(Arc::new(gateway))
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn custom_url_base_is_used_for_locations() {
        let links = collector(seeded_gateway())
            .with_url_base("https://example.org/ipfs/")
            .collect(&Cid::parse("root").unwrap())
            .await
            .unwrap();
        assert!(links[0].url.starts_with("https://example.org/ipfs/"));
    }

    #[test]
    fn order_key_puts_singles_before_array_elements() {
        let single = ResolveTask {
            cid: "a".into(),
            name: "x_has_y",
            index: None,
            priority: 3,
        };
        let element = ResolveTask {
            cid: "b".into(),
            name: "x_has_y",
            index: Some(0),
            priority: 3,
        };
        assert!(single.order_key() < element.order_key());
    }

    #[test]
    fn label_synthesis_zero_pads() {
        assert_eq!(synthesize_label("person", Some(2)), "person_003");
        assert_eq!(synthesize_label("address", None), "address");
    }
}
