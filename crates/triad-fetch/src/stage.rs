use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use triad_gateway::{extract_cid, ContentGateway};
use triad_types::{EntityLocation, FetchedEntity};

use crate::error::{FetchError, FetchResult};

/// Default worker pool size for entity content fetches.
pub const DEFAULT_WORKERS: usize = 10;

/// Bounded-parallel entity content fetch with slot-stable output.
///
/// One output slot is pre-assigned per input location; each pool task
/// writes only its own slot, so output position `p` always corresponds to
/// input position `p` no matter how the pool schedules completions.
pub struct EntityFetchStage {
    gateway: Arc<dyn ContentGateway>,
    workers: usize,
}

impl EntityFetchStage {
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self {
            gateway,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Bound the content fetch pool.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Fetch content for every location, preserving order.
    ///
    /// The returned vector has exactly `locations.len()` slots. A slot is
    /// `None` when the entity could not be fetched from any mirror; that
    /// absence is data for the diff engine, not an error.
    pub async fn fetch_all(
        &self,
        locations: &[EntityLocation],
    ) -> FetchResult<Vec<Option<FetchedEntity>>> {
        debug!(count = locations.len(), "fetching entity content");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(locations.len());

        for (index, location) in locations.iter().cloned().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed");
            let gateway = Arc::clone(&self.gateway);
            handles.push(tokio::spawn(async move {
                let entity = fetch_entity(gateway.as_ref(), &location).await;
                drop(permit);
                (index, entity)
            }));
        }

        let mut slots: Vec<Option<FetchedEntity>> = vec![None; locations.len()];
        for handle in handles {
            let (index, entity) = handle
                .await
                .map_err(|e| FetchError::Task(e.to_string()))?;
            // Each index arrives exactly once, whatever the completion order.
            slots[index] = entity;
        }

        Ok(slots)
    }
}

/// Fetch one entity's content; `None` when every mirror fails.
async fn fetch_entity(
    gateway: &dyn ContentGateway,
    location: &EntityLocation,
) -> Option<FetchedEntity> {
    let cid = extract_cid(&location.url);
    match gateway.fetch(cid).await {
        Some(content) => Some(FetchedEntity::new(location, content)),
        None => {
            warn!(name = %location.name, cid, "failed to fetch entity content");
            None
        }
    }
}
