use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use triad_diff::diff_entity_sets;
use triad_fetch::EntityFetchStage;
use triad_gateway::{ContentGateway, DEFAULT_MIRRORS};
use triad_graph::{GraphResult, LinkCollector};
use triad_types::{AnalysisResult, Cid, EntityLocation, FetchedEntity, PhaseTiming};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Default worker pool size applied to each hash's pipeline.
pub const DEFAULT_WORKERS: usize = 10;

/// High-level analysis API composing collection, fetch, and diff.
pub struct Analyzer {
    gateway: Arc<dyn ContentGateway>,
    workers: usize,
    url_base: String,
}

impl Analyzer {
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self {
            gateway,
            workers: DEFAULT_WORKERS,
            url_base: DEFAULT_MIRRORS[0].to_string(),
        }
    }

    /// Bound the per-hash worker pools.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Base URL used when rendering entity locations.
    pub fn with_url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }

    /// Run one full analysis over 2 or 3 hashes.
    pub async fn analyze(&self, hashes: Vec<Cid>) -> AnalyzerResult<AnalysisResult> {
        if !(2..=3).contains(&hashes.len()) {
            return Err(AnalyzerError::InvalidVersionCount(hashes.len()));
        }
        info!(versions = hashes.len(), "starting analysis");

        let collect_start = Instant::now();
        let link_sets = self.collect_all(&hashes).await?;
        let collect = collect_start.elapsed();
        info!(elapsed_ms = collect.as_millis() as u64, "link collection phase complete");

        let fetch_start = Instant::now();
        let entity_sets = self.fetch_all(&hashes, &link_sets).await?;
        let fetch = fetch_start.elapsed();
        info!(elapsed_ms = fetch.as_millis() as u64, "content fetch phase complete");

        let differences = diff_entity_sets(&entity_sets)?;
        debug!(count = differences.len(), "positional diff complete");

        Ok(AnalysisResult {
            hashes,
            link_sets,
            entity_sets,
            differences,
            timing: PhaseTiming { collect, fetch },
        })
    }

    /// Collect links for every hash concurrently, one task per hash.
    async fn collect_all(&self, hashes: &[Cid]) -> AnalyzerResult<Vec<Vec<EntityLocation>>> {
        let mut handles: Vec<JoinHandle<(Cid, GraphResult<Vec<EntityLocation>>)>> = Vec::new();
        for hash in hashes.iter().cloned() {
            let collector = LinkCollector::new(Arc::clone(&self.gateway))
                .with_workers(self.workers)
                .with_url_base(self.url_base.clone());
            handles.push(tokio::spawn(async move {
                let links = collector.collect(&hash).await;
                (hash, links)
            }));
        }

        let mut link_sets = Vec::with_capacity(hashes.len());
        for handle in handles {
            let (hash, links) = handle
                .await
                .map_err(|e| AnalyzerError::Task(e.to_string()))?;
            let links = links.map_err(|source| AnalyzerError::Collection {
                hash: hash.clone(),
                source,
            })?;
            info!(hash = %hash.short(), links = links.len(), "collected links");
            link_sets.push(links);
        }
        Ok(link_sets)
    }

    /// Fetch entity content for every link set concurrently, one task per
    /// hash. Output order matches `hashes` order.
    async fn fetch_all(
        &self,
        hashes: &[Cid],
        link_sets: &[Vec<EntityLocation>],
    ) -> AnalyzerResult<Vec<Vec<Option<FetchedEntity>>>> {
        let mut handles: Vec<JoinHandle<Result<Vec<Option<FetchedEntity>>, triad_fetch::FetchError>>> =
            Vec::new();
        for links in link_sets.iter().cloned() {
            let stage = EntityFetchStage::new(Arc::clone(&self.gateway)).with_workers(self.workers);
            handles.push(tokio::spawn(async move { stage.fetch_all(&links).await }));
        }

        let mut entity_sets = Vec::with_capacity(link_sets.len());
        for (index, handle) in handles.into_iter().enumerate() {
            let slots = handle
                .await
                .map_err(|e| AnalyzerError::Task(e.to_string()))?
                .map_err(|source| AnalyzerError::Fetch {
                    hash: hashes[index].clone(),
                    source,
                })?;
            let fetched = slots.iter().filter(|s| s.is_some()).count();
            info!(hash = %hashes[index].short(), fetched, total = slots.len(), "fetched entity content");
            entity_sets.push(slots);
        }
        Ok(entity_sets)
    }
}
