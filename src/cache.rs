//! Dataset cache
//!
//! The dataset is loaded on first use and shared read-only afterwards.
//! It is only replaced wholesale by an explicit refresh.

use crate::error::Result;
use crate::source::DataSource;
use farm_dashboard_common::Dataset;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct DatasetCache {
    source: DataSource,
    client: reqwest::Client,
    slot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(source: DataSource, client: reqwest::Client) -> Self {
        Self {
            source,
            client,
            slot: RwLock::new(None),
        }
    }

    /// Cache pre-filled with an already loaded dataset
    pub fn with_dataset(source: DataSource, client: reqwest::Client, dataset: Dataset) -> Self {
        Self {
            source,
            client,
            slot: RwLock::new(Some(Arc::new(dataset))),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Cached dataset, loading it on first call
    ///
    /// A failed load leaves the cache empty so the next call retries.
    pub async fn get(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let mut slot = self.slot.write().await;
        // loaded by another caller while waiting for the write lock
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(self.source.load(&self.client).await?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Reload from the source and replace the cached dataset
    ///
    /// On failure the previous dataset stays in place.
    pub async fn refresh(&self) -> Result<Arc<Dataset>> {
        let dataset = Arc::new(self.source.load(&self.client).await?);
        *self.slot.write().await = Some(Arc::clone(&dataset));
        tracing::info!(source = %self.source, "dataset refreshed");
        Ok(dataset)
    }

    pub async fn is_loaded(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
