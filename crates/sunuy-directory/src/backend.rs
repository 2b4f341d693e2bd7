use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sunuy_core::{filter_catalog, ArtisanRecord, DirectoryProvider, FilterCriteria};

use crate::error::DirectoryError;

/// Source of search results for a [`crate::DirectorySession`].
pub trait SearchBackend: Send + Sync + 'static {
    /// Records matching `criteria`, in catalog order.
    fn search(
        &self,
        criteria: FilterCriteria,
    ) -> impl Future<Output = Result<Vec<ArtisanRecord>, DirectoryError>> + Send;
}

/// Filters a static provider after a fixed latency.
#[derive(Debug)]
pub struct SimulatedBackend<P> {
    provider: Arc<P>,
    delay: Duration,
}

impl<P: DirectoryProvider> SimulatedBackend<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, delay: Duration) -> Self {
        Self { provider, delay }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: DirectoryProvider + 'static> SearchBackend for SimulatedBackend<P> {
    async fn search(&self, criteria: FilterCriteria) -> Result<Vec<ArtisanRecord>, DirectoryError> {
        tokio::time::sleep(self.delay).await;
        let matches: Vec<ArtisanRecord> = filter_catalog(self.provider.artisans(), &criteria)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(
            search = criteria.search(),
            metier = criteria.metier(),
            region = criteria.region(),
            department = criteria.department(),
            count = matches.len(),
            "simulated search complete"
        );
        Ok(matches)
    }
}
