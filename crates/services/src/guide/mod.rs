//! Career guide: stage overviews assembled from several backend stages, and
//! role profiles enriched with catalog extras.

mod aggregator;
mod profile;

use std::fmt;
use std::sync::Arc;

use backend::GuideApi;
use career_core::model::GuideCatalog;

pub use aggregator::{AggregationResult, MergedRole};
pub use profile::RoleProfileView;

/// Read-only guide queries. Nothing is cached; every call hits the backend.
#[derive(Clone)]
pub struct GuideService {
    catalog: Arc<GuideCatalog>,
    api: Arc<dyn GuideApi>,
    concurrency: usize,
}

impl GuideService {
    pub const DEFAULT_CONCURRENCY: usize = 4;

    #[must_use]
    pub fn new(catalog: Arc<GuideCatalog>, api: Arc<dyn GuideApi>) -> Self {
        Self {
            catalog,
            api,
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }

    /// Maximum number of stage fetches in flight at once (at least 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &GuideCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl fmt::Debug for GuideService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideService")
            .field("stages", &self.catalog.stages().len())
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
