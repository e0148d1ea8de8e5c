use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use backend::{Backend, BackendConfig, ConfigError};
use career_core::model::GuideCatalog;
use tracing::info;

use crate::Clock;
use crate::analytics::{AnalyticsSink, TracingAnalytics};
use crate::error::AppServicesError;
use crate::guide::GuideService;
use crate::sessions::{NavigationHost, SessionWorkflow};

const VAR_CATALOG: &str = "CAREER_GUIDE_CATALOG";
const VAR_CONCURRENCY: &str = "CAREER_GUIDE_CONCURRENCY";

/// Guide settings: where the catalog comes from and how many stage fetches may overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuideConfig {
    /// Catalog JSON on disk; the bundled catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
    pub concurrency: usize,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            concurrency: GuideService::DEFAULT_CONCURRENCY,
        }
    }
}

impl GuideConfig {
    /// Read `CAREER_GUIDE_CATALOG` and `CAREER_GUIDE_CONCURRENCY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(VAR_CATALOG) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Empty { var: VAR_CATALOG });
            }
            config.catalog_path = Some(PathBuf::from(trimmed));
        }

        if let Some(raw) = lookup(VAR_CONCURRENCY) {
            config.concurrency = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: VAR_CONCURRENCY,
                        raw,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Load the configured catalog, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<GuideCatalog, AppServicesError> {
        let Some(path) = &self.catalog_path else {
            return Ok(GuideCatalog::bundled()?);
        };
        let json = std::fs::read_to_string(path).map_err(|source| {
            AppServicesError::CatalogRead {
                path: path.clone(),
                source,
            }
        })?;
        let catalog = GuideCatalog::from_json_str(&json)?;
        info!(path = %path.display(), stages = catalog.stages().len(), "loaded guide catalog");
        Ok(catalog)
    }
}

/// Assembles app-facing services around one backend.
#[derive(Clone)]
pub struct AppServices {
    backend: Backend,
    guide: Arc<GuideService>,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Clock,
}

impl AppServices {
    #[must_use]
    pub fn new(
        backend: Backend,
        catalog: GuideCatalog,
        analytics: Arc<dyn AnalyticsSink>,
        clock: Clock,
    ) -> Self {
        let guide = Arc::new(GuideService::new(
            Arc::new(catalog),
            Arc::clone(&backend.guide),
        ));
        Self {
            backend,
            guide,
            analytics,
            clock,
        }
    }

    /// Build services talking to the HTTP backend, with analytics written to the log.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn http(
        backend: BackendConfig,
        guide: &GuideConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let catalog = guide.load_catalog()?;
        info!(base_url = %backend.base_url, "using HTTP backend");
        let services = Self::new(
            Backend::http(backend)?,
            catalog,
            Arc::new(TracingAnalytics),
            clock,
        );
        Ok(services.with_guide_concurrency(guide.concurrency))
    }

    #[must_use]
    pub fn with_guide_concurrency(mut self, concurrency: usize) -> Self {
        let guide = (*self.guide).clone().with_concurrency(concurrency);
        self.guide = Arc::new(guide);
        self
    }

    /// A fresh session bound to the given navigation host.
    #[must_use]
    pub fn session(&self, navigation: Arc<dyn NavigationHost>) -> SessionWorkflow {
        SessionWorkflow::new(
            Arc::clone(&self.backend.interview),
            Arc::clone(&self.analytics),
            navigation,
            self.clock,
        )
    }

    #[must_use]
    pub fn guide(&self) -> Arc<GuideService> {
        Arc::clone(&self.guide)
    }
}

impl fmt::Debug for AppServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppServices")
            .field("guide", &self.guide)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
