//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use backend::{ApiError, ConfigError};
use career_core::model::{CatalogError, GuideStageId, RoleId, StageId};

/// Errors emitted by `GuideService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuideError {
    #[error("unknown guide stage `{0}`")]
    UnknownStage(GuideStageId),
    #[error("no data could be loaded for guide stage `{group_id}`")]
    AggregationEmpty {
        group_id: GuideStageId,
        failed: Vec<StageId>,
    },
    #[error("role `{role_id}` is unavailable")]
    ProfileUnavailable {
        role_id: RoleId,
        #[source]
        source: ApiError,
    },
}

/// Errors emitted by analytics sinks. Never propagated past the workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error("analytics sink is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read guide catalog {}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Backend(#[from] ApiError),
}
