use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{GuideStageId, RoleId, StageId};
use crate::model::role::RoleExtras;

const BUNDLED_CATALOG: &str = include_str!("../../data/guide_catalog.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate guide stage id: {0}")]
    DuplicateStage(GuideStageId),

    #[error("guide stage {stage} lists backend stage {backend} more than once")]
    DuplicateBackendStage {
        stage: GuideStageId,
        backend: StageId,
    },
}

/// One logical stage of the guide, grouping several backend stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStage {
    pub id: GuideStageId,
    pub order: u32,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    /// Backend sub-resources to fetch, in merge order.
    pub backend_stage_ids: Vec<StageId>,
}

/// Read-only reference data: guide stages and per-role extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideCatalog {
    stages: Vec<GuideStage>,
    #[serde(default)]
    role_extras: BTreeMap<RoleId, RoleExtras>,
}

impl GuideCatalog {
    /// Build a catalog from already-parsed parts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if stage ids repeat or a stage lists a backend id twice.
    pub fn new(
        mut stages: Vec<GuideStage>,
        role_extras: BTreeMap<RoleId, RoleExtras>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.id.clone()) {
                return Err(CatalogError::DuplicateStage(stage.id.clone()));
            }
            let mut backend_seen = HashSet::new();
            for backend in &stage.backend_stage_ids {
                if !backend_seen.insert(backend) {
                    return Err(CatalogError::DuplicateBackendStage {
                        stage: stage.id.clone(),
                        backend: backend.clone(),
                    });
                }
            }
        }
        stages.sort_by_key(|stage| stage.order);
        Ok(Self {
            stages,
            role_extras,
        })
    }

    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation error.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: GuideCatalog = serde_json::from_str(json)?;
        Self::new(raw.stages, raw.role_extras)
    }

    /// The catalog shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled data is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Stages ordered by `order`.
    #[must_use]
    pub fn stages(&self) -> &[GuideStage] {
        &self.stages
    }

    #[must_use]
    pub fn stage(&self, id: &GuideStageId) -> Option<&GuideStage> {
        self.stages.iter().find(|stage| &stage.id == id)
    }

    /// Backend stage ids for a guide stage; empty when the stage is unknown.
    #[must_use]
    pub fn backend_stage_ids(&self, id: &GuideStageId) -> &[StageId] {
        self.stage(id)
            .map_or(&[], |stage| stage.backend_stage_ids.as_slice())
    }

    #[must_use]
    pub fn role_extras(&self, role_id: &RoleId) -> Option<&RoleExtras> {
        self.role_extras.get(role_id)
    }
}
