use std::collections::{BTreeSet, HashSet};

use backend::ApiError;
use career_core::model::{
    GuideCatalog, GuideStage, GuideStageId, RoleExtras, StageDetail, StageId, StageRole,
};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::GuideService;
use crate::error::GuideError;

/// A role shown on a guide stage, with its catalog extras when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRole {
    pub role: StageRole,
    pub extras: Option<RoleExtras>,
}

/// One guide stage assembled from its backend stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub group_id: GuideStageId,
    /// Catalog metadata of the guide stage.
    pub stage: GuideStage,
    /// Deduplicated roles in request order; the first occurrence of an id wins.
    pub merged_roles: Vec<MergedRole>,
    /// One entry per requested backend stage, `None` where the fetch failed.
    pub sub_results: Vec<Option<StageDetail>>,
    pub failed_sub_ids: BTreeSet<StageId>,
    pub is_hard_failure: bool,
}

impl AggregationResult {
    fn empty(stage: GuideStage) -> Self {
        Self {
            group_id: stage.id.clone(),
            stage,
            merged_roles: Vec::new(),
            sub_results: Vec::new(),
            failed_sub_ids: BTreeSet::new(),
            is_hard_failure: false,
        }
    }

    /// Some backend stages failed but at least one succeeded.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed_sub_ids.is_empty()
    }

    /// Successfully fetched backend stages, in request order.
    pub fn details(&self) -> impl Iterator<Item = &StageDetail> {
        self.sub_results.iter().flatten()
    }
}

impl GuideService {
    /// Fetch every backend stage of a guide stage and merge their roles.
    ///
    /// Fetches run concurrently and independently; results are merged in the
    /// order the catalog lists them, regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns `GuideError::UnknownStage` if the catalog has no such stage, and
    /// `GuideError::AggregationEmpty` if every backend stage failed.
    pub async fn stage_view(&self, group_id: &GuideStageId) -> Result<AggregationResult, GuideError> {
        let stage = self
            .catalog
            .stage(group_id)
            .cloned()
            .ok_or_else(|| GuideError::UnknownStage(group_id.clone()))?;
        if stage.backend_stage_ids.is_empty() {
            debug!(group = %group_id, "guide stage has no backend stages");
            return Ok(AggregationResult::empty(stage));
        }

        let api = self.api.as_ref();
        let outcomes: Vec<(StageId, Result<StageDetail, ApiError>)> =
            stream::iter(stage.backend_stage_ids.iter().cloned())
                .map(|stage_id| async move {
                    let outcome = api.fetch_stage_detail(&stage_id).await;
                    (stage_id, outcome)
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut sub_results = Vec::with_capacity(outcomes.len());
        let mut failed = Vec::new();
        for (stage_id, outcome) in outcomes {
            match outcome {
                Ok(detail) => sub_results.push(Some(detail)),
                Err(err) => {
                    warn!(group = %group_id, stage = %stage_id, error = %err, "stage fetch failed");
                    failed.push(stage_id);
                    sub_results.push(None);
                }
            }
        }

        if sub_results.iter().all(Option::is_none) {
            return Err(GuideError::AggregationEmpty {
                group_id: group_id.clone(),
                failed,
            });
        }
        if !failed.is_empty() {
            warn!(group = %group_id, failed = failed.len(), "serving partial guide stage");
        }

        Ok(AggregationResult {
            group_id: group_id.clone(),
            merged_roles: merge_roles(&self.catalog, &sub_results),
            stage,
            sub_results,
            failed_sub_ids: failed.into_iter().collect(),
            is_hard_failure: false,
        })
    }
}

fn merge_roles(catalog: &GuideCatalog, details: &[Option<StageDetail>]) -> Vec<MergedRole> {
    let mut seen = HashSet::new();
    details
        .iter()
        .flatten()
        .flat_map(|detail| detail.roles.iter())
        .filter(|role| seen.insert(role.role_id.clone()))
        .map(|role| MergedRole {
            role: role.clone(),
            extras: catalog.role_extras(&role.role_id).cloned(),
        })
        .collect()
}
