use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::{RoleId, SessionId, StageId};

/// Score assigned to one role by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role_id: RoleId,
    pub score: f64,
}

/// Score assigned to one product stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageScore {
    pub stage_id: StageId,
    pub stage_name: String,
    pub score: f64,
}

/// Stage the user is most likely to work in, derived from the top roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecommendation {
    pub primary_stage_id: StageId,
    pub primary_stage_name: String,
    #[serde(default)]
    pub what_user_will_see: String,
    #[serde(default)]
    pub related_roles: Vec<RoleId>,
}

/// Free-text interpretation of the result. Optional; the backend omits it when
/// the generator is disabled or its output was invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub primary_recommendation: String,
    pub explanation: String,
    #[serde(default)]
    pub signal_analysis: Option<String>,
    #[serde(default)]
    pub alternative_roles: Vec<String>,
    #[serde(default)]
    pub differentiation_criteria: Option<String>,
    #[serde(default)]
    pub why_this_role_reasons: Vec<String>,
}

/// Aggregate result returned when a session is completed.
///
/// The ranking itself is computed by the backend; the client only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub session_id: SessionId,
    pub ranked_roles: Vec<RoleScore>,
    #[serde(default)]
    pub signal_profile: BTreeMap<String, f64>,
    #[serde(default)]
    pub interpretation: Option<Interpretation>,
    #[serde(default)]
    pub ranked_stages: Option<Vec<StageScore>>,
    #[serde(default)]
    pub stage_recommendation: Option<StageRecommendation>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl TestResult {
    /// Roles ordered by descending score. Ties keep the backend order.
    #[must_use]
    pub fn roles_by_score(&self) -> Vec<&RoleScore> {
        let mut roles: Vec<&RoleScore> = self.ranked_roles.iter().collect();
        roles.sort_by(|a, b| b.score.total_cmp(&a.score));
        roles
    }

    /// Highest-scoring role, if any were returned.
    #[must_use]
    pub fn primary_role(&self) -> Option<&RoleScore> {
        self.roles_by_score().into_iter().next()
    }

    #[must_use]
    pub fn primary_stage_id(&self) -> Option<&StageId> {
        self.stage_recommendation
            .as_ref()
            .map(|rec| &rec.primary_stage_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_roles(roles: &[(&str, f64)]) -> TestResult {
        TestResult {
            session_id: SessionId::new("s1"),
            ranked_roles: roles
                .iter()
                .map(|(id, score)| RoleScore {
                    role_id: RoleId::new(*id),
                    score: *score,
                })
                .collect(),
            signal_profile: BTreeMap::new(),
            interpretation: None,
            ranked_stages: None,
            stage_recommendation: None,
            warnings: None,
        }
    }

    #[test]
    fn primary_role_is_highest_score() {
        let result = result_with_roles(&[("qa", 0.4), ("backend", 0.9), ("pm", 0.7)]);
        assert_eq!(
            result.primary_role().map(|r| r.role_id.as_str()),
            Some("backend")
        );
    }

    #[test]
    fn primary_role_ties_keep_backend_order() {
        let result = result_with_roles(&[("first", 0.5), ("second", 0.5)]);
        assert_eq!(
            result.primary_role().map(|r| r.role_id.as_str()),
            Some("first")
        );
    }

    #[test]
    fn empty_result_has_no_primary() {
        let result = result_with_roles(&[]);
        assert!(result.primary_role().is_none());
        assert!(result.primary_stage_id().is_none());
    }

    #[test]
    fn decodes_minimal_payload() {
        let json = r#"{
            "session_id": "abc",
            "ranked_roles": [{"role_id": "sre", "score": 0.81}],
            "signal_profile": {"systems_thinking": 0.9},
            "stage_recommendation": {
                "primary_stage_id": "launch_ops",
                "primary_stage_name": "Launch & Ops"
            }
        }"#;
        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.session_id, SessionId::new("abc"));
        assert_eq!(result.primary_stage_id(), Some(&StageId::new("launch_ops")));
        assert!(result.interpretation.is_none());
        assert_eq!(result.signal_profile.get("systems_thinking"), Some(&0.9));
    }
}
