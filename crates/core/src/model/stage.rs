use serde::{Deserialize, Serialize};

use crate::model::ids::{RoleId, StageId};

/// Vacancy search hints attached to a stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyFilters {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Descriptive part of a backend stage detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    pub id: StageId,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub typical_outputs: Vec<String>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub primary_vacancy_filters: VacancyFilters,
}

/// A role as it appears within one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRole {
    pub stage_id: StageId,
    pub role_id: RoleId,
    #[serde(default)]
    pub why_here: String,
    #[serde(default)]
    pub how_it_connects_to_vacancies: String,
    /// `primary` or `secondary`.
    #[serde(default)]
    pub importance: String,
}

/// Payload of one backend stage: the stage itself plus the roles active in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDetail {
    pub stage: StageInfo,
    #[serde(default)]
    pub roles: Vec<StageRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stage_detail_with_missing_optional_fields() {
        let json = r#"{
            "stage": {"id": "research", "name": "Research"},
            "roles": [
                {"stage_id": "research", "role_id": "product_manager", "importance": "primary"}
            ]
        }"#;
        let detail: StageDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.stage.id, StageId::new("research"));
        assert!(detail.stage.typical_outputs.is_empty());
        assert_eq!(detail.roles[0].role_id, RoleId::new("product_manager"));
        assert_eq!(detail.roles[0].importance, "primary");
    }
}
