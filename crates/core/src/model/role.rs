use serde::{Deserialize, Serialize};

use crate::model::ids::RoleId;

/// Role profile as served by the backend.
///
/// Only the fields the client reads are modelled; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `junior`, `mid` or `senior_only`.
    #[serde(default)]
    pub entry_difficulty: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub typical_stack: Vec<String>,
    #[serde(default)]
    pub core_skills: Vec<String>,
    #[serde(default)]
    pub can_grow_to: Vec<String>,
}

/// One attribute bar shown on a role card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAttribute {
    pub name: String,
    pub level: u8,
}

/// Locally maintained presentation extras for a role.
///
/// These live in the static guide catalog and overlay backend data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleExtras {
    pub class_tagline: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub attributes: Vec<RoleAttribute>,
    pub simplified_description: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub search_keywords: String,
}

/// Human-readable fallback name for a role id (`backend_developer` → `backend developer`).
#[must_use]
pub fn display_name_for(role_id: &RoleId) -> String {
    role_id.as_str().replace('_', " ")
}
