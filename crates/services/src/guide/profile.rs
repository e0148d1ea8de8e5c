use career_core::model::{RoleExtras, RoleId, RoleProfile, display_name_for};
use tracing::warn;

use super::GuideService;
use crate::error::GuideError;

/// A role profile as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProfileView {
    pub role_id: RoleId,
    pub name: String,
    pub description: String,
    pub stack: Vec<String>,
    pub remote: Option<RoleProfile>,
    pub extras: Option<RoleExtras>,
    /// Built from catalog extras alone because the backend was unavailable.
    pub degraded: bool,
}

impl RoleProfileView {
    /// Backend data wins wherever it has a value; extras fill the gaps.
    fn merged(remote: RoleProfile, extras: Option<RoleExtras>) -> Self {
        let name = if remote.name.trim().is_empty() {
            display_name_for(&remote.id)
        } else {
            remote.name.clone()
        };
        let description = match &extras {
            Some(extras) if remote.description.trim().is_empty() => {
                extras.simplified_description.clone()
            }
            _ => remote.description.clone(),
        };
        let stack = match &extras {
            Some(extras) if remote.typical_stack.is_empty() => extras.tools.clone(),
            _ => remote.typical_stack.clone(),
        };

        Self {
            role_id: remote.id.clone(),
            name,
            description,
            stack,
            remote: Some(remote),
            extras,
            degraded: false,
        }
    }

    fn degraded(role_id: RoleId, extras: RoleExtras) -> Self {
        Self {
            name: display_name_for(&role_id),
            description: extras.simplified_description.clone(),
            stack: extras.tools.clone(),
            role_id,
            remote: None,
            extras: Some(extras),
            degraded: true,
        }
    }
}

impl GuideService {
    /// Load one role, falling back to catalog extras if the backend fails.
    ///
    /// # Errors
    ///
    /// Returns `GuideError::ProfileUnavailable` if the fetch fails and the
    /// catalog has no extras for the role.
    pub async fn role_profile(&self, role_id: &RoleId) -> Result<RoleProfileView, GuideError> {
        let extras = self.catalog.role_extras(role_id).cloned();
        match self.api.fetch_role_profile(role_id).await {
            Ok(remote) => Ok(RoleProfileView::merged(remote, extras)),
            Err(source) => match extras {
                Some(extras) => {
                    warn!(role = %role_id, error = %source, "serving role profile from catalog only");
                    Ok(RoleProfileView::degraded(role_id.clone(), extras))
                }
                None => Err(GuideError::ProfileUnavailable {
                    role_id: role_id.clone(),
                    source,
                }),
            },
        }
    }
}
