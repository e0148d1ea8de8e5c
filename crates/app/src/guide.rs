use std::fmt::Write as _;

use career_core::model::GuideCatalog;
use services::{AggregationResult, RoleProfileView};

pub fn format_catalog(catalog: &GuideCatalog) -> String {
    let mut out = String::from("Guide stages:\n");
    for stage in catalog.stages() {
        let _ = writeln!(out, "  {:<10} {}  {}", stage.id.as_str(), stage.name, stage.subtitle);
    }
    out
}

pub fn format_stage(result: &AggregationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.stage.name);
    if !result.stage.subtitle.is_empty() {
        let _ = writeln!(out, "{}", result.stage.subtitle);
    }
    for detail in result.details() {
        if !detail.stage.summary.is_empty() {
            let _ = writeln!(out, "\n{}: {}", detail.stage.name, detail.stage.summary);
        }
    }

    let _ = writeln!(out, "\nRoles:");
    for merged in &result.merged_roles {
        let tagline = merged
            .extras
            .as_ref()
            .map(|extras| extras.class_tagline.as_str())
            .unwrap_or_default();
        let _ = writeln!(out, "  - {} {}", merged.role.role_id, tagline);
        if !merged.role.why_here.is_empty() {
            let _ = writeln!(out, "    {}", merged.role.why_here);
        }
    }

    if result.is_partial() {
        let missing: Vec<&str> = result.failed_sub_ids.iter().map(|id| id.as_str()).collect();
        let _ = writeln!(out, "\nSome data could not be loaded: {}", missing.join(", "));
    }
    out
}

pub fn format_role(view: &RoleProfileView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.name);
    if let Some(extras) = &view.extras {
        let _ = writeln!(out, "{}", extras.class_tagline);
    }
    let _ = writeln!(out, "\n{}", view.description);
    if !view.stack.is_empty() {
        let _ = writeln!(out, "\nStack: {}", view.stack.join(", "));
    }
    if let Some(remote) = &view.remote {
        for item in &remote.responsibilities {
            let _ = writeln!(out, "  - {item}");
        }
        if !remote.can_grow_to.is_empty() {
            let _ = writeln!(out, "Can grow to: {}", remote.can_grow_to.join(", "));
        }
    }
    if view.degraded {
        let _ = writeln!(out, "\n(offline: showing saved information only)");
    }
    out
}
