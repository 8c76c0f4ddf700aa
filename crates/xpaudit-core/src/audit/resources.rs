use crate::matcher::{FieldCopyMatcher, PatchMatcher, PatchSetMatcher};
use crate::model::{ComposedTemplate, Composition};
use crate::resolve::resolve_matching_patch_set;
use crate::verdict::{PatchSetMatch, ResourceVerdict, ResourcesCompositionVerdict};
use tracing::{debug, info};

/// Audit one composed resource.
///
/// A resource that references the composition's matching patch set is
/// satisfied regardless of its own patches. Otherwise it must declare both
/// status patches itself.
pub fn audit_resource(
    resource: &ComposedTemplate,
    index: usize,
    matching_patch_set: Option<&str>,
) -> ResourceVerdict {
    if let Some(name) = matching_patch_set {
        if PatchSetMatcher::new(name).any(&resource.patches) {
            debug!(resource = %resource.name, index, patch_set = name, "uses matching patch set");
            return ResourceVerdict {
                name: resource.name.clone(),
                index,
                uses_matching_patch_set: true,
                status_conditions_patch: None,
                status_at_provider_patch: None,
                is_flagged: false,
            };
        }
    }

    let status_conditions_patch = FieldCopyMatcher::status_conditions()
        .find(&resource.patches)
        .cloned();
    let status_at_provider_patch = FieldCopyMatcher::status_at_provider()
        .find(&resource.patches)
        .cloned();
    let is_flagged = status_conditions_patch.is_none() || status_at_provider_patch.is_none();

    debug!(
        resource = %resource.name,
        index,
        has_status_conditions = status_conditions_patch.is_some(),
        has_status_at_provider = status_at_provider_patch.is_some(),
        is_flagged,
        "checked direct patches"
    );

    ResourceVerdict {
        name: resource.name.clone(),
        index,
        uses_matching_patch_set: false,
        status_conditions_patch,
        status_at_provider_patch,
        is_flagged,
    }
}

/// Audit a `Resources` mode composition.
///
/// The composition is flagged when any of its resources is. A composition
/// without resources is never flagged.
pub fn audit_resources_composition(comp: &Composition) -> ResourcesCompositionVerdict {
    let matching = resolve_matching_patch_set(&comp.patch_sets);
    match &matching {
        Some(m) => debug!(composition = %comp.name, patch_set = m.name(), "found matching patch set"),
        None => debug!(composition = %comp.name, "found no matching patch set"),
    }
    let patch_set_name = matching.as_ref().map(|m| m.name());

    let resource_verdicts: Vec<ResourceVerdict> = comp
        .resources
        .iter()
        .enumerate()
        .map(|(i, r)| audit_resource(r, i, patch_set_name))
        .collect();
    let is_flagged = resource_verdicts.iter().any(|r| r.is_flagged);

    info!(
        composition = %comp.name,
        resources = resource_verdicts.len(),
        is_flagged,
        "audited resources mode composition"
    );

    ResourcesCompositionVerdict {
        name: comp.name.clone(),
        mode: comp.mode.clone(),
        is_flagged,
        resource_verdicts,
        matching_patch_set: matching.map(|m| PatchSetMatch {
            name: m.name().to_string(),
            status_conditions_patch: m.status_conditions.clone(),
            status_at_provider_patch: m.status_at_provider.clone(),
        }),
    }
}
