//! Audit results. Verdicts are built once by the auditors and never changed.

use crate::model::{CompositionMode, Patch};
use serde::Serialize;
use std::fmt;

/// Result for one entry of `spec.resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceVerdict {
    pub name: String,
    pub index: usize,
    pub uses_matching_patch_set: bool,
    /// Only set when the patch is declared on the resource itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_conditions_patch: Option<Patch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_at_provider_patch: Option<Patch>,
    pub is_flagged: bool,
}

/// The patch set that supplies both status patches for a composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchSetMatch {
    pub name: String,
    pub status_conditions_patch: Patch,
    pub status_at_provider_patch: Patch,
}

/// Result for a `Resources` mode composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcesCompositionVerdict {
    pub name: String,
    pub mode: CompositionMode,
    pub is_flagged: bool,
    pub resource_verdicts: Vec<ResourceVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_patch_set: Option<PatchSetMatch>,
}

impl ResourcesCompositionVerdict {
    pub fn has_matching_patch_set(&self) -> bool {
        self.matching_patch_set.is_some()
    }

    pub fn matching_patch_set_name(&self) -> Option<&str> {
        self.matching_patch_set.as_ref().map(|m| m.name.as_str())
    }

    pub fn flagged_resources(&self) -> impl Iterator<Item = &ResourceVerdict> {
        self.resource_verdicts.iter().filter(|r| r.is_flagged)
    }
}

impl fmt::Display for ResourcesCompositionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "IsFlagged: {}", self.is_flagged)?;
        writeln!(f, "HasMatchingPatchSet: {}", self.has_matching_patch_set())?;
        if let Some(m) = &self.matching_patch_set {
            writeln!(f, "MatchingPatchSetName: {}", m.name)?;
            writeln!(f, "PatchSetStatusConditionsPatch: {}", m.status_conditions_patch)?;
            writeln!(f, "PatchSetStatusAtProviderPatch: {}", m.status_at_provider_patch)?;
        }
        for r in &self.resource_verdicts {
            let how = if r.uses_matching_patch_set {
                "patch set"
            } else {
                "direct"
            };
            let status = if r.is_flagged { "FLAGGED" } else { "ok" };
            writeln!(f, "  [{}] {} ({}): {}", r.index, r.name, how, status)?;
        }
        Ok(())
    }
}

/// Result for a `Pipeline` mode composition.
///
/// Only checks that `function-patch-and-transform` is part of the pipeline;
/// patches inside the function input are not analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineCompositionVerdict {
    pub name: String,
    pub mode: CompositionMode,
    pub is_flagged: bool,
    pub uses_patch_and_transform: bool,
}

impl fmt::Display for PipelineCompositionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "IsFlagged: {}", self.is_flagged)?;
        writeln!(f, "UsesPatchAndTransform: {}", self.uses_patch_and_transform)
    }
}

/// Verdict for a single composition, by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositionVerdict {
    Resources(ResourcesCompositionVerdict),
    Pipeline(PipelineCompositionVerdict),
}

impl CompositionVerdict {
    pub fn name(&self) -> &str {
        match self {
            CompositionVerdict::Resources(v) => &v.name,
            CompositionVerdict::Pipeline(v) => &v.name,
        }
    }

    pub fn is_flagged(&self) -> bool {
        match self {
            CompositionVerdict::Resources(v) => v.is_flagged,
            CompositionVerdict::Pipeline(v) => v.is_flagged,
        }
    }
}

impl fmt::Display for CompositionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionVerdict::Resources(v) => fmt::Display::fmt(v, f),
            CompositionVerdict::Pipeline(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// A composition that produced no verdict because its mode is not audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComposition {
    pub name: String,
    pub mode: CompositionMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub compositions: usize,
    pub flagged_compositions: usize,
    pub resources: usize,
    pub flagged_resources: usize,
    pub skipped: usize,
}

/// Everything one audit run produced, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub resources_mode: Vec<ResourcesCompositionVerdict>,
    pub pipeline_mode: Vec<PipelineCompositionVerdict>,
    pub skipped: Vec<SkippedComposition>,
}

impl AuditReport {
    pub fn summary(&self) -> AuditSummary {
        let resources = self
            .resources_mode
            .iter()
            .map(|c| c.resource_verdicts.len())
            .sum();
        let flagged_resources = self
            .resources_mode
            .iter()
            .map(|c| c.flagged_resources().count())
            .sum();
        let flagged_compositions = self.resources_mode.iter().filter(|c| c.is_flagged).count()
            + self.pipeline_mode.iter().filter(|c| c.is_flagged).count();

        AuditSummary {
            compositions: self.resources_mode.len() + self.pipeline_mode.len(),
            flagged_compositions,
            resources,
            flagged_resources,
            skipped: self.skipped.len(),
        }
    }

    pub fn has_flagged(&self) -> bool {
        self.resources_mode.iter().any(|c| c.is_flagged)
            || self.pipeline_mode.iter().any(|c| c.is_flagged)
    }
}
