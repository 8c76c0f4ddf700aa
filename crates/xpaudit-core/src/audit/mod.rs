//! Mode dispatch over decoded compositions.

pub mod pipeline;
pub mod resources;

pub use pipeline::audit_pipeline_composition;
pub use resources::{audit_resource, audit_resources_composition};

use crate::model::{Composition, CompositionMode};
use crate::verdict::{AuditReport, CompositionVerdict, SkippedComposition};
use tracing::warn;

/// Route a composition to the audit for its mode.
///
/// Returns `None` for modes that are not audited.
pub fn audit_composition(comp: &Composition) -> Option<CompositionVerdict> {
    match comp.mode {
        CompositionMode::Resources => Some(CompositionVerdict::Resources(
            audit_resources_composition(comp),
        )),
        CompositionMode::Pipeline => Some(CompositionVerdict::Pipeline(
            audit_pipeline_composition(comp),
        )),
        CompositionMode::Other(_) => None,
    }
}

/// Audit every composition in order.
///
/// Compositions in an unsupported mode get no verdict; they are listed in
/// [`AuditReport::skipped`] instead.
pub fn audit_all<'a, I>(compositions: I) -> AuditReport
where
    I: IntoIterator<Item = &'a Composition>,
{
    let mut report = AuditReport::default();
    for comp in compositions {
        match audit_composition(comp) {
            Some(CompositionVerdict::Resources(v)) => report.resources_mode.push(v),
            Some(CompositionVerdict::Pipeline(v)) => report.pipeline_mode.push(v),
            None => {
                warn!(composition = %comp.name, mode = %comp.mode, "skipping composition with unsupported mode");
                report.skipped.push(SkippedComposition {
                    name: comp.name.clone(),
                    mode: comp.mode.clone(),
                });
            }
        }
    }
    report
}
