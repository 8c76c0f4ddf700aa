use crate::matcher::FUNCTION_PATCH_AND_TRANSFORM;
use crate::model::Composition;
use crate::verdict::PipelineCompositionVerdict;
use tracing::info;

/// Audit a `Pipeline` mode composition.
///
/// Flags the composition when no pipeline step calls
/// `function-patch-and-transform`. Patches passed to the function as input
/// are not inspected.
pub fn audit_pipeline_composition(comp: &Composition) -> PipelineCompositionVerdict {
    let uses_patch_and_transform = comp
        .pipeline
        .iter()
        .any(|step| step.function_ref.name == FUNCTION_PATCH_AND_TRANSFORM);

    info!(
        composition = %comp.name,
        steps = comp.pipeline.len(),
        uses_patch_and_transform,
        "audited pipeline mode composition"
    );

    PipelineCompositionVerdict {
        name: comp.name.clone(),
        mode: comp.mode.clone(),
        is_flagged: !uses_patch_and_transform,
        uses_patch_and_transform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompositionMode, FunctionReference, PipelineStep};

    fn step(step: &str, function: &str) -> PipelineStep {
        PipelineStep {
            step: step.into(),
            function_ref: FunctionReference {
                name: function.into(),
            },
        }
    }

    #[test]
    fn pipeline_without_patch_and_transform_is_flagged() {
        let mut c = Composition::new("C4", CompositionMode::Pipeline);
        c.pipeline.push(step("render", "function-go-templating"));
        let v = audit_pipeline_composition(&c);
        assert!(v.is_flagged);
        assert!(!v.uses_patch_and_transform);
    }

    #[test]
    fn empty_pipeline_is_flagged() {
        let c = Composition::new("empty", CompositionMode::Pipeline);
        assert!(audit_pipeline_composition(&c).is_flagged);
    }

    #[test]
    fn pipeline_with_patch_and_transform_passes() {
        let mut c = Composition::new("C5", CompositionMode::Pipeline);
        c.pipeline.push(step("render", "function-go-templating"));
        c.pipeline
            .push(step("patch-and-transform", FUNCTION_PATCH_AND_TRANSFORM));
        let v = audit_pipeline_composition(&c);
        assert!(v.uses_patch_and_transform);
        assert!(!v.is_flagged);
    }
}
