//! Tab-separated tables.
//!
//! Each table starts with a title line and a header row. Cells never contain
//! tabs or newlines: Kubernetes names cannot, and the booleans and indices
//! are rendered by us.

use crate::verdict::{PipelineCompositionVerdict, ResourcesCompositionVerdict};
use std::fmt::Write;

pub const RESOURCE_COMPOSITIONS_TITLE: &str = "RESOURCE MODE COMPOSITIONS";
pub const RESOURCES_TITLE: &str = "RESOURCE MODE CRs BY COMPOSITION";
pub const PIPELINE_COMPOSITIONS_TITLE: &str = "PIPELINE MODE COMPOSITIONS";

/// Placeholder cell for compositions without resources.
pub const NOT_APPLICABLE: &str = "N/A";

const RESOURCE_COMPOSITIONS_HEADER: [&str; 5] = [
    "Index",
    "Name",
    "HasMatchingPatchSet",
    "MatchingPatchSetName",
    "IsFlagged",
];

const RESOURCES_HEADER: [&str; 6] = [
    "Parent Index",
    "Parent Comp",
    "Resource Index",
    "Resource Name",
    "UsesMatchingPatchSet",
    "IsFlagged",
];

const PIPELINE_COMPOSITIONS_HEADER: [&str; 4] =
    ["Index", "Name", "UsesPatchAndTransform", "IsFlagged"];

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push('\t');
        }
        out.push_str(cell.as_ref());
    }
    out.push('\n');
}

fn start_table(title: &str, header: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    push_row(&mut out, header);
    out
}

/// One row per `Resources` mode composition.
pub fn render_resource_compositions(verdicts: &[ResourcesCompositionVerdict]) -> String {
    let mut out = start_table(RESOURCE_COMPOSITIONS_TITLE, &RESOURCE_COMPOSITIONS_HEADER);
    for (i, v) in verdicts.iter().enumerate() {
        push_row(
            &mut out,
            &[
                i.to_string(),
                v.name.clone(),
                v.has_matching_patch_set().to_string(),
                v.matching_patch_set_name().unwrap_or_default().to_string(),
                v.is_flagged.to_string(),
            ],
        );
    }
    out
}

/// One row per composed resource, grouped by composition.
pub fn render_resources(verdicts: &[ResourcesCompositionVerdict]) -> String {
    let mut out = start_table(RESOURCES_TITLE, &RESOURCES_HEADER);
    for (parent_index, parent) in verdicts.iter().enumerate() {
        if parent.resource_verdicts.is_empty() {
            push_row(
                &mut out,
                &[
                    parent_index.to_string().as_str(),
                    parent.name.as_str(),
                    NOT_APPLICABLE,
                    NOT_APPLICABLE,
                    NOT_APPLICABLE,
                    NOT_APPLICABLE,
                ],
            );
            continue;
        }
        for r in &parent.resource_verdicts {
            push_row(
                &mut out,
                &[
                    parent_index.to_string(),
                    parent.name.clone(),
                    r.index.to_string(),
                    r.name.clone(),
                    r.uses_matching_patch_set.to_string(),
                    r.is_flagged.to_string(),
                ],
            );
        }
    }
    out
}

pub fn render_pipeline_compositions(verdicts: &[PipelineCompositionVerdict]) -> String {
    let mut out = start_table(PIPELINE_COMPOSITIONS_TITLE, &PIPELINE_COMPOSITIONS_HEADER);
    for (i, v) in verdicts.iter().enumerate() {
        push_row(
            &mut out,
            &[
                i.to_string(),
                v.name.clone(),
                v.uses_patch_and_transform.to_string(),
                v.is_flagged.to_string(),
            ],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompositionMode, Patch};
    use crate::verdict::{PatchSetMatch, ResourceVerdict};

    fn resource(name: &str, index: usize, inherited: bool, flagged: bool) -> ResourceVerdict {
        ResourceVerdict {
            name: name.into(),
            index,
            uses_matching_patch_set: inherited,
            status_conditions_patch: None,
            status_at_provider_patch: None,
            is_flagged: flagged,
        }
    }

    fn sample() -> Vec<ResourcesCompositionVerdict> {
        vec![
            ResourcesCompositionVerdict {
                name: "network".into(),
                mode: CompositionMode::Resources,
                is_flagged: true,
                resource_verdicts: vec![
                    resource("vpc", 0, true, false),
                    resource("subnet", 1, false, true),
                ],
                matching_patch_set: Some(PatchSetMatch {
                    name: "status".into(),
                    status_conditions_patch: Patch::to_composite("a", "status.conditions"),
                    status_at_provider_patch: Patch::to_composite("b", "status.atProvider"),
                }),
            },
            ResourcesCompositionVerdict {
                name: "empty".into(),
                mode: CompositionMode::Resources,
                is_flagged: false,
                resource_verdicts: vec![],
                matching_patch_set: None,
            },
        ]
    }

    #[test]
    fn composition_table() {
        let got = render_resource_compositions(&sample());
        let want = "RESOURCE MODE COMPOSITIONS\n\
                    Index\tName\tHasMatchingPatchSet\tMatchingPatchSetName\tIsFlagged\n\
                    0\tnetwork\ttrue\tstatus\ttrue\n\
                    1\tempty\tfalse\t\tfalse\n";
        assert_eq!(got, want);
    }

    #[test]
    fn resources_table_uses_placeholders_for_empty_compositions() {
        let got = render_resources(&sample());
        let lines: Vec<&str> = got.lines().collect();
        assert_eq!(lines[0], RESOURCES_TITLE);
        assert_eq!(
            lines[1],
            "Parent Index\tParent Comp\tResource Index\tResource Name\tUsesMatchingPatchSet\tIsFlagged"
        );
        assert_eq!(lines[2], "0\tnetwork\t0\tvpc\ttrue\tfalse");
        assert_eq!(lines[3], "0\tnetwork\t1\tsubnet\tfalse\ttrue");
        assert_eq!(lines[4], "1\tempty\tN/A\tN/A\tN/A\tN/A");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn pipeline_table() {
        let verdicts = vec![PipelineCompositionVerdict {
            name: "fn".into(),
            mode: CompositionMode::Pipeline,
            is_flagged: true,
            uses_patch_and_transform: false,
        }];
        let got = render_pipeline_compositions(&verdicts);
        assert!(got.ends_with("0\tfn\tfalse\ttrue\n"), "{got}");
    }

    #[test]
    fn empty_input_renders_headers_only() {
        assert_eq!(render_resources(&[]).lines().count(), 2);
        assert_eq!(render_pipeline_compositions(&[]).lines().count(), 2);
    }
}
