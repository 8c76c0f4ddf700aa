use crate::matcher::{FieldCopyMatcher, PatchMatcher};
use crate::model::{Patch, PatchSet};

/// Index of the first patch set carrying both required status patches.
///
/// A patch set that only propagates one of the two paths does not qualify.
/// Returns `None` when nothing qualifies, including for an empty list.
pub fn matching_patch_set_index(patch_sets: &[PatchSet]) -> Option<usize> {
    patch_sets.iter().position(|ps| {
        FieldCopyMatcher::status_conditions().any(&ps.patches)
            && FieldCopyMatcher::status_at_provider().any(&ps.patches)
    })
}

/// A resolved patch set together with the two patches that qualified it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingPatchSet<'a> {
    pub index: usize,
    pub patch_set: &'a PatchSet,
    pub status_conditions: &'a Patch,
    pub status_at_provider: &'a Patch,
}

impl<'a> MatchingPatchSet<'a> {
    pub fn name(&self) -> &'a str {
        &self.patch_set.name
    }
}

/// Like [`matching_patch_set_index`], but also hands back the located patches.
pub fn resolve_matching_patch_set(patch_sets: &[PatchSet]) -> Option<MatchingPatchSet<'_>> {
    let index = matching_patch_set_index(patch_sets)?;
    let patch_set = &patch_sets[index];
    Some(MatchingPatchSet {
        index,
        patch_set,
        status_conditions: FieldCopyMatcher::status_conditions().find(&patch_set.patches)?,
        status_at_provider: FieldCopyMatcher::status_at_provider().find(&patch_set.patches)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{STATUS_AT_PROVIDER_PATH, STATUS_CONDITIONS_PATH};

    fn patch_set(name: &str, patches: Vec<Patch>) -> PatchSet {
        PatchSet {
            name: name.into(),
            patches,
        }
    }

    fn conditions() -> Patch {
        Patch::to_composite("status.conditions", STATUS_CONDITIONS_PATH)
    }

    fn at_provider() -> Patch {
        Patch::to_composite("status.atProvider", STATUS_AT_PROVIDER_PATH)
    }

    #[test]
    fn empty_list_has_no_match() {
        assert_eq!(matching_patch_set_index(&[]), None);
        assert!(resolve_matching_patch_set(&[]).is_none());
    }

    #[test]
    fn set_with_only_conditions_does_not_qualify() {
        let sets = vec![patch_set("PG2", vec![conditions()])];
        assert_eq!(matching_patch_set_index(&sets), None);
    }

    #[test]
    fn first_qualifying_set_wins() {
        let sets = vec![
            patch_set("partial", vec![at_provider()]),
            patch_set("first", vec![at_provider(), conditions()]),
            patch_set("second", vec![conditions(), at_provider()]),
        ];
        assert_eq!(matching_patch_set_index(&sets), Some(1));

        let resolved = resolve_matching_patch_set(&sets).unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.name(), "first");
        assert_eq!(resolved.status_conditions, &conditions());
        assert_eq!(resolved.status_at_provider, &at_provider());
    }

    #[test]
    fn patches_spread_across_sets_do_not_combine() {
        let sets = vec![
            patch_set("a", vec![conditions()]),
            patch_set("b", vec![at_provider()]),
        ];
        assert_eq!(matching_patch_set_index(&sets), None);
    }
}
