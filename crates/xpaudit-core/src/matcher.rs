use crate::model::Patch;

/// Destination path that must receive the composed resource's conditions.
pub const STATUS_CONDITIONS_PATH: &str = "status.conditions";
/// Destination path that must receive the composed resource's observed state.
pub const STATUS_AT_PROVIDER_PATH: &str = "status.atProvider";
/// Function a Pipeline-mode composition needs for patch-based wiring.
pub const FUNCTION_PATCH_AND_TRANSFORM: &str = "function-patch-and-transform";

/// A predicate over a single patch declaration.
///
/// Implementations must return `false` for patches of a kind they do not
/// care about.
pub trait PatchMatcher {
    fn matches(&self, patch: &Patch) -> bool;

    /// Index of the first matching patch.
    fn position(&self, patches: &[Patch]) -> Option<usize> {
        patches.iter().position(|p| self.matches(p))
    }

    /// First matching patch.
    fn find<'a>(&self, patches: &'a [Patch]) -> Option<&'a Patch> {
        patches.iter().find(|p| self.matches(p))
    }

    fn any(&self, patches: &[Patch]) -> bool {
        patches.iter().any(|p| self.matches(p))
    }
}

/// Matches `ToCompositeFieldPath` patches writing to `to_field_path`.
///
/// The source path is not considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCopyMatcher<'a> {
    to_field_path: &'a str,
}

impl<'a> FieldCopyMatcher<'a> {
    pub fn new(to_field_path: &'a str) -> Self {
        Self { to_field_path }
    }

    pub fn status_conditions() -> FieldCopyMatcher<'static> {
        FieldCopyMatcher::new(STATUS_CONDITIONS_PATH)
    }

    pub fn status_at_provider() -> FieldCopyMatcher<'static> {
        FieldCopyMatcher::new(STATUS_AT_PROVIDER_PATH)
    }
}

impl PatchMatcher for FieldCopyMatcher<'_> {
    fn matches(&self, patch: &Patch) -> bool {
        matches!(
            patch,
            Patch::ToCompositeFieldPath { to_field_path, .. } if to_field_path == self.to_field_path
        )
    }
}

/// Matches `PatchSet` references to the patch set called `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchSetMatcher<'a> {
    name: &'a str,
}

impl<'a> PatchSetMatcher<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl PatchMatcher for PatchSetMatcher<'_> {
    fn matches(&self, patch: &Patch) -> bool {
        matches!(
            patch,
            Patch::PatchSet { patch_set_name } if patch_set_name == self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn common_patches() -> Vec<Patch> {
        vec![
            Patch::Other {
                kind: "FromCompositeFieldPath".into(),
            },
            Patch::to_composite("status.atProvider", STATUS_AT_PROVIDER_PATH),
            Patch::to_composite("status.conditions", STATUS_CONDITIONS_PATH),
            Patch::patch_set("common"),
        ]
    }

    #[test]
    fn field_copy_matches_destination_only() {
        let patches = common_patches();
        let m = FieldCopyMatcher::status_conditions();
        assert_eq!(m.position(&patches), Some(2));

        let renamed_source = Patch::to_composite("status.whatever", STATUS_CONDITIONS_PATH);
        assert!(m.matches(&renamed_source));

        let wrong_destination = Patch::to_composite(STATUS_CONDITIONS_PATH, "status.other");
        assert!(!m.matches(&wrong_destination));
    }

    #[test]
    fn patch_set_matcher_matches_by_name() {
        let patches = common_patches();
        assert_eq!(PatchSetMatcher::new("common").position(&patches), Some(3));
        assert!(!PatchSetMatcher::new("other").any(&patches));
    }

    #[test]
    fn empty_patch_list_never_matches() {
        assert_eq!(FieldCopyMatcher::status_at_provider().position(&[]), None);
        assert!(PatchSetMatcher::new("common").find(&[]).is_none());
    }

    proptest! {
        #[test]
        fn field_copy_matcher_ignores_other_kinds(name in ".*", kind in "[A-Za-z]{1,24}") {
            let m = FieldCopyMatcher::new(&name);
            let reference = Patch::patch_set(name.clone());
            let other = Patch::Other { kind };
            prop_assert!(!m.matches(&reference));
            prop_assert!(!m.matches(&other));
        }

        #[test]
        fn patch_set_matcher_ignores_other_kinds(name in ".*", kind in "[A-Za-z]{1,24}") {
            let m = PatchSetMatcher::new(&name);
            let copy = Patch::to_composite(name.clone(), name.clone());
            let other = Patch::Other { kind };
            prop_assert!(!m.matches(&copy));
            prop_assert!(!m.matches(&other));
        }
    }
}
