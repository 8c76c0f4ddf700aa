//! Typed view of `apiextensions.crossplane.io/v1` Compositions.
//!
//! Only the parts the audit reads are modelled. Everything else in a
//! Composition document (bases, connection details, readiness checks,
//! function inputs) is ignored during decoding.

use crate::errors::{CompositionError, PatchError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PATCH_TYPE_TO_COMPOSITE_FIELD_PATH: &str = "ToCompositeFieldPath";
pub const PATCH_TYPE_PATCH_SET: &str = "PatchSet";
/// Crossplane's default when a patch omits `type`.
pub const PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH: &str = "FromCompositeFieldPath";

/// How a Composition builds its composed resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompositionMode {
    Resources,
    Pipeline,
    /// Any mode this tool does not know about, kept verbatim.
    Other(String),
}

impl CompositionMode {
    pub fn as_str(&self) -> &str {
        match self {
            CompositionMode::Resources => "Resources",
            CompositionMode::Pipeline => "Pipeline",
            CompositionMode::Other(s) => s,
        }
    }
}

impl From<String> for CompositionMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Resources" => CompositionMode::Resources,
            "Pipeline" => CompositionMode::Pipeline,
            _ => CompositionMode::Other(s),
        }
    }
}

impl From<CompositionMode> for String {
    fn from(mode: CompositionMode) -> Self {
        match mode {
            CompositionMode::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for CompositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single patch declaration.
///
/// Each variant carries only the fields that are valid for its kind, so a
/// matcher can never read a destination path off a patch-set reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPatch", into = "RawPatch")]
pub enum Patch {
    /// Copies `from_field_path` on the composed resource to `to_field_path`
    /// on the composite.
    ToCompositeFieldPath {
        from_field_path: String,
        to_field_path: String,
    },
    /// Pulls in the patches of a named composition-level patch set.
    PatchSet { patch_set_name: String },
    /// Every other Crossplane patch type. The audit never matches these.
    Other { kind: String },
}

impl Patch {
    pub fn to_composite(from: impl Into<String>, to: impl Into<String>) -> Self {
        Patch::ToCompositeFieldPath {
            from_field_path: from.into(),
            to_field_path: to.into(),
        }
    }

    pub fn patch_set(name: impl Into<String>) -> Self {
        Patch::PatchSet {
            patch_set_name: name.into(),
        }
    }

    /// The Crossplane `type` string for this patch.
    pub fn kind(&self) -> &str {
        match self {
            Patch::ToCompositeFieldPath { .. } => PATCH_TYPE_TO_COMPOSITE_FIELD_PATH,
            Patch::PatchSet { .. } => PATCH_TYPE_PATCH_SET,
            Patch::Other { kind } => kind,
        }
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::ToCompositeFieldPath {
                from_field_path,
                to_field_path,
            } => write!(
                f,
                "type={} from={} to={}",
                self.kind(),
                from_field_path,
                to_field_path
            ),
            Patch::PatchSet { patch_set_name } => {
                write!(f, "type={} patchSetName={}", self.kind(), patch_set_name)
            }
            Patch::Other { kind } => write!(f, "type={}", kind),
        }
    }
}

/// Wire shape of a patch, as it appears in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from_field_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_field_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patch_set_name: Option<String>,
}

impl TryFrom<RawPatch> for Patch {
    type Error = PatchError;

    fn try_from(raw: RawPatch) -> Result<Self, Self::Error> {
        let kind = raw
            .kind
            .unwrap_or_else(|| PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH.to_string());
        match kind.as_str() {
            PATCH_TYPE_TO_COMPOSITE_FIELD_PATH => {
                let from_field_path = raw.from_field_path.ok_or(PatchError::MissingField {
                    kind: PATCH_TYPE_TO_COMPOSITE_FIELD_PATH,
                    field: "fromFieldPath",
                })?;
                let to_field_path = raw.to_field_path.ok_or(PatchError::MissingField {
                    kind: PATCH_TYPE_TO_COMPOSITE_FIELD_PATH,
                    field: "toFieldPath",
                })?;
                Ok(Patch::ToCompositeFieldPath {
                    from_field_path,
                    to_field_path,
                })
            }
            PATCH_TYPE_PATCH_SET => {
                let patch_set_name = raw.patch_set_name.ok_or(PatchError::MissingField {
                    kind: PATCH_TYPE_PATCH_SET,
                    field: "patchSetName",
                })?;
                Ok(Patch::PatchSet { patch_set_name })
            }
            _ => Ok(Patch::Other { kind }),
        }
    }
}

impl From<Patch> for RawPatch {
    fn from(patch: Patch) -> Self {
        match patch {
            Patch::ToCompositeFieldPath {
                from_field_path,
                to_field_path,
            } => RawPatch {
                kind: Some(PATCH_TYPE_TO_COMPOSITE_FIELD_PATH.to_string()),
                from_field_path: Some(from_field_path),
                to_field_path: Some(to_field_path),
                patch_set_name: None,
            },
            Patch::PatchSet { patch_set_name } => RawPatch {
                kind: Some(PATCH_TYPE_PATCH_SET.to_string()),
                patch_set_name: Some(patch_set_name),
                ..RawPatch::default()
            },
            Patch::Other { kind } => RawPatch {
                kind: Some(kind),
                ..RawPatch::default()
            },
        }
    }
}

/// A named, reusable list of patches defined once per Composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSet {
    pub name: String,
    #[serde(default)]
    pub patches: Vec<Patch>,
}

/// One entry of `spec.resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedTemplate {
    pub name: String,
    #[serde(default)]
    pub patches: Vec<Patch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReference {
    pub name: String,
}

/// One entry of `spec.pipeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    pub step: String,
    pub function_ref: FunctionReference,
}

/// A decoded Composition. Read-only for the lifetime of an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawComposition")]
pub struct Composition {
    pub name: String,
    pub mode: CompositionMode,
    pub resources: Vec<ComposedTemplate>,
    pub patch_sets: Vec<PatchSet>,
    pub pipeline: Vec<PipelineStep>,
}

impl Composition {
    /// An empty composition in the given mode; fill the lists directly.
    pub fn new(name: impl Into<String>, mode: CompositionMode) -> Self {
        Self {
            name: name.into(),
            mode,
            resources: Vec::new(),
            patch_sets: Vec::new(),
            pipeline: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawComposition {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpec {
    mode: Option<CompositionMode>,
    #[serde(default)]
    resources: Vec<ComposedTemplate>,
    #[serde(default)]
    patch_sets: Vec<PatchSet>,
    #[serde(default)]
    pipeline: Vec<PipelineStep>,
}

impl TryFrom<RawComposition> for Composition {
    type Error = CompositionError;

    fn try_from(raw: RawComposition) -> Result<Self, Self::Error> {
        let name = raw.metadata.name.ok_or(CompositionError::MissingName)?;
        let mode = raw
            .spec
            .mode
            .ok_or_else(|| CompositionError::MissingMode { name: name.clone() })?;
        Ok(Composition {
            name,
            mode,
            resources: raw.spec.resources,
            patch_sets: raw.spec.patch_sets,
            pipeline: raw.spec.pipeline,
        })
    }
}
