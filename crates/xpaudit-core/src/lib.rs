pub mod audit;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod model;
pub mod report;
pub mod resolve;
pub mod source;
pub mod verdict;

// Convenience re-exports
pub use audit::{
    audit_all, audit_composition, audit_pipeline_composition, audit_resource,
    audit_resources_composition,
};
pub use config::{load_config, resolve_config, AuditConfig, OutputFormat, ReportFiles};
pub use errors::{ConfigError, LoadError, ReportError};
pub use matcher::{
    FieldCopyMatcher, PatchMatcher, PatchSetMatcher, FUNCTION_PATCH_AND_TRANSFORM,
    STATUS_AT_PROVIDER_PATH, STATUS_CONDITIONS_PATH,
};
pub use model::{ComposedTemplate, Composition, CompositionMode, Patch, PatchSet, PipelineStep};
pub use resolve::matching_patch_set_index;
pub use source::{load_path, load_paths, load_str};
pub use verdict::{
    AuditReport, AuditSummary, CompositionVerdict, PipelineCompositionVerdict, ResourceVerdict,
    ResourcesCompositionVerdict,
};
