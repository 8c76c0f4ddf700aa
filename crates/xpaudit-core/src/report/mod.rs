pub mod table;

pub use table::{render_pipeline_compositions, render_resource_compositions, render_resources};

use crate::config::ReportFiles;
use crate::errors::ReportError;
use crate::verdict::{AuditReport, AuditSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON document printed by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub tool_version: &'static str,
    pub summary: AuditSummary,
    #[serde(flatten)]
    pub report: &'a AuditReport,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a AuditReport) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            summary: report.summary(),
            report,
        }
    }
}

pub fn to_json_string(report: &AuditReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(report))?)
}

/// Write the three tables into `dir`, creating it if needed.
///
/// Returns the written paths in the order resource compositions, resources,
/// pipeline compositions.
pub fn write_reports(
    dir: &Path,
    report: &AuditReport,
    files: &ReportFiles,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::write(dir, e))?;

    let outputs = [
        (
            &files.resource_compositions,
            render_resource_compositions(&report.resources_mode),
        ),
        (&files.resources, render_resources(&report.resources_mode)),
        (
            &files.pipeline_compositions,
            render_pipeline_compositions(&report.pipeline_mode),
        ),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, body) in outputs {
        let path = dir.join(name);
        std::fs::write(&path, body).map_err(|e| ReportError::write(&path, e))?;
        info!(path = %path.display(), "wrote report");
        written.push(path);
    }
    Ok(written)
}
