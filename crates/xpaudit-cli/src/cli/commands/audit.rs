use anyhow::Context;
use std::path::PathBuf;
use xpaudit_core::report::{to_json_string, write_reports};
use xpaudit_core::{audit_all, load_paths, resolve_config, AuditConfig, AuditReport, OutputFormat};

use crate::cli::args::AuditArgs;
use crate::exit_codes;

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub fail_on_flagged: bool,
}

impl Settings {
    pub(crate) fn merge(cfg: &AuditConfig, args: &AuditArgs) -> Self {
        Self {
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| cfg.output_dir.clone()),
            format: args.format.map(OutputFormat::from).unwrap_or(cfg.format),
            fail_on_flagged: args
                .fail_on_flagged_override()
                .unwrap_or(cfg.fail_on_flagged),
        }
    }
}

pub fn run(args: AuditArgs) -> anyhow::Result<i32> {
    let cfg = match resolve_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let settings = Settings::merge(&cfg, &args);

    let comps = match load_paths(&args.paths) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load compositions: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    tracing::info!(compositions = comps.len(), "loaded compositions");

    let report = audit_all(&comps);

    match settings.format {
        OutputFormat::Json => {
            println!("{}", to_json_string(&report)?);
        }
        OutputFormat::Text => {
            let written = write_reports(&settings.output_dir, &report, &cfg.files)
                .context("writing report tables")?;
            for path in &written {
                eprintln!("Report written to {}", path.display());
            }
        }
    }
    print_summary(&report);

    Ok(decide_exit(&report, settings.fail_on_flagged))
}

fn decide_exit(report: &AuditReport, fail_on_flagged: bool) -> i32 {
    if fail_on_flagged && report.has_flagged() {
        exit_codes::FLAGGED
    } else {
        exit_codes::OK
    }
}

fn print_summary(report: &AuditReport) {
    let s = report.summary();
    eprintln!(
        "Compositions: audited={} flagged={} skipped={} | Resources: audited={} flagged={}",
        s.compositions, s.flagged_compositions, s.skipped, s.resources, s.flagged_resources
    );
    for c in report.resources_mode.iter().filter(|c| c.is_flagged) {
        let names: Vec<&str> = c.flagged_resources().map(|r| r.name.as_str()).collect();
        eprintln!("  ✖ {} (resources: {})", c.name, names.join(", "));
    }
    for c in report.pipeline_mode.iter().filter(|c| c.is_flagged) {
        eprintln!("  ✖ {} (pipeline does not use function-patch-and-transform)", c.name);
    }
    for c in &report.skipped {
        eprintln!("  ⚠️  {} skipped (unsupported mode {})", c.name, c.mode);
    }
}
