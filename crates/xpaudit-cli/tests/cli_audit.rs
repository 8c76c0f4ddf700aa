#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../xpaudit-core/tests/fixtures/compositions.yaml")
}

fn xpaudit() -> Command {
    let mut cmd = Command::cargo_bin("xpaudit").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("XPAUDIT_OUTPUT_DIR")
        .env_remove("XPAUDIT_FORMAT");
    cmd
}

#[test]
fn audit_writes_tables() {
    let dir = tempdir().unwrap();
    xpaudit()
        .current_dir(dir.path())
        .arg("audit")
        .arg(fixture())
        .arg("--output-dir")
        .arg("out")
        .assert()
        .success()
        .stderr(predicate::str::contains("flagged=3"));

    let compositions = fs::read_to_string(dir.path().join("out/resourceCompositions.txt")).unwrap();
    assert!(compositions.starts_with("RESOURCE MODE COMPOSITIONS\n"));
    assert!(compositions.contains("0\txbuckets-unpatched\tfalse\t\ttrue"));

    let resources = fs::read_to_string(dir.path().join("out/resources.txt")).unwrap();
    assert!(resources.contains("1\txnetworks-patchset\t1\tsubnet\ttrue\tfalse"));

    let pipeline = fs::read_to_string(dir.path().join("out/pipelineCompositions.txt")).unwrap();
    assert!(pipeline.contains("0\txclusters-templated\tfalse\ttrue"));
}

#[test]
fn fail_on_flagged_exits_one() {
    let dir = tempdir().unwrap();
    xpaudit()
        .current_dir(dir.path())
        .arg("audit")
        .arg(fixture())
        .arg("--fail-on-flagged")
        .assert()
        .code(1);
}

#[test]
fn json_format_prints_report_to_stdout() {
    let dir = tempdir().unwrap();
    let out = xpaudit()
        .current_dir(dir.path())
        .args(["audit", "--format", "json"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["summary"]["compositions"], 6);
    assert_eq!(json["resources_mode"][1]["matching_patch_set"]["name"], "status-propagation");
    assert!(!dir.path().join("resources.txt").exists());
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("xpaudit.yaml"),
        "version: 1\noutput_dir: reports\nfail_on_flagged: true\nfiles:\n  resources: crs.tsv\n",
    )
    .unwrap();

    xpaudit()
        .current_dir(dir.path())
        .arg("audit")
        .arg(fixture())
        .assert()
        .code(1);
    assert!(dir.path().join("reports/crs.tsv").is_file());
}

#[test]
fn no_fail_on_flagged_overrides_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("xpaudit.yaml"),
        "version: 1\nfail_on_flagged: true\n",
    )
    .unwrap();

    xpaudit()
        .current_dir(dir.path())
        .arg("audit")
        .arg(fixture())
        .arg("--no-fail-on-flagged")
        .assert()
        .code(0);
}

#[test]
fn bad_config_version_is_config_error() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("custom.yaml");
    fs::write(&cfg, "version: 9\n").unwrap();

    xpaudit()
        .current_dir(dir.path())
        .arg("audit")
        .arg(fixture())
        .arg("--config")
        .arg(&cfg)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported config version 9"));
}

#[test]
fn missing_input_is_config_error() {
    let dir = tempdir().unwrap();
    xpaudit()
        .current_dir(dir.path())
        .args(["audit", "does-not-exist.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load compositions"));
}

#[test]
fn explain_prints_verdicts() {
    xpaudit()
        .arg("explain")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("MatchingPatchSetName: status-propagation"))
        .stdout(predicate::str::contains("UsesPatchAndTransform: false"));
}

#[test]
fn version_prints_package_version() {
    xpaudit()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
