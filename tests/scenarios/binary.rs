//! Exit status and stream usage of the pipeline-graph binary

use crate::helpers::{ProjectFixture, DEPLOY, NIGHTLY};
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], project: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipeline-graph"))
        .args(args)
        .arg(project)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("run pipeline-graph")
}

#[test]
fn unknown_parent_exits_with_diagnostic_and_no_output() {
    let fixture = ProjectFixture::new().manifest("app", "acme/app").workflow("deploy.yml", DEPLOY);

    let output = run(&[], fixture.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to build pipeline graph"));
    assert!(stderr.contains("caused by:"));
    assert!(stderr.contains("unknown pipeline 'Nightly'"));
}

#[test]
fn debug_prints_identifier_table_to_stderr() {
    let fixture = ProjectFixture::new()
        .manifest("app", "acme/app")
        .workflow("nightly.yml", NIGHTLY)
        .workflow("deploy.yml", DEPLOY);

    let output = run(&["--debug"], fixture.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("```mermaid\nflowchart LR\n"));
    assert!(!stdout.contains("Identifiers for diagram"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Identifiers for diagram 1 (5 allocated)"));
    assert!(stderr.contains("trigger:schedule:0 0 * * *"));
    assert!(stderr.contains("pipeline:app/.github/workflows/deploy.yml"));
}
