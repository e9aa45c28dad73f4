//! Splitting the graph into independent diagrams

use crate::helpers::{render, ProjectFixture};

const CI: &str = r#"
name: CI
on:
  pull_request:
  push:
    branches: [main]
jobs:
  test:
    name: "Test (${{ matrix.os }})"
    strategy:
      matrix:
        os: [linux, mac]
"#;

const MANUAL: &str = r#"
name: Manual
on: workflow_dispatch
jobs:
  run: {}
"#;

#[test]
fn unrelated_projects_render_separately() {
    let a = ProjectFixture::new().manifest("a", "acme/a").workflow("ci.yml", CI);
    let b = ProjectFixture::new().manifest("b", "acme/b").workflow("ci.yml", CI);

    let diagrams = render(&[&a, &b], None);
    assert_eq!(diagrams.len(), 2);

    // every diagram has its own identifier sequence
    for diagram in &diagrams {
        assert!(diagram.text.contains(r#"a00(("a: pull request"))"#) || diagram.text.contains(r#"a00(("b: pull request"))"#));
        assert!(diagram.text.contains(r#"("Test (linux)")"#));
        assert!(diagram.text.contains(r#"("Test (mac)")"#));
    }
}

#[test]
fn shared_manual_trigger_joins_projects() {
    let a = ProjectFixture::new().manifest("a", "acme/a").workflow("manual.yml", MANUAL);
    let b = ProjectFixture::new().manifest("b", "acme/b").workflow("manual.yml", MANUAL);

    let diagrams = render(&[&a, &b], None);
    assert_eq!(diagrams.len(), 1);
    assert_eq!(diagrams[0].text.matches("manual dispatch").count(), 1);
    assert_eq!(diagrams[0].text.matches(r#"["Manual"]"#).count(), 2);
}

#[test]
fn two_roots_reaching_one_pipeline_share_a_component() {
    let a = ProjectFixture::new().manifest("a", "acme/a").workflow("ci.yml", CI);

    let diagrams = render(&[&a], None);
    assert_eq!(diagrams.len(), 1);
    assert!(diagrams[0].text.contains("a: pull request"));
    assert!(diagrams[0].text.contains("a: push main"));
    assert_eq!(diagrams[0].text.matches(r#"["CI"]"#).count(), 1);
}

#[test]
fn untriggered_pipeline_produces_no_output() {
    let a = ProjectFixture::new()
        .manifest("a", "acme/a")
        .workflow("idle.yml", "name: Idle\njobs:\n  noop: {}\n");

    let diagrams = render(&[&a], None);
    assert!(diagrams.is_empty());
}
