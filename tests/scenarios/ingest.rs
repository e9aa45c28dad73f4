//! Loading projects from disk

use crate::helpers::{ProjectFixture, DEPLOY, NIGHTLY};
use pipeline_graph::Project;

#[test]
fn loads_manifest_and_workflows_in_file_order() {
    let fixture = ProjectFixture::new()
        .manifest("widgets", "git+https://github.com/acme/widgets.git")
        .workflow("nightly.yml", NIGHTLY)
        .workflow("deploy.yaml", DEPLOY)
        .workflow("notes.txt", "not a workflow");

    let project = fixture.load();
    assert_eq!(project.name, "widgets");
    assert_eq!(project.url.as_deref(), Some("https://github.com/acme/widgets"));

    let names: Vec<_> = project.pipelines.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Deploy", "Nightly"]);

    let nightly = project.pipeline("Nightly").unwrap();
    assert_eq!(nightly.path, ".github/workflows/nightly.yml");
    assert_eq!(
        nightly.link.as_deref(),
        Some("https://github.com/acme/widgets/blob/HEAD/.github/workflows/nightly.yml")
    );
}

#[test]
fn project_without_manifest_uses_directory_name() {
    let fixture = ProjectFixture::new().workflow("ci.yml", "on: push\n");
    let project = fixture.load();

    let expected = fixture
        .path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert_eq!(project.name, expected);
    assert!(project.url.is_none());
    assert_eq!(project.pipelines[0].name, "ci");
}

#[test]
fn project_without_workflows_is_empty() {
    let fixture = ProjectFixture::new().manifest("bare", "acme/bare");
    let project = Project::load(fixture.path()).unwrap();
    assert!(project.pipelines.is_empty());
}
