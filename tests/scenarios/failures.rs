//! Fatal lookup failures and malformed input

use crate::helpers::{ProjectFixture, DEPLOY};
use pipeline_graph::{render_projects, GraphError, Project};

#[test]
fn unknown_parent_pipeline_aborts() {
    let fixture = ProjectFixture::new().manifest("app", "acme/app").workflow("deploy.yml", DEPLOY);

    let err = render_projects(vec![fixture.load()], None).unwrap_err();
    match err {
        GraphError::UnknownPipeline { name, referenced_by } => {
            assert_eq!(name, "Nightly");
            assert_eq!(referenced_by, "Deploy");
        }
        other => panic!("expected UnknownPipeline, got {:?}", other),
    }
}

#[test]
fn unknown_needed_step_aborts() {
    let fixture = ProjectFixture::new().manifest("app", "acme/app").workflow(
        "ci.yml",
        "name: CI\non: push\njobs:\n  deploy:\n    needs: [build]\n",
    );

    let err = render_projects(vec![fixture.load()], None).unwrap_err();
    assert!(matches!(err, GraphError::UnknownStep { ref step, ref needs, .. } if step == "deploy" && needs == "build"));
    assert!(err.to_string().contains("needs unknown step 'build'"));
}

#[test]
fn malformed_schedule_fails_to_load() {
    let fixture = ProjectFixture::new().workflow("nightly.yml", "on:\n  schedule: daily\n");

    let err = Project::load(fixture.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("nightly.yml"));
    assert!(message.contains("schedule"));
}

#[test]
fn same_named_projects_abort() {
    let alpha = ProjectFixture::new()
        .manifest("app", "acme/alpha")
        .workflow("ci.yml", "name: Alpha\non: workflow_dispatch\n");
    let beta = ProjectFixture::new()
        .manifest("app", "acme/beta")
        .workflow("ci.yml", "name: Beta\non: workflow_dispatch\n");

    let err = render_projects(vec![alpha.load(), beta.load()], None).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateProject { ref name, .. } if name == "app"));
    assert!(err.to_string().contains("both named 'app'"));
}
