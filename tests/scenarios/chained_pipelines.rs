//! A scheduled pipeline whose completion triggers another

use crate::helpers::{render, ProjectFixture, DEPLOY, NIGHTLY};
use pipeline_graph::{build_pipeline_graph, GraphContext, GraphNode, TriggerKind};

#[test]
fn schedule_then_chain_forms_one_component() {
    let fixture = ProjectFixture::new()
        .manifest("app", "acme/app")
        .workflow("nightly.yml", NIGHTLY)
        .workflow("deploy.yml", DEPLOY);

    let ctx = GraphContext::new(vec![fixture.load()]).unwrap();
    let graph = build_pipeline_graph(&ctx, None).unwrap();
    assert_eq!(graph.nodes().len(), 3);
    assert_eq!(graph.edges().len(), 2);

    let components = graph.connected_components().unwrap();
    assert_eq!(components.len(), 1);

    let keys: Vec<_> = components[0].nodes().iter().map(|n| n.key()).collect();
    assert_eq!(
        keys,
        vec![
            "trigger:schedule:0 0 * * *",
            "pipeline:app/.github/workflows/nightly.yml",
            "pipeline:app/.github/workflows/deploy.yml",
        ]
    );
}

#[test]
fn renders_full_diagram() {
    let fixture = ProjectFixture::new()
        .manifest("app", "acme/app")
        .workflow("nightly.yml", NIGHTLY)
        .workflow("deploy.yml", DEPLOY);

    let diagrams = render(&[&fixture], None);
    assert_eq!(diagrams.len(), 1);

    let expected = r#"```mermaid
flowchart LR
  a00(("cron 0 0 * * *"))
  subgraph a01 ["Nightly"]
    a02("Build")
  end
  click a01 href "https://github.com/acme/app/blob/HEAD/.github/workflows/nightly.yml" _blank
  subgraph a03 ["Deploy"]
    a04("Ship")
  end
  click a03 href "https://github.com/acme/app/blob/HEAD/.github/workflows/deploy.yml" _blank
  a00 --> a01
  a01-- completed -->a03
```
"#;
    assert_eq!(diagrams[0].text, expected);
}

#[test]
fn filter_keeps_chained_parent() {
    let fixture = ProjectFixture::new()
        .manifest("app", "acme/app")
        .workflow("nightly.yml", NIGHTLY)
        .workflow("deploy.yml", DEPLOY);

    let diagrams = render(&[&fixture], Some(TriggerKind::WorkflowRun));
    assert_eq!(diagrams.len(), 1);
    let text = &diagrams[0].text;
    assert!(text.contains(r#"["Nightly"]"#));
    assert!(text.contains(r#"["Deploy"]"#));
    assert!(!text.contains("cron"));
}
