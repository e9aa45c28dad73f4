//! Test utility functions for pipeline-graph

use pipeline_graph::{render_projects, Diagram, Project, TriggerKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A project laid out on disk in a temporary directory
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a package.json with the given name and repository
    pub fn manifest(self, name: &str, repository: &str) -> Self {
        let json = serde_json::json!({ "name": name, "repository": repository });
        fs::write(self.path().join("package.json"), json.to_string()).expect("write manifest");
        self
    }

    /// Write a workflow definition under .github/workflows
    pub fn workflow(self, file: &str, yaml: &str) -> Self {
        let dir = self.path().join(".github/workflows");
        fs::create_dir_all(&dir).expect("create workflow dir");
        fs::write(dir.join(file), yaml).expect("write workflow");
        self
    }

    pub fn load(&self) -> Project {
        Project::load(self.path()).expect("load project")
    }
}

/// Load every fixture and render it
pub fn render(fixtures: &[&ProjectFixture], filter: Option<TriggerKind>) -> Vec<Diagram> {
    let projects = fixtures.iter().map(|f| f.load()).collect();
    render_projects(projects, filter).expect("render projects")
}

pub const NIGHTLY: &str = r#"
name: Nightly
on:
  schedule:
    - cron: "0 0 * * *"
jobs:
  build:
    name: Build
"#;

pub const DEPLOY: &str = r#"
name: Deploy
on:
  workflow_run:
    workflows: [Nightly]
    types: [completed]
jobs:
  ship:
    name: Ship
"#;
