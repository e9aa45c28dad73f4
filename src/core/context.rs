//! Read-only registries handed to the graph builder

use crate::core::{
    pipeline::{Pipeline, Project},
    trigger::{Trigger, TriggerRegistry},
};
use crate::graph::GraphError;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// All projects, pipelines and resolved triggers of one run.
///
/// Built once after ingest; nothing is mutated afterwards.
#[derive(Debug)]
pub struct GraphContext {
    projects: Vec<Project>,
    triggers: TriggerRegistry,

    /// Pipeline key -> triggers resolved from its activation conditions
    activations: HashMap<String, Vec<Rc<Trigger>>>,
}

impl GraphContext {
    /// Take ownership of the ingested projects and resolve every trigger.
    ///
    /// Project names scope pipeline and trigger keys, so two projects
    /// sharing a name are rejected.
    pub fn new(projects: Vec<Project>) -> Result<Self, GraphError> {
        let mut roots: HashMap<&str, &Project> = HashMap::new();
        for project in &projects {
            if let Some(first) = roots.insert(&project.name, project) {
                return Err(GraphError::DuplicateProject {
                    name: project.name.clone(),
                    first: first.path.display().to_string(),
                    second: project.path.display().to_string(),
                });
            }
        }

        let mut triggers = TriggerRegistry::new();
        let mut activations = HashMap::new();

        for project in &projects {
            for pipeline in &project.pipelines {
                let resolved: Vec<Rc<Trigger>> = pipeline
                    .activation
                    .iter()
                    .flat_map(|config| triggers.resolve(config, project))
                    .collect();
                debug!(
                    "Pipeline '{}' resolved to {} triggers",
                    pipeline.name,
                    resolved.len()
                );
                activations.insert(pipeline.key.clone(), resolved);
            }
        }

        Ok(Self {
            projects,
            triggers,
            activations,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Every pipeline, in project then definition order
    pub fn pipelines(&self) -> impl Iterator<Item = &Rc<Pipeline>> {
        self.projects.iter().flat_map(|p| p.pipelines.iter())
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    /// Triggers resolved for `pipeline`
    pub fn triggers_for(&self, pipeline: &Pipeline) -> &[Rc<Trigger>] {
        self.activations
            .get(&pipeline.key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the pipeline named `name` as referenced by `from`.
    ///
    /// The referencing pipeline's own project is searched first.
    pub fn find_pipeline(&self, name: &str, from: &Pipeline) -> Result<&Rc<Pipeline>, GraphError> {
        let own = self.projects.iter().find(|p| p.name == from.project);
        own.and_then(|p| p.pipeline(name))
            .or_else(|| self.projects.iter().find_map(|p| p.pipeline(name)))
            .ok_or_else(|| GraphError::UnknownPipeline {
                name: name.to_string(),
                referenced_by: from.name.clone(),
            })
    }
}
