//! Project and pipeline domain models

use crate::core::{
    config::{ProjectManifest, TriggerConfig, WorkflowConfig},
    step::Step,
    trigger::TriggerKind,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Directory holding workflow definitions, relative to a project root
pub const WORKFLOW_DIR: &str = ".github/workflows";

/// A project and the pipelines it defines
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,

    /// Browsable repository URL, if known
    pub url: Option<String>,

    /// Project root on disk
    pub path: PathBuf,

    /// Pipelines in definition-file order
    pub pipelines: Vec<Rc<Pipeline>>,
}

/// A pipeline definition
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Identity key, unique across projects
    pub key: String,

    /// Pipeline name
    pub name: String,

    /// Definition file, relative to the project root
    pub path: String,

    /// Name of the owning project
    pub project: String,

    pub link: Option<String>,

    /// Steps in declaration order
    pub steps: Vec<Rc<Step>>,

    /// Recognized activation conditions
    pub activation: Vec<TriggerConfig>,
}

impl Pipeline {
    /// Create a pipeline from a workflow definition
    pub fn from_config(config: &WorkflowConfig, path: &str, project: &Project) -> Result<Self> {
        let key = format!("pipeline:{}/{}", project.name, path);
        let name = config.name.clone().unwrap_or_else(|| file_stem(path));

        let steps = config
            .job_configs()?
            .iter()
            .map(|(id, job)| Rc::new(Step::from_config(&key, id, job)))
            .collect();

        Ok(Pipeline {
            link: project.url.as_ref().map(|url| format!("{}/blob/HEAD/{}", url, path)),
            key,
            name,
            path: path.to_string(),
            project: project.name.clone(),
            steps,
            activation: config.activation()?,
        })
    }

    /// Get a step by job id
    pub fn step(&self, id: &str) -> Option<&Rc<Step>> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Whether any declared condition is of `kind`
    pub fn is_activated_by(&self, kind: TriggerKind) -> bool {
        self.activation.iter().any(|t| t.kind() == kind)
    }

    /// Pipelines whose completion activates this one, with the edge label
    pub fn parents(&self) -> impl Iterator<Item = (&str, Option<String>)> + '_ {
        self.activation.iter().flat_map(|trigger| match trigger {
            TriggerConfig::WorkflowRun { workflows, types } => {
                let label = (!types.is_empty()).then(|| types.join(", "));
                workflows
                    .iter()
                    .map(move |w| (w.as_str(), label.clone()))
                    .collect::<Vec<_>>()
            }
            _ => Vec::new(),
        })
    }
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>, url: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url,
            path: path.into(),
            pipelines: Vec::new(),
        }
    }

    /// Load a project's metadata and workflow definitions from disk
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let manifest = ProjectManifest::from_dir(root)?;

        let name = manifest
            .as_ref()
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| dir_name(root));
        let url = manifest.as_ref().and_then(|m| m.repository_url());

        let mut project = Project::new(name, url, root);

        let workflow_dir = root.join(WORKFLOW_DIR);
        if !workflow_dir.is_dir() {
            warn!(
                "No workflow directory in {}, project '{}' has no pipelines",
                root.display(),
                project.name
            );
            return Ok(project);
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&workflow_dir)
            .with_context(|| format!("Failed to read {}", workflow_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && matches!(p.extension().and_then(|e| e.to_str()), Some("yml" | "yaml"))
            })
            .collect();
        files.sort();

        for file in files {
            let relative = file
                .strip_prefix(root)
                .unwrap_or(&file)
                .to_string_lossy()
                .replace('\\', "/");
            let config = WorkflowConfig::from_file(&file)
                .with_context(|| format!("Failed to load workflow {}", file.display()))?;
            let pipeline = Pipeline::from_config(&config, &relative, &project)
                .with_context(|| format!("Invalid workflow {}", file.display()))?;
            debug!(
                "Loaded pipeline '{}' ({} steps, {} triggers)",
                pipeline.name,
                pipeline.steps.len(),
                pipeline.activation.len()
            );
            project.add_pipeline(pipeline);
        }

        info!(
            "Loaded project '{}' with {} pipelines",
            project.name,
            project.pipelines.len()
        );
        Ok(project)
    }

    pub fn add_pipeline(&mut self, pipeline: Pipeline) -> Rc<Pipeline> {
        let pipeline = Rc::new(pipeline);
        self.pipelines.push(pipeline.clone());
        pipeline
    }

    /// Find a pipeline by name
    pub fn pipeline(&self, name: &str) -> Option<&Rc<Pipeline>> {
        self.pipelines.iter().find(|p| p.name == name)
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn dir_name(root: &Path) -> String {
    let canonical = root.canonicalize().ok();
    canonical
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
