//! Workflow and project configuration from YAML / JSON

use crate::core::trigger::TriggerKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// A value that may be written either as a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl Default for StringOrList {
    fn default() -> Self {
        StringOrList::Many(Vec::new())
    }
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }
}

/// Top-level workflow definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Workflow display name (falls back to the file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Activation conditions, as written
    #[serde(default)]
    pub on: Value,

    /// Jobs keyed by job id, in declaration order
    #[serde(default)]
    pub jobs: Mapping,
}

/// Job configuration as defined in YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    /// Human-readable job name
    #[serde(default)]
    pub name: Option<String>,

    /// Job ids this job depends on
    #[serde(default)]
    pub needs: StringOrList,

    /// Build strategy (only the matrix is used)
    #[serde(default)]
    pub strategy: Option<StrategyConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub matrix: Option<Value>,
}

/// A recognized activation condition with its distinguishing data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerConfig {
    WorkflowDispatch,
    Schedule { crons: Vec<String> },
    Push { branches: Vec<String>, tags: Vec<String> },
    PullRequest,
    MergeGroup,
    Issues,
    Label,
    Release,
    WorkflowRun { workflows: Vec<String>, types: Vec<String> },
}

#[derive(Debug, Deserialize)]
struct ScheduleEntry {
    cron: String,
}

#[derive(Debug, Default, Deserialize)]
struct PushFilter {
    #[serde(default)]
    branches: StringOrList,
    #[serde(default)]
    tags: StringOrList,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunFilter {
    workflows: StringOrList,
    #[serde(default)]
    types: StringOrList,
}

impl TriggerConfig {
    /// The condition kind this config was declared under
    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerConfig::WorkflowDispatch => TriggerKind::WorkflowDispatch,
            TriggerConfig::Schedule { .. } => TriggerKind::Schedule,
            TriggerConfig::Push { .. } => TriggerKind::Push,
            TriggerConfig::PullRequest => TriggerKind::PullRequest,
            TriggerConfig::MergeGroup => TriggerKind::MergeGroup,
            TriggerConfig::Issues => TriggerKind::Issues,
            TriggerConfig::Label => TriggerKind::Label,
            TriggerConfig::Release => TriggerKind::Release,
            TriggerConfig::WorkflowRun { .. } => TriggerKind::WorkflowRun,
        }
    }

    /// Decode one `on:` entry. Unrecognized kinds yield `Ok(None)`.
    pub fn parse(kind: &str, data: &Value) -> Result<Option<Self>> {
        let Some(kind) = TriggerKind::parse(kind) else {
            debug!("Ignoring unrecognized trigger kind '{}'", kind);
            return Ok(None);
        };

        let config = match kind {
            TriggerKind::WorkflowDispatch => TriggerConfig::WorkflowDispatch,
            TriggerKind::Schedule => {
                let entries: Vec<ScheduleEntry> = serde_yaml::from_value(data.clone())
                    .context("'schedule' must be a list of { cron } entries")?;
                TriggerConfig::Schedule {
                    crons: entries.into_iter().map(|e| e.cron).collect(),
                }
            }
            TriggerKind::Push => {
                let filter: PushFilter = if data.is_null() {
                    PushFilter::default()
                } else {
                    serde_yaml::from_value(data.clone())
                        .context("'push' filters must be a mapping")?
                };
                TriggerConfig::Push {
                    branches: filter.branches.into_vec(),
                    tags: filter.tags.into_vec(),
                }
            }
            TriggerKind::PullRequest => TriggerConfig::PullRequest,
            TriggerKind::MergeGroup => TriggerConfig::MergeGroup,
            TriggerKind::Issues => TriggerConfig::Issues,
            TriggerKind::Label => TriggerConfig::Label,
            TriggerKind::Release => TriggerConfig::Release,
            TriggerKind::WorkflowRun => {
                let filter: WorkflowRunFilter = serde_yaml::from_value(data.clone())
                    .context("'workflow_run' requires a 'workflows' list")?;
                TriggerConfig::WorkflowRun {
                    workflows: filter.workflows.into_vec(),
                    types: filter.types.into_vec(),
                }
            }
        };

        Ok(Some(config))
    }
}

impl WorkflowConfig {
    /// Load a workflow definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a workflow definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: WorkflowConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Normalize `on:` into (kind, data) pairs in declaration order.
    ///
    /// `on: push`, `on: [push, pull_request]` and the mapping form are all accepted.
    pub fn raw_activation(&self) -> Vec<(String, Value)> {
        match &self.on {
            Value::String(kind) => vec![(kind.clone(), Value::Null)],
            Value::Sequence(kinds) => kinds
                .iter()
                .filter_map(|k| k.as_str())
                .map(|k| (k.to_string(), Value::Null))
                .collect(),
            Value::Mapping(map) => map
                .iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v.clone())))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Decode every recognized activation condition
    pub fn activation(&self) -> Result<Vec<TriggerConfig>> {
        let mut triggers = Vec::new();
        for (kind, data) in self.raw_activation() {
            let parsed = TriggerConfig::parse(&kind, &data)
                .with_context(|| format!("Invalid '{}' trigger", kind))?;
            triggers.extend(parsed);
        }
        Ok(triggers)
    }

    /// Jobs as (id, config) pairs in declaration order
    pub fn job_configs(&self) -> Result<Vec<(String, JobConfig)>> {
        let mut jobs = Vec::with_capacity(self.jobs.len());
        for (id, value) in &self.jobs {
            let id = scalar_to_string(id);
            let job: JobConfig = if value.is_null() {
                JobConfig::default()
            } else {
                serde_yaml::from_value(value.clone())
                    .with_context(|| format!("Invalid job '{}'", id))?
            };
            jobs.push((id, job));
        }
        Ok(jobs)
    }
}

/// Project metadata, read from `package.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Object { url: String },
}

impl ProjectManifest {
    pub const FILE_NAME: &'static str = "package.json";

    /// Read the manifest in `root`, if there is one
    pub fn from_dir(root: &Path) -> Result<Option<Self>> {
        let path = root.join(Self::FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = Self::from_json(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(manifest))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Browsable https URL of the repository
    pub fn repository_url(&self) -> Option<String> {
        let raw = match self.repository.as_ref()? {
            Repository::Url(url) => url,
            Repository::Object { url } => url,
        };
        normalize_repository_url(raw)
    }
}

/// Turn the various npm repository spellings into an https URL
pub fn normalize_repository_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let raw = raw.strip_prefix("git+").unwrap_or(raw);
    let raw = raw.strip_suffix(".git").unwrap_or(raw);

    let url = if let Some(rest) = raw.strip_prefix("github:") {
        format!("https://github.com/{}", rest)
    } else if let Some(rest) = raw.strip_prefix("git@") {
        // scp form: git@host:owner/repo
        let (host, path) = rest.split_once(':')?;
        format!("https://{}/{}", host, path)
    } else if let Some(rest) = raw.strip_prefix("git://") {
        format!("https://{}", rest)
    } else if let Some(rest) = raw.strip_prefix("ssh://git@") {
        format!("https://{}", rest)
    } else if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if raw.split('/').count() == 2 && !raw.contains(':') {
        format!("https://github.com/{}", raw)
    } else {
        return None;
    };

    Some(url.trim_end_matches('/').to_string())
}

/// Render a scalar YAML value the way it reads in the source
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
