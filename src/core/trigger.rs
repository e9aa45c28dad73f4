//! Trigger model and resolution of activation conditions into shared nodes

use crate::core::config::TriggerConfig;
use crate::core::pipeline::Project;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Recognized activation-condition kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    WorkflowDispatch,
    Schedule,
    Push,
    PullRequest,
    MergeGroup,
    Issues,
    Label,
    Release,
    /// Completion of another pipeline
    WorkflowRun,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 9] = [
        TriggerKind::WorkflowDispatch,
        TriggerKind::Schedule,
        TriggerKind::Push,
        TriggerKind::PullRequest,
        TriggerKind::MergeGroup,
        TriggerKind::Issues,
        TriggerKind::Label,
        TriggerKind::Release,
        TriggerKind::WorkflowRun,
    ];

    /// The kind's name as written under `on:`
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::WorkflowDispatch => "workflow_dispatch",
            TriggerKind::Schedule => "schedule",
            TriggerKind::Push => "push",
            TriggerKind::PullRequest => "pull_request",
            TriggerKind::MergeGroup => "merge_group",
            TriggerKind::Issues => "issues",
            TriggerKind::Label => "label",
            TriggerKind::Release => "release",
            TriggerKind::WorkflowRun => "workflow_run",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external event that activates pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Composite identity key (kind plus distinguishing data)
    pub key: String,
    pub kind: TriggerKind,
    pub name: String,
    pub link: Option<String>,
}

/// Process-wide trigger registry. Resolving the same condition twice
/// returns the same shared node.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: HashMap<String, Rc<Trigger>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Rc<Trigger>> {
        self.triggers.get(key)
    }

    fn intern(
        &mut self,
        key: String,
        kind: TriggerKind,
        name: String,
        link: Option<String>,
    ) -> Rc<Trigger> {
        self.triggers
            .entry(key.clone())
            .or_insert_with(|| Rc::new(Trigger { key, kind, name, link }))
            .clone()
    }

    /// Resolve one activation condition of a pipeline in `project`.
    ///
    /// Chained activation (`workflow_run`) resolves to no trigger nodes; the
    /// graph builder links the parent pipelines directly instead.
    pub fn resolve(&mut self, config: &TriggerConfig, project: &Project) -> Vec<Rc<Trigger>> {
        let kind = config.kind();
        let page = |suffix: &str| project.url.as_ref().map(|url| format!("{}/{}", url, suffix));

        match config {
            TriggerConfig::WorkflowDispatch => vec![self.intern(
                "trigger:workflow_dispatch".to_string(),
                kind,
                "manual dispatch".to_string(),
                None,
            )],
            TriggerConfig::Schedule { crons } => crons
                .iter()
                .map(|cron| {
                    self.intern(
                        format!("trigger:schedule:{}", cron),
                        kind,
                        format!("cron {}", cron),
                        None,
                    )
                })
                .collect(),
            TriggerConfig::Push { branches, tags } => {
                if branches.is_empty() && tags.is_empty() {
                    return vec![self.intern(
                        format!("trigger:push:{}", project.name),
                        kind,
                        format!("{}: push", project.name),
                        None,
                    )];
                }

                let mut resolved = Vec::with_capacity(branches.len() + tags.len());
                for tag in tags {
                    resolved.push(self.intern(
                        format!("trigger:push:{}:tag:{}", project.name, tag),
                        kind,
                        format!("{}: push tag {}", project.name, tag),
                        page(&format!("releases/tag/{}", tag)),
                    ));
                }
                for branch in branches {
                    resolved.push(self.intern(
                        format!("trigger:push:{}:branch:{}", project.name, branch),
                        kind,
                        format!("{}: push {}", project.name, branch),
                        page(&format!("tree/{}", branch)),
                    ));
                }
                resolved
            }
            TriggerConfig::PullRequest => vec![self.intern(
                format!("trigger:pull_request:{}", project.name),
                kind,
                format!("{}: pull request", project.name),
                page("pulls"),
            )],
            TriggerConfig::MergeGroup => vec![self.intern(
                format!("trigger:merge_group:{}", project.name),
                kind,
                format!("{}: merge group", project.name),
                None,
            )],
            TriggerConfig::Issues => vec![self.intern(
                format!("trigger:issues:{}", project.name),
                kind,
                format!("{}: issues", project.name),
                page("issues"),
            )],
            TriggerConfig::Label => vec![self.intern(
                "trigger:label".to_string(),
                kind,
                "label".to_string(),
                None,
            )],
            TriggerConfig::Release => vec![self.intern(
                format!("trigger:release:{}", project.name),
                kind,
                format!("{}: release", project.name),
                page("releases"),
            )],
            TriggerConfig::WorkflowRun { .. } => Vec::new(),
        }
    }
}
