//! CLI argument types

use crate::core::TriggerKind;

/// Trigger kind argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TriggerKindArg {
    #[clap(name = "workflow_dispatch")]
    WorkflowDispatch,
    Schedule,
    Push,
    #[clap(name = "pull_request")]
    PullRequest,
    #[clap(name = "merge_group")]
    MergeGroup,
    Issues,
    Label,
    Release,
    #[clap(name = "workflow_run")]
    WorkflowRun,
}

impl From<TriggerKindArg> for TriggerKind {
    fn from(arg: TriggerKindArg) -> Self {
        match arg {
            TriggerKindArg::WorkflowDispatch => TriggerKind::WorkflowDispatch,
            TriggerKindArg::Schedule => TriggerKind::Schedule,
            TriggerKindArg::Push => TriggerKind::Push,
            TriggerKindArg::PullRequest => TriggerKind::PullRequest,
            TriggerKindArg::MergeGroup => TriggerKind::MergeGroup,
            TriggerKindArg::Issues => TriggerKind::Issues,
            TriggerKindArg::Label => TriggerKind::Label,
            TriggerKindArg::Release => TriggerKind::Release,
            TriggerKindArg::WorkflowRun => TriggerKind::WorkflowRun,
        }
    }
}
