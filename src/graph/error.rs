//! Graph construction errors

use thiserror::Error;

/// Failures that abort graph construction or rendering
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Pipeline '{referenced_by}' is triggered by unknown pipeline '{name}'")]
    UnknownPipeline { name: String, referenced_by: String },

    #[error("Step '{step}' in pipeline '{pipeline}' needs unknown step '{needs}'")]
    UnknownStep {
        pipeline: String,
        step: String,
        needs: String,
    },

    #[error("Projects at {first} and {second} are both named '{name}'")]
    DuplicateProject {
        name: String,
        first: String,
        second: String,
    },

    #[error("Dependency cycle detected at '{0}'")]
    Cycle(String),
}
