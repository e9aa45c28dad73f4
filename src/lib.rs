//! pipeline-graph - Render CI workflow triggers and job dependencies as Mermaid flowcharts

pub mod cli;
pub mod core;
pub mod graph;
pub mod render;

// Re-export commonly used types
pub use crate::core::{GraphContext, Node, Pipeline, Project, Step, Trigger, TriggerKind};
pub use crate::graph::{build_pipeline_graph, Graph, GraphError, GraphNode};
pub use crate::render::{render_components, Diagram, DiagramRenderer, IdAllocator};

/// Build, split and render the pipeline graph of `projects`
pub fn render_projects(
    projects: Vec<Project>,
    filter: Option<TriggerKind>,
) -> Result<Vec<Diagram>, GraphError> {
    let ctx = GraphContext::new(projects)?;
    let graph = build_pipeline_graph(&ctx, filter)?;
    let components = graph.connected_components()?;
    tracing::info!("Rendering {} diagrams", components.len());
    render_components(&components)
}
