//! Top-level graph of triggers and pipelines

use crate::core::{GraphContext, Node, TriggerKind};
use crate::graph::{Graph, GraphError, GraphNode};
use tracing::{debug, info};

/// Build the Trigger -> Pipeline -> Pipeline graph for every known pipeline,
/// optionally restricted to pipelines activated by `filter`, then cull
/// isolated nodes.
pub fn build_pipeline_graph(
    ctx: &GraphContext,
    filter: Option<TriggerKind>,
) -> Result<Graph<Node>, GraphError> {
    let mut graph = Graph::new();

    for pipeline in ctx.pipelines() {
        if let Some(kind) = filter {
            if !pipeline.is_activated_by(kind) {
                debug!("Skipping pipeline '{}': not activated by {}", pipeline.name, kind);
                continue;
            }
        }

        let target = Node::from(pipeline.clone());
        graph.add_node(target.clone());

        for trigger in ctx.triggers_for(pipeline) {
            graph.add_node(Node::from(trigger.clone()));
            graph.add_edge(&trigger.key, target.key(), None);
        }

        for (name, label) in pipeline.parents() {
            let parent = ctx.find_pipeline(name, pipeline)?;
            graph.add_node(Node::from(parent.clone()));
            graph.add_edge(&parent.key, target.key(), label.as_deref());
        }
    }

    graph.cull();
    info!(
        "Pipeline graph has {} nodes and {} edges",
        graph.nodes().len(),
        graph.edges().len()
    );
    Ok(graph)
}
