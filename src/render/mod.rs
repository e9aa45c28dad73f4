//! Mermaid flowchart rendering
//!
//! Each connected component of the pipeline graph becomes one fenced
//! `flowchart LR` block. Pipelines are rendered as subgraphs holding their
//! step graph; matrix steps become nested subgraphs with one node per
//! variation.

pub mod ids;

pub use ids::IdAllocator;

use crate::core::{Node, Pipeline, Shape};
use crate::graph::{expand_steps, Edge, Graph, GraphError, GraphNode, StepLayout};

const INDENT: &str = "  ";

/// One rendered diagram and the identifiers it allocated
#[derive(Debug, Clone)]
pub struct Diagram {
    pub text: String,
    pub ids: IdAllocator,
}

/// Renders a single connected component
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    ids: IdAllocator,
    out: String,
}

impl DiagramRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `component` into a fenced flowchart block
    pub fn render(mut self, component: &Graph<Node>) -> Result<Diagram, GraphError> {
        self.line(0, "```mermaid");
        self.line(0, "flowchart LR");

        for node in component.nodes() {
            match node {
                Node::Pipeline(pipeline) if !pipeline.steps.is_empty() => {
                    self.pipeline(pipeline, 1)?;
                }
                _ => self.node(node, 1),
            }
        }

        for edge in component.edges() {
            self.edge(edge, 1);
        }

        self.line(0, "```");
        Ok(Diagram {
            text: self.out,
            ids: self.ids,
        })
    }

    fn pipeline(&mut self, pipeline: &Pipeline, depth: usize) -> Result<(), GraphError> {
        let expanded = expand_steps(pipeline)?;
        let id = self.ids.get(&pipeline.key);

        self.line(depth, &format!("subgraph {} [\"{}\"]", id, escape(&pipeline.name)));
        for layout in &expanded.layouts {
            match layout {
                StepLayout::Single(step) => {
                    let node = Node::from(step.clone());
                    self.node(&node, depth + 1);
                }
                StepLayout::Matrix { step, variations } => {
                    let group = self.ids.get(&step.key);
                    self.line(
                        depth + 1,
                        &format!("subgraph {} [\"{}\"]", group, escape(&step.name)),
                    );
                    for variation in variations {
                        let id = self.ids.get(&variation.key);
                        self.line(depth + 2, &glyph(Shape::RoundEdges, &id, &variation.name));
                    }
                    self.line(depth + 1, "end");
                }
            }
        }
        for edge in &expanded.edges {
            self.edge(edge, depth + 1);
        }
        self.line(depth, "end");

        if let Some(link) = &pipeline.link {
            self.click(&id, link, depth);
        }
        Ok(())
    }

    fn node(&mut self, node: &Node, depth: usize) {
        let id = self.ids.get(node.key());
        self.line(depth, &glyph(node.shape(), &id, node.name()));
        if let Some(link) = node.link() {
            self.click(&id, link, depth);
        }
    }

    fn edge(&mut self, edge: &Edge, depth: usize) {
        let source = self.ids.get(&edge.source);
        let target = self.ids.get(&edge.target);
        let line = match &edge.label {
            Some(label) => format!("{}-- {} -->{}", source, escape(label), target),
            None => format!("{} --> {}", source, target),
        };
        self.line(depth, &line);
    }

    fn click(&mut self, id: &str, link: &str, depth: usize) {
        self.line(depth, &format!("click {} href \"{}\" _blank", id, escape(link)));
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.out.push_str(&INDENT.repeat(depth));
        self.out.push_str(text);
        self.out.push('\n');
    }
}

/// Render every component with its own identifier allocator
pub fn render_components(components: &[Graph<Node>]) -> Result<Vec<Diagram>, GraphError> {
    components
        .iter()
        .map(|component| DiagramRenderer::new().render(component))
        .collect()
}

/// Node declaration for `shape`
pub fn glyph(shape: Shape, id: &str, name: &str) -> String {
    let name = escape(name);
    match shape {
        Shape::RoundEdges => format!("{}(\"{}\")", id, name),
        Shape::Stadium => format!("{}([\"{}\"])", id, name),
        Shape::Subroutine => format!("{}[[\"{}\"]]", id, name),
        Shape::Cylinder => format!("{}[(\"{}\")]", id, name),
        Shape::Circle => format!("{}((\"{}\"))", id, name),
        Shape::Flag => format!("{}>\"{}\"]", id, name),
        Shape::Rhombus => format!("{}{{\"{}\"}}", id, name),
        Shape::Hexagon => format!("{}{{{{\"{}\"}}}}", id, name),
        Shape::Parallelogram => format!("{}[/\"{}\"/]", id, name),
        Shape::ParallelogramAlt => format!("{}[\\\"{}\"\\]", id, name),
        Shape::Trapezoid => format!("{}[/\"{}\"\\]", id, name),
        Shape::TrapezoidAlt => format!("{}[\\\"{}\"/]", id, name),
        Shape::DoubleCircle => format!("{}(((\"{}\")))", id, name),
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "'")
}
