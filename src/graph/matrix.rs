//! Per-pipeline step graph and matrix expansion

use crate::core::{Combination, Matrix, Node, Pipeline, Step};
use crate::graph::{Edge, Graph, GraphError, GraphNode};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::OnceLock;

/// One concrete variation of a matrix step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub key: String,
    pub name: String,
}

/// How a step is laid out in the diagram
#[derive(Debug, Clone)]
pub enum StepLayout {
    /// A plain node
    Single(Rc<Step>),
    /// A grouping holding one node per surviving combination
    Matrix {
        step: Rc<Step>,
        variations: Vec<Variation>,
    },
}

/// A pipeline's steps, ready to render
#[derive(Debug, Clone)]
pub struct ExpandedSteps {
    /// Steps in traversal order from each root step
    pub layouts: Vec<StepLayout>,
    /// "needs" edges, from the needed step to the dependent one
    pub edges: Vec<Edge>,
}

/// Build the step graph of `pipeline`: one node per step and an edge
/// labeled "needs" from every needed sibling to its dependent.
pub fn build_step_graph(pipeline: &Pipeline) -> Result<Graph<Node>, GraphError> {
    let mut graph = Graph::new();
    for step in &pipeline.steps {
        graph.add_node(Node::from(step.clone()));
    }

    for step in &pipeline.steps {
        for needed in &step.needs {
            let source = pipeline.step(needed).ok_or_else(|| GraphError::UnknownStep {
                pipeline: pipeline.name.clone(),
                step: step.id.clone(),
                needs: needed.clone(),
            })?;
            graph.add_edge(&source.key, &step.key, Some("needs"));
        }
    }

    Ok(graph)
}

/// Walk the step graph from every root step and expand matrix steps
pub fn expand_steps(pipeline: &Pipeline) -> Result<ExpandedSteps, GraphError> {
    let graph = build_step_graph(pipeline)?;

    let mut seen = HashSet::new();
    let mut ordered: Vec<Rc<Step>> = Vec::new();
    for root in graph.roots() {
        graph.traverse_from(root, &mut |node, _| {
            if let Node::Step(step) = node {
                if seen.insert(step.key.clone()) {
                    ordered.push(step.clone());
                }
            }
        })?;
    }

    if let Some(stray) = graph.nodes().iter().find(|n| !seen.contains(n.key())) {
        return Err(GraphError::Cycle(stray.key().to_string()));
    }

    let layouts = ordered.into_iter().map(layout).collect();
    Ok(ExpandedSteps {
        layouts,
        edges: graph.edges().to_vec(),
    })
}

fn layout(step: Rc<Step>) -> StepLayout {
    let combos = step.matrix.as_ref().map(combinations).unwrap_or_default();
    if combos.is_empty() {
        return StepLayout::Single(step);
    }

    let variations = combos
        .iter()
        .enumerate()
        .map(|(i, combo)| Variation {
            key: format!("{}@{}", step.key, i),
            name: variation_name(&step.name, combo),
        })
        .collect();

    StepLayout::Matrix { step, variations }
}

/// Every concrete combination of `matrix`: the cartesian product of the
/// parameters in declaration order, then `include` entries, minus anything
/// matching an `exclude` entry.
pub fn combinations(matrix: &Matrix) -> Vec<Combination> {
    let mut combos: Vec<Combination> = vec![Vec::new()];
    for (key, values) in &matrix.parameters {
        combos = combos
            .into_iter()
            .flat_map(|combo| {
                values.iter().map(move |value| {
                    let mut next = combo.clone();
                    next.push((key.clone(), value.clone()));
                    next
                })
            })
            .collect();
    }

    combos.retain(|combo| !combo.is_empty());
    combos.extend(matrix.include.iter().cloned());
    combos.retain(|combo| !matrix.exclude.iter().any(|excluded| matches(combo, excluded)));
    combos
}

/// Whether `combo` agrees with every key of `exclusion`
fn matches(combo: &Combination, exclusion: &Combination) -> bool {
    exclusion
        .iter()
        .all(|(key, value)| lookup(combo, key) == Some(value.as_str()))
}

fn lookup<'a>(combo: &'a Combination, key: &str) -> Option<&'a str> {
    combo
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{\{ matrix\.([A-Za-z0-9_-]+) \}\}").expect("placeholder pattern is valid")
    })
}

/// Display name of one variation. `${{ matrix.<key> }}` placeholders are
/// substituted; without any, the values are appended in parentheses.
pub fn variation_name(base: &str, combo: &Combination) -> String {
    let mut substituted = false;
    let name = placeholder().replace_all(base, |caps: &Captures<'_>| match lookup(combo, &caps[1]) {
        Some(value) => {
            substituted = true;
            value.to_string()
        }
        None => caps[0].to_string(),
    });

    if substituted {
        name.into_owned()
    } else {
        let values: Vec<&str> = combo.iter().map(|(_, v)| v.as_str()).collect();
        format!("{} ({})", base, values.join(", "))
    }
}
