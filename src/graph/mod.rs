//! Directed multigraph with deduplicated nodes and edges
//!
//! Nodes are identified by a structural key; the first node inserted under a
//! key wins. Edges are identified by their (source, target) key pair; the
//! first edge inserted for a pair wins, labels included.

pub mod builder;
pub mod error;
pub mod matrix;

pub use builder::build_pipeline_graph;
pub use error::GraphError;
pub use matrix::{expand_steps, ExpandedSteps, StepLayout, Variation};

use std::collections::{HashMap, HashSet};

/// Anything with a stable identity key
pub trait GraphNode {
    fn key(&self) -> &str;
}

/// A directed edge between two node keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Graph<N> {
    /// Nodes in insertion order
    nodes: Vec<N>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    edge_index: HashSet<(String, String)>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashSet::new(),
        }
    }
}

impl<N: GraphNode + Clone> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, key: &str) -> Option<&N> {
        self.index.get(key).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert `node` unless a node with the same key exists.
    /// Returns whether it was inserted.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.index.contains_key(node.key()) {
            return false;
        }
        self.index.insert(node.key().to_string(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Insert an edge unless one already joins `source` to `target`.
    /// Returns whether it was inserted.
    pub fn add_edge(&mut self, source: &str, target: &str, label: Option<&str>) -> bool {
        let pair = (source.to_string(), target.to_string());
        if self.edge_index.contains(&pair) {
            return false;
        }
        self.edge_index.insert(pair);
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            label: label.map(str::to_string),
        });
        true
    }

    /// Remove every node with no incident edge
    pub fn cull(&mut self) {
        let connected: HashSet<&str> = self
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        let nodes = std::mem::take(&mut self.nodes);
        let (kept, removed): (Vec<N>, Vec<N>) = nodes
            .into_iter()
            .partition(|n| connected.contains(n.key()));
        for node in &removed {
            tracing::debug!("Culled isolated node '{}'", node.key());
        }

        self.nodes = kept;
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.key().to_string(), i))
            .collect();
    }

    /// Nodes that are never an edge target
    pub fn roots(&self) -> Vec<&N> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.key()))
            .collect()
    }

    /// Depth-first walk from `root`, calling `visit` for the root and then
    /// once per traversed edge with the edge's target. A node reachable over
    /// several paths is visited once per path.
    ///
    /// Reaching a node that is already on the current path is a cycle.
    pub fn reachable_from<F>(&self, root: &N, visit: &mut F) -> Result<(), GraphError>
    where
        F: FnMut(&N, Option<&Edge>),
    {
        visit(root, None);
        let mut path = vec![root.key()];
        self.walk(root.key(), &mut path, visit)
    }

    fn walk<'a, F>(&'a self, key: &str, path: &mut Vec<&'a str>, visit: &mut F) -> Result<(), GraphError>
    where
        F: FnMut(&N, Option<&Edge>),
    {
        for edge in self.edges.iter().filter(|e| e.source == key) {
            if path.contains(&edge.target.as_str()) {
                return Err(GraphError::Cycle(edge.target.clone()));
            }
            let Some(target) = self.node(&edge.target) else {
                continue;
            };
            visit(target, Some(edge));
            path.push(target.key());
            self.walk(target.key(), path, visit)?;
            path.pop();
        }
        Ok(())
    }

    /// Depth-first walk from `root` that enters each node once. `visit` is
    /// called for the root and then once per edge leaving an entered node;
    /// a target reached again is reported but not walked again.
    ///
    /// Reaching a node that is already on the current path is a cycle.
    pub fn traverse_from<F>(&self, root: &N, visit: &mut F) -> Result<(), GraphError>
    where
        F: FnMut(&N, Option<&Edge>),
    {
        visit(root, None);
        let mut entered = HashSet::from([root.key()]);
        let mut path = vec![root.key()];
        self.walk_once(root.key(), &mut entered, &mut path, visit)
    }

    fn walk_once<'a, F>(
        &'a self,
        key: &str,
        entered: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
        visit: &mut F,
    ) -> Result<(), GraphError>
    where
        F: FnMut(&N, Option<&Edge>),
    {
        for edge in self.edges.iter().filter(|e| e.source == key) {
            if path.contains(&edge.target.as_str()) {
                return Err(GraphError::Cycle(edge.target.clone()));
            }
            let Some(target) = self.node(&edge.target) else {
                continue;
            };
            visit(target, Some(edge));
            if !entered.insert(target.key()) {
                continue;
            }
            path.push(target.key());
            self.walk_once(target.key(), entered, path, visit)?;
            path.pop();
        }
        Ok(())
    }

    /// Add every node and edge of `other` to this graph
    pub fn extend(&mut self, other: Graph<N>) {
        for node in other.nodes {
            self.add_node(node);
        }
        for edge in other.edges {
            self.add_edge(&edge.source, &edge.target, edge.label.as_deref());
        }
    }

    /// Split the graph into independent subgraphs, one per group of roots
    /// whose reachable sets overlap.
    pub fn connected_components(&self) -> Result<Vec<Graph<N>>, GraphError> {
        let mut components: Vec<Graph<N>> = Vec::new();

        for root in self.roots() {
            let mut reached = Graph::new();
            self.traverse_from(root, &mut |node, edge| {
                reached.add_node(node.clone());
                if let Some(edge) = edge {
                    reached.add_edge(&edge.source, &edge.target, edge.label.as_deref());
                }
            })?;

            // Merge with earlier components that share a node, keeping the
            // position of the first of them.
            let mut position = None;
            let mut merged: Option<Graph<N>> = None;
            let mut kept = Vec::with_capacity(components.len());
            for component in components.drain(..) {
                let overlaps = component.nodes.iter().any(|n| reached.contains(n.key()));
                if !overlaps {
                    kept.push(component);
                    continue;
                }
                position.get_or_insert(kept.len());
                merged = Some(match merged {
                    Some(mut acc) => {
                        acc.extend(component);
                        acc
                    }
                    None => component,
                });
            }

            let component = match merged {
                Some(mut acc) => {
                    acc.extend(reached);
                    acc
                }
                None => reached,
            };
            match position {
                Some(i) => kept.insert(i, component),
                None => kept.push(component),
            }
            components = kept;
        }

        // Nodes not reachable from any root sit on a root-less cycle
        if let Some(stray) = self
            .nodes
            .iter()
            .find(|n| !components.iter().any(|c| c.contains(n.key())))
        {
            return Err(GraphError::Cycle(stray.key().to_string()));
        }

        Ok(components)
    }
}
