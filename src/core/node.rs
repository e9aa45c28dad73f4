//! Graph node variants

use crate::core::{pipeline::Pipeline, step::Step, trigger::Trigger};
use crate::graph::GraphNode;
use std::rc::Rc;

/// Node shapes understood by the flowchart renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    RoundEdges,
    Stadium,
    Subroutine,
    Cylinder,
    Circle,
    Flag,
    Rhombus,
    Hexagon,
    Parallelogram,
    ParallelogramAlt,
    Trapezoid,
    TrapezoidAlt,
    DoubleCircle,
}

/// A node in the pipeline graph
#[derive(Debug, Clone)]
pub enum Node {
    Trigger(Rc<Trigger>),
    Pipeline(Rc<Pipeline>),
    Step(Rc<Step>),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Trigger(t) => &t.name,
            Node::Pipeline(p) => &p.name,
            Node::Step(s) => &s.name,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Trigger(_) => Shape::Circle,
            Node::Pipeline(_) => Shape::Hexagon,
            Node::Step(_) => Shape::RoundEdges,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Node::Trigger(t) => t.link.as_deref(),
            Node::Pipeline(p) => p.link.as_deref(),
            Node::Step(_) => None,
        }
    }
}

impl GraphNode for Node {
    fn key(&self) -> &str {
        match self {
            Node::Trigger(t) => &t.key,
            Node::Pipeline(p) => &p.key,
            Node::Step(s) => &s.key,
        }
    }
}

impl From<Rc<Trigger>> for Node {
    fn from(trigger: Rc<Trigger>) -> Self {
        Node::Trigger(trigger)
    }
}

impl From<Rc<Pipeline>> for Node {
    fn from(pipeline: Rc<Pipeline>) -> Self {
        Node::Pipeline(pipeline)
    }
}

impl From<Rc<Step>> for Node {
    fn from(step: Rc<Step>) -> Self {
        Node::Step(step)
    }
}
