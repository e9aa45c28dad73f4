//! Core domain models for the pipeline graph
//!
//! This module defines the projects, pipelines, steps and triggers read
//! from workflow definitions, and the registries that hold them.

pub mod config;
pub mod context;
pub mod node;
pub mod pipeline;
pub mod step;
pub mod trigger;

pub use context::*;
pub use node::*;
pub use pipeline::*;
pub use step::*;
pub use trigger::*;
