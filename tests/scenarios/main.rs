//! Scenario-based tests for pipeline-graph

mod helpers;

mod binary;
mod chained_pipelines;
mod components;
mod failures;
mod ingest;
