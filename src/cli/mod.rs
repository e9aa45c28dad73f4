//! Command-line interface

pub mod commands;
pub mod output;

use clap::Parser;
use commands::TriggerKindArg;
use std::ffi::OsString;
use std::path::PathBuf;

/// Render CI workflow triggers and job dependencies as Mermaid flowcharts
#[derive(Debug, Parser, Clone)]
#[command(name = "pipeline-graph")]
#[command(author = "Pipeline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Render CI workflow triggers and job dependencies as Mermaid flowcharts", long_about = None)]
pub struct Cli {
    /// Project root directories to scan
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only include pipelines activated by this trigger kind
    #[arg(long, value_enum)]
    pub on: Option<TriggerKindArg>,

    /// Print each diagram's identifier table to stderr
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TriggerKind;

    #[test]
    fn test_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["pipeline-graph"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert!(cli.on.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_filter_and_paths() {
        let cli = Cli::try_parse_from(["pipeline-graph", "--on", "pull_request", "--debug", "a", "b"])
            .unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.on.map(TriggerKind::from), Some(TriggerKind::PullRequest));
        assert!(cli.debug);
    }

    #[test]
    fn test_unknown_trigger_kind_rejected() {
        assert!(Cli::try_parse_from(["pipeline-graph", "--on", "workflow_call"]).is_err());
    }
}
