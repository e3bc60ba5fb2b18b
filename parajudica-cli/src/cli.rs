//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compliance-reasoning engine: label data artifacts under governance
/// scopes using pluggable regulatory frameworks.
#[derive(Parser, Debug)]
#[command(name = "parajudica", version, about)]
pub struct Cli {
    /// Increase diagnostic output (-v progress, -vv rule detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored error output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load data, run inference to fixpoint, and answer queries
    Infer {
        /// Framework bundles to load in addition to Base
        #[arg(short = 'f', long = "framework")]
        frameworks: Vec<String>,

        /// Turtle data files with the initial assertions
        #[arg(short = 'd', long = "data", required = true)]
        data: Vec<PathBuf>,

        /// Pattern queries to evaluate against the final store
        #[arg(short = 'q', long = "query")]
        queries: Vec<String>,

        /// Reuse cached results keyed by a content hash of all inputs
        #[arg(long)]
        cache: bool,

        /// Force recomputation even if a cache entry exists
        #[arg(long = "rm-cache")]
        rm_cache: bool,

        /// Cache blob directory
        #[arg(long, default_value = ".parajudica-cache")]
        cache_dir: PathBuf,

        /// Query answer rendering
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the final store (canonical JSON) to a file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List the available framework bundles
    Frameworks,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// JSON rows keyed by output variable
    Json,
}
