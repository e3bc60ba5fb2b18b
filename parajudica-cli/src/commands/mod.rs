//! Subcommand implementations.

pub mod frameworks;
pub mod infer;
