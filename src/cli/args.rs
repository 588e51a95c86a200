//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::types::{FailurePolicy, LogLevel};

/// Yet another compilation-database indexer
#[derive(Parser, Debug)]
#[command(name = "yacbi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log progress messages
    #[arg(short, long, conflicts_with = "debug")]
    pub verbose: bool,

    /// Log debugging messages
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        LogLevel::resolve(self.verbose, self.debug)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a project index
    Init(RootArgs),

    /// Update an existing project index
    Index(IndexArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Project root directory (default: cwd)
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Stop at the first file that fails, keeping the work done so far
    #[arg(long, conflicts_with = "rollback_on_error")]
    pub stop_on_error: bool,

    /// Stop at the first file that fails and undo the whole update
    #[arg(long)]
    pub rollback_on_error: bool,
}

impl IndexArgs {
    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::resolve(self.stop_on_error, self.rollback_on_error)
    }
}
