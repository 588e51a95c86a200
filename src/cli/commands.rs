//! Command implementations for CLI operations

use anyhow::Result;
use tracing::{debug, info};

use crate::engine::IndexEngine;

use super::args::{Commands, IndexArgs, RootArgs};
use super::paths::resolve_root;

/// Run the selected subcommand against `engine`
pub fn execute_command(command: &Commands, engine: &dyn IndexEngine) -> Result<()> {
    match command {
        Commands::Init(args) => init_command(engine, args),
        Commands::Index(args) => index_command(engine, args),
    }
}

/// Create or recreate the index of a project
pub fn init_command(engine: &dyn IndexEngine, args: &RootArgs) -> Result<()> {
    let root = resolve_root(args.root.as_deref())?;
    debug!("Initializing project at {}", root.display());

    engine.initialize_project(&root)?;
    Ok(())
}

/// Update the index of a project
pub fn index_command(engine: &dyn IndexEngine, args: &IndexArgs) -> Result<()> {
    let root = resolve_root(args.root.root.as_deref())?;
    let policy = args.failure_policy();
    debug!(
        "Indexing project at {} (stop_on_error={}, rollback_on_error={})",
        root.display(),
        policy.stop_on_error(),
        policy.rollback_on_error()
    );

    let stats = engine.index(&root, policy.stop_on_error(), policy.rollback_on_error())?;

    info!(
        "Indexing complete: {} added, {} updated, {} removed, {} unchanged",
        stats.added, stats.updated, stats.removed, stats.unchanged
    );
    if stats.failed > 0 {
        info!("Files skipped after errors: {}", stats.failed);
    }

    Ok(())
}
