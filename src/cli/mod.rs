//! CLI command implementations
//!
//! Handles all command-line interface operations:
//! - init: Create a project index
//! - index: Update a project index
//!
//! Handlers return errors instead of printing them; [`report`] is the one
//! place a failure becomes a diagnostic line and an exit code.

mod args;
mod commands;
mod paths;
#[cfg(test)]
mod testing;

pub use args::*;
pub use commands::*;
pub use paths::*;

use std::env;
use std::io::Write;
use std::path::Path;

use tracing::debug;

/// Exit code of a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code of a run that failed after argument parsing
pub const EXIT_FAILURE: u8 = 1;

const DEFAULT_PROGRAM_NAME: &str = "yacbi";

/// File name the program was invoked as
pub fn program_name() -> String {
    env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}

/// Turn the outcome of a command into an exit code, writing
/// `<program>: error: <message>` for a failure.
pub fn report<W: Write>(program: &str, result: anyhow::Result<()>, stderr: &mut W) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            debug!("Command failed: {:?}", err);
            // stderr is the last resort, there is nowhere else to report to
            let _ = writeln!(stderr, "{}: error: {}", program, err);
            EXIT_FAILURE
        }
    }
}
