//! yacbi: Yet another compilation-database indexer
//!
//! Usage:
//!   yacbi init [--root <path>]     Create the project index
//!   yacbi index [--root <path>]    Update the project index
//!         [--stop-on-error | --rollback-on-error]
//!
//! Global flags `-v/--verbose` and `-d/--debug` raise the log level.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use yacbi::cli::{execute_command, program_name, report, Cli};
use yacbi::engine::SqliteEngine;
use yacbi::types::LogLevel;

fn main() -> ExitCode {
    // Usage errors exit here with clap's own message
    let cli = Cli::parse();

    setup_logging(cli.log_level());

    let result = execute_command(&cli.command, &SqliteEngine);
    ExitCode::from(report(&program_name(), result, &mut io::stderr()))
}

fn setup_logging(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(level))
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
