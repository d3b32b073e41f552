// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;
pub mod commands;

pub use args::{AddArgs, CliArgs, Command, KindArg, OutputFormat, DEFAULT_DATA_FILE};
pub use commands::execute;

use crate::core::RecordStore;
use crate::io::FileStorage;
use crate::types::LedgerError;
use clap::Parser;
use std::io::Write;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing subcommand, or --help),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Open the configured data file and run the requested command
///
/// The store is loaded fresh for every invocation and every mutation is
/// flushed before this returns.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let storage = FileStorage::new(&args.data_file);
    let mut store = RecordStore::open(storage, args.capacity)?;
    execute(&args.command, &mut store, output)
}
