//! Expense Tracker CLI
//!
//! Command-line interface for recording income and expenses in a local
//! ledger file.
//!
//! # Usage
//!
//! ```bash
//! expense-tracker add income --amount 1000 --date 15/03/2024 --category Salary
//! expense-tracker add expense --amount 200 --date 20/03/2024 --category Food
//! expense-tracker list
//! expense-tracker monthly 3 2024
//! expense-tracker categories
//! expense-tracker delete 1
//! expense-tracker --data-file ~/ledger.dat export -o ledger.csv
//! ```
//!
//! Reports are written to stdout; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, unknown id, unreadable or unwritable data file, etc.)

use expense_tracker::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
