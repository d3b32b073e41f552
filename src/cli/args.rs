use crate::core::DEFAULT_CAPACITY;
use crate::types::{TransactionId, TransactionKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default location of the data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "expenses.dat";

/// Record income and expenses and summarize them
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Record income and expenses and summarize them", long_about = None)]
pub struct CliArgs {
    /// Path of the ledger data file
    #[arg(
        long = "data-file",
        value_name = "PATH",
        env = "EXPENSE_TRACKER_FILE",
        default_value = DEFAULT_DATA_FILE,
        global = true
    )]
    pub data_file: PathBuf,

    /// Maximum number of transactions the ledger accepts
    #[arg(
        long = "capacity",
        value_name = "COUNT",
        env = "EXPENSE_TRACKER_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        global = true
    )]
    pub capacity: usize,

    /// Log filter written to stderr (e.g. "info", "expense_tracker=debug")
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "EXPENSE_TRACKER_LOG",
        default_value = "warn",
        global = true
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record an income or an expense
    Add(AddArgs),

    /// List every transaction with income, expense and balance totals
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Income, expense and balance for one month
    Monthly {
        /// Month number (1-12)
        month: u32,
        /// Four-digit year
        year: u32,
    },

    /// Expense totals per category
    Categories,

    /// Delete a transaction by id
    Delete {
        id: TransactionId,
    },

    /// Record count and current balance
    Balance,

    /// Add transactions from a CSV file (kind,date,amount,category,description)
    Import {
        #[arg(value_name = "CSV")]
        input: PathBuf,
    },

    /// Write the ledger as CSV
    Export {
        /// Destination file; stdout when omitted
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddArgs {
    /// Income or expense
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Amount, strictly greater than zero
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// DD/MM/YYYY, DD MM YYYY, DDMMYYYY or YYYY-MM-DD; today when omitted
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Listing formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
}
