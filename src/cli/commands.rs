//! Command dispatch
//!
//! Each subcommand maps onto one record store operation and one report.
//! All output goes to the supplied writer so commands can be exercised
//! without a terminal.

use crate::cli::args::{AddArgs, Command, OutputFormat};
use crate::core::{RecordStore, Storage};
use crate::io::csv_reader::CsvImportReader;
use crate::io::{report, write_transactions_csv};
use crate::types::{Date, LedgerError, TransactionKind};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// Run one command against an opened store
pub fn execute<S: Storage>(
    command: &Command,
    store: &mut RecordStore<S>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match command {
        Command::Add(args) => add(args, store, output),
        Command::List { format } => list(*format, store, output),
        Command::Monthly { month, year } => {
            let summary = store.monthly_summary(*month, *year);
            report::write_monthly_summary(*month, *year, summary, output)
        }
        Command::Categories => report::write_category_summary(&store.category_summary(), output),
        Command::Delete { id } => {
            let removed = store.delete_transaction(*id)?;
            writeln!(output, "Record {} deleted successfully.", removed.id)?;
            Ok(())
        }
        Command::Balance => report::write_overview(store.len(), store.balance(), output),
        Command::Import { input } => import(input, store, output),
        Command::Export { output: None } => write_transactions_csv(store.list_all(), output),
        Command::Export { output: Some(path) } => {
            let mut file = File::create(path).map_err(|e| LedgerError::IoError {
                message: format!("Failed to create '{}': {}", path.display(), e),
            })?;
            write_transactions_csv(store.list_all(), &mut file)?;
            writeln!(
                output,
                "Exported {} transactions to {}",
                store.len(),
                path.display()
            )?;
            Ok(())
        }
    }
}

fn add<S: Storage>(
    args: &AddArgs,
    store: &mut RecordStore<S>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let kind = TransactionKind::from(args.kind);
    let date = match &args.date {
        Some(text) => Date::from_str(text)?,
        None => Date::today()?,
    };
    let amount = Decimal::from_str(args.amount.trim())
        .map_err(|_| LedgerError::invalid_amount(&args.amount))?;

    let tx = store.add_transaction(kind, date, amount, &args.category, &args.description)?;

    let label = match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    };
    writeln!(output, "{} added successfully (ID: {})", label, tx.id)?;
    Ok(())
}

fn list<S: Storage>(
    format: OutputFormat,
    store: &RecordStore<S>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match format {
        OutputFormat::Table => {
            report::write_transaction_table(store.list_all(), store.totals(), output)
        }
        OutputFormat::Csv => write_transactions_csv(store.list_all(), output),
    }
}

/// Add every valid row of a CSV file
///
/// Rows that fail to parse or validate are logged and skipped. A full store
/// or a storage failure stops the import, since every later row would hit
/// it too.
fn import<S: Storage>(
    path: &Path,
    store: &mut RecordStore<S>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let reader = CsvImportReader::new(path)?;
    let mut imported = 0usize;
    let mut skipped = 0usize;

    for result in reader {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping import row");
                skipped += 1;
                continue;
            }
        };

        match store.add_transaction(
            entry.kind,
            entry.date,
            entry.amount,
            &entry.category,
            &entry.description,
        ) {
            Ok(_) => imported += 1,
            Err(e @ LedgerError::CapacityExceeded { .. }) => {
                writeln!(
                    output,
                    "Imported {} transactions before reaching the capacity of {}",
                    imported,
                    store.capacity()
                )?;
                return Err(e);
            }
            Err(e) if e.is_validation() => {
                warn!(error = %e, "skipping rejected import row");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    writeln!(
        output,
        "Imported {} transactions, skipped {} rows",
        imported, skipped
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::KindArg;
    use crate::core::DEFAULT_CAPACITY;
    use crate::io::MemoryStorage;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn store() -> RecordStore<MemoryStorage> {
        RecordStore::new(MemoryStorage::new(), DEFAULT_CAPACITY)
    }

    fn run(command: Command, store: &mut RecordStore<MemoryStorage>) -> Result<String, LedgerError> {
        let mut output = Vec::new();
        execute(&command, store, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn add_command(kind: KindArg, amount: &str, date: &str, category: &str) -> Command {
        Command::Add(AddArgs {
            kind,
            amount: amount.to_string(),
            date: Some(date.to_string()),
            category: category.to_string(),
            description: String::new(),
        })
    }

    #[test]
    fn test_add_reports_new_id() {
        let mut store = store();

        let text = run(add_command(KindArg::Income, "1000", "15/03/2024", "Salary"), &mut store)
            .unwrap();

        assert_eq!(text, "Income added successfully (ID: 1)\n");
        assert_eq!(store.total_income(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_add_without_date_uses_today() {
        let mut store = store();
        let command = Command::Add(AddArgs {
            kind: KindArg::Expense,
            amount: "3".to_string(),
            date: None,
            category: "Coffee".to_string(),
            description: String::new(),
        });

        run(command, &mut store).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_input_without_mutation() {
        let mut store = store();

        let bad_date = run(add_command(KindArg::Income, "10", "29/02/2023", "x"), &mut store);
        let bad_amount = run(add_command(KindArg::Income, "-10", "01/01/2024", "x"), &mut store);
        let not_a_number = run(add_command(KindArg::Income, "ten", "01/01/2024", "x"), &mut store);

        assert!(matches!(bad_date, Err(LedgerError::InvalidDate { .. })));
        assert!(matches!(bad_amount, Err(LedgerError::InvalidAmount { .. })));
        assert!(matches!(not_a_number, Err(LedgerError::InvalidAmount { .. })));
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_delete_and_missing_delete() {
        let mut store = store();
        run(add_command(KindArg::Expense, "5", "01/01/2024", "x"), &mut store).unwrap();

        let text = run(Command::Delete { id: 1 }, &mut store).unwrap();
        assert_eq!(text, "Record 1 deleted successfully.\n");

        let missing = run(Command::Delete { id: 1 }, &mut store);
        assert_eq!(missing, Err(LedgerError::NotFound { id: 1 }));
    }

    #[test]
    fn test_list_csv_and_balance() {
        let mut store = store();
        run(add_command(KindArg::Income, "100", "01/01/2024", "Salary"), &mut store).unwrap();
        run(add_command(KindArg::Expense, "30.25", "02/01/2024", "Food"), &mut store).unwrap();

        let csv = run(Command::List { format: OutputFormat::Csv }, &mut store).unwrap();
        assert_eq!(
            csv,
            "id,date,kind,amount,category,description\n\
             1,01/01/2024,income,100.00,Salary,\n\
             2,02/01/2024,expense,30.25,Food,\n"
        );

        let overview = run(Command::Balance, &mut store).unwrap();
        assert_eq!(overview, "Records: 2\nBalance: 69.75\n");
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"kind,date,amount,category,description\n\
              income,15/03/2024,1000,Salary,pay\n\
              expense,20/03/2024,-4,Food,refund?\n\
              expense,32/03/2024,4,Food,bad date\n\
              expense,20/03/2024,200,Food,groceries\n",
        )
        .unwrap();
        file.flush().unwrap();

        let mut store = store();
        let text = run(
            Command::Import {
                input: file.path().to_path_buf(),
            },
            &mut store,
        )
        .unwrap();

        assert_eq!(text, "Imported 2 transactions, skipped 2 rows\n");
        assert_eq!(store.monthly_summary(3, 2024).balance(), Decimal::new(800, 0));
    }

    #[test]
    fn test_import_stops_on_storage_failure() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"kind,date,amount,category\nincome,15/03/2024,10,x\nincome,16/03/2024,10,x\n")
            .unwrap();
        file.flush().unwrap();

        let mut store = store();
        store.storage_mut().set_fail_writes(true);

        let result = run(
            Command::Import {
                input: file.path().to_path_buf(),
            },
            &mut store,
        );

        assert!(matches!(result, Err(LedgerError::Unsaved { id: 1, .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sub_cent_amounts_survive_export_and_import() {
        let mut store = store();
        let rejected = run(add_command(KindArg::Expense, "0.004", "01/01/2024", "Fee"), &mut store);
        run(add_command(KindArg::Expense, "1.999", "01/01/2024", "Fee"), &mut store).unwrap();
        run(add_command(KindArg::Expense, "0.005", "01/01/2024", "Fee"), &mut store).unwrap();

        assert!(matches!(rejected, Err(LedgerError::InvalidAmount { .. })));

        let table = run(Command::List { format: OutputFormat::Table }, &mut store).unwrap();
        assert!(table.contains("EXPENSE         2.00 Fee"));
        assert!(table.contains("EXPENSE         0.01 Fee"));
        assert!(table.contains("Expense:         2.01"));

        let mut exported = NamedTempFile::new().unwrap();
        let csv = run(Command::List { format: OutputFormat::Csv }, &mut store).unwrap();
        exported.write_all(csv.as_bytes()).unwrap();
        exported.flush().unwrap();

        let mut reimported = self::store();
        let text = run(
            Command::Import {
                input: exported.path().to_path_buf(),
            },
            &mut reimported,
        )
        .unwrap();

        assert_eq!(text, "Imported 2 transactions, skipped 0 rows\n");
        assert_eq!(reimported.balance(), store.balance());
    }

    #[test]
    fn test_import_stops_when_store_is_full() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"kind,date,amount,category\n\
              income,15/03/2024,10,x\n\
              income,16/03/2024,0,x\n\
              income,17/03/2024,10,x\n\
              income,18/03/2024,10,x\n",
        )
        .unwrap();
        file.flush().unwrap();

        let mut store = RecordStore::new(MemoryStorage::new(), 2);
        let mut output = Vec::new();
        let result = execute(
            &Command::Import {
                input: file.path().to_path_buf(),
            },
            &mut store,
            &mut output,
        );

        assert_eq!(result, Err(LedgerError::CapacityExceeded { capacity: 2 }));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Imported 2 transactions before reaching the capacity of 2\n"
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_export_to_file() {
        let mut store = store();
        run(add_command(KindArg::Expense, "5", "01/01/2024", "x"), &mut store).unwrap();
        let destination = NamedTempFile::new().unwrap();

        let text = run(
            Command::Export {
                output: Some(destination.path().to_path_buf()),
            },
            &mut store,
        )
        .unwrap();

        assert!(text.starts_with("Exported 1 transactions to "));
        let written = std::fs::read_to_string(destination.path()).unwrap();
        assert!(written.contains("1,01/01/2024,expense,5.00,x,"));
    }
}
