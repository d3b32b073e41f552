//! Plain-text reports
//!
//! Renders ledger views as aligned tables. Amounts always show two decimals.

use crate::types::{round_amount, CategoryTotal, LedgerError, PeriodSummary, Transaction};
use rust_decimal::Decimal;
use std::io::Write;

const RULE: &str =
    "--------------------------------------------------------------------------";

/// Full ledger listing followed by income, expense and balance totals
pub fn write_transaction_table(
    transactions: &[Transaction],
    totals: PeriodSummary,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    if transactions.is_empty() {
        writeln!(output, "No records found.")?;
        return Ok(());
    }

    writeln!(
        output,
        "{:<4} {:<10} {:<8} {:>11} {:<18} {}",
        "ID", "DATE", "TYPE", "AMOUNT", "CATEGORY", "DESCRIPTION"
    )?;
    writeln!(output, "{}", RULE)?;

    for tx in transactions {
        writeln!(
            output,
            "{:<4} {} {:<8} {:>11} {:<18} {}",
            tx.id,
            tx.date,
            tx.kind.label(),
            money(tx.amount),
            tx.category,
            tx.description
        )?;
    }

    writeln!(output, "{}", RULE)?;
    write_totals(totals, output)
}

/// Income, expense and balance block
pub fn write_totals(totals: PeriodSummary, output: &mut dyn Write) -> Result<(), LedgerError> {
    writeln!(output, "Income : {:>12}", money(totals.income))?;
    writeln!(output, "Expense: {:>12}", money(totals.expense))?;
    writeln!(output, "Balance: {:>12}", money(totals.balance()))?;
    Ok(())
}

/// Totals for one month, headed by the month being reported
pub fn write_monthly_summary(
    month: u32,
    year: u32,
    summary: PeriodSummary,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    writeln!(output, "Summary for {:02}/{:04}", month, year)?;
    writeln!(output, "{}", RULE)?;
    write_totals(summary, output)
}

/// Expense totals per category
pub fn write_category_summary(
    totals: &[CategoryTotal],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    if totals.is_empty() {
        writeln!(output, "No expenses recorded.")?;
        return Ok(());
    }

    for entry in totals {
        writeln!(output, "{:<20} : {:>12}", entry.category, money(entry.total))?;
    }
    Ok(())
}

/// Record count and balance
pub fn write_overview(
    count: usize,
    balance: Decimal,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    writeln!(output, "Records: {}", count)?;
    writeln!(output, "Balance: {}", money(balance))?;
    Ok(())
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", round_amount(amount))
}
