use anyhow::{Context, Result};

use super::csv_rows::{cell, parse_date, parse_decimal, CsvTable};
use crate::categorize::Categorizer;
use crate::ledger::LedgerEntry;
use crate::models::CategoryKey;

/// Parse `date,card,category,amount` rows. With a header the columns are
/// found by name, otherwise they are taken in that order. Category cells
/// that are not a known key go through the venue categorizer.
pub(crate) fn parse_ledger(table: &CsvTable, categorizer: &Categorizer) -> Result<Vec<LedgerEntry>> {
    let (date_col, card_col, category_col, amount_col) = if table.has_header {
        (
            table.require_col("date")?,
            table.require_col("card")?,
            table.require_col("category")?,
            table.require_col("amount")?,
        )
    } else {
        (0, 1, 2, 3)
    };
    let first_line = if table.has_header { 2 } else { 1 };

    let mut entries = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let line = i + first_line;

        let date_str = cell(row, date_col);
        let date = parse_date(date_str)
            .with_context(|| format!("Row {line}: failed to parse date '{date_str}'"))?;

        let card_name = cell(row, card_col);
        if card_name.is_empty() {
            anyhow::bail!("Row {line}: card name is empty");
        }

        let category = categorizer.resolve(&CategoryKey::parse(cell(row, category_col)));

        let amount = parse_decimal(cell(row, amount_col))
            .with_context(|| format!("Row {line}: failed to parse amount"))?;

        entries.push(LedgerEntry {
            date,
            card_name: card_name.to_string(),
            category,
            amount,
        });
    }

    Ok(entries)
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
