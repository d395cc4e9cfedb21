use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Header names (lowercased, trimmed) plus the remaining rows.
#[derive(Debug, Clone, Default)]
pub(crate) struct CsvTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
    pub(crate) has_header: bool,
}

impl CsvTable {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Read every record as strings. The first row is treated as a header
    /// when none of its fields parse as a number or a date.
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            if record.iter().all(|f| f.is_empty()) {
                continue;
            }
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Trailing commas leave empty header cells; judge the rest
        let mut header_cells = all_rows[0]
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .peekable();
        let looks_like_header = header_cells.peek().is_some()
            && header_cells.all(|field| {
                Decimal::from_str(field.replace(['$', ','], "").trim()).is_err()
                    && parse_date(field).is_err()
            });

        if looks_like_header {
            let headers = all_rows
                .remove(0)
                .iter()
                .map(|s| s.to_lowercase().trim().to_string())
                .collect();
            Ok(Self {
                headers,
                rows: all_rows,
                has_header: true,
            })
        } else {
            let headers = (0..all_rows[0].len())
                .map(|i| format!("column {}", i + 1))
                .collect();
            Ok(Self {
                headers,
                rows: all_rows,
                has_header: false,
            })
        }
    }

    pub(crate) fn col_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `col_index`, but a missing column is an error naming it.
    pub(crate) fn require_col(&self, name: &str) -> Result<usize> {
        self.col_index(name)
            .with_context(|| format!("CSV header is missing the '{name}' column"))
    }
}

/// Trimmed cell, empty when the row is short.
pub(crate) fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|s| s.trim()).unwrap_or("")
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .context(format!("Failed to parse '{}' as decimal", s))
}

/// Empty cell means "not set".
pub(crate) fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

pub(crate) fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => anyhow::bail!("Expected yes/no, got '{other}'"),
    }
}

#[cfg(test)]
#[path = "csv_rows_tests.rs"]
mod tests;
