mod catalog;
mod csv_rows;
mod ledger;

pub(crate) use catalog::parse_catalog;
pub(crate) use csv_rows::{parse_decimal, CsvTable};
pub(crate) use ledger::parse_ledger;
