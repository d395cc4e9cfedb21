use anyhow::{Context, Result};
use rust_decimal::Decimal;

use super::csv_rows::{cell, parse_decimal, parse_flag, parse_optional_decimal, CsvTable};
use crate::models::{CardDefinition, Network, RewardRate, SpendingCategory};

struct Columns {
    institution: usize,
    product: usize,
    network: Option<usize>,
    premium: Option<usize>,
    annual_fee: Option<usize>,
    category: usize,
    rate: usize,
    percentage: Option<usize>,
    annual_cap: Option<usize>,
    quarterly_limit: Option<usize>,
    monthly_limit: Option<usize>,
    benefits: Option<usize>,
}

impl Columns {
    fn locate(table: &CsvTable) -> Result<Self> {
        if !table.has_header {
            anyhow::bail!("Catalog CSV needs a header row");
        }
        Ok(Self {
            institution: table.require_col("institution")?,
            product: table.require_col("product")?,
            network: table.col_index("network"),
            premium: table.col_index("premium"),
            annual_fee: table.col_index("annual_fee"),
            category: table.require_col("category")?,
            rate: table.require_col("rate")?,
            percentage: table.col_index("percentage"),
            annual_cap: table.col_index("annual_cap"),
            quarterly_limit: table.col_index("quarterly_limit"),
            monthly_limit: table.col_index("monthly_limit"),
            benefits: table.col_index("benefits"),
        })
    }
}

fn optional<'a>(row: &'a [String], col: Option<usize>) -> &'a str {
    col.map(|c| cell(row, c)).unwrap_or("")
}

/// A card whose rows are still being collected.
struct PendingCard {
    card: CardDefinition,
    base_rate: Option<RewardRate>,
    first_row: usize,
}

/// Turn a catalog table (one row per reward rate) into card definitions,
/// grouped by `(institution, product)` in first-appearance order.
pub(crate) fn parse_catalog(table: &CsvTable) -> Result<Vec<CardDefinition>> {
    let cols = Columns::locate(table)?;
    let mut pending: Vec<PendingCard> = Vec::new();

    for (i, row) in table.rows.iter().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let line = i + 2;
        let institution = cell(row, cols.institution);
        let product = cell(row, cols.product);
        if institution.is_empty() || product.is_empty() {
            anyhow::bail!("Row {line}: institution and product are required");
        }

        let rate = parse_rate(row, &cols).with_context(|| format!("Row {line} ({product})"))?;

        let idx = match pending.iter().position(|p| {
            p.card.institution_id == institution && p.card.product_name == product
        }) {
            Some(idx) => idx,
            None => {
                let card = parse_card_fields(row, &cols, institution, product)
                    .with_context(|| format!("Row {line} ({product})"))?;
                pending.push(PendingCard {
                    card,
                    base_rate: None,
                    first_row: line,
                });
                pending.len() - 1
            }
        };

        let entry = &mut pending[idx];
        if rate.category == SpendingCategory::Everything {
            if entry.base_rate.is_some() {
                anyhow::bail!("Row {line}: {product} has more than one 'everything' rate");
            }
            entry.base_rate = Some(rate);
        } else {
            entry.card.reward_rates.push(rate);
        }
    }

    pending
        .into_iter()
        .map(|p| {
            let Some(base_rate) = p.base_rate else {
                anyhow::bail!(
                    "{} (first seen on row {}) has no 'everything' base rate",
                    p.card.product_name,
                    p.first_row
                );
            };
            Ok(CardDefinition { base_rate, ..p.card })
        })
        .collect()
}

fn parse_rate(row: &[String], cols: &Columns) -> Result<RewardRate> {
    let raw_category = cell(row, cols.category);
    let category = SpendingCategory::parse(raw_category)
        .with_context(|| format!("Unknown category '{raw_category}'"))?;
    let rate = parse_decimal(cell(row, cols.rate))?;
    if rate < Decimal::ZERO {
        anyhow::bail!("Rate must not be negative: {rate}");
    }
    Ok(RewardRate {
        category,
        rate,
        is_percentage: parse_flag(optional(row, cols.percentage))?,
        annual_cap: parse_optional_decimal(optional(row, cols.annual_cap))?,
        quarterly_limit: parse_optional_decimal(optional(row, cols.quarterly_limit))?,
        monthly_limit: parse_optional_decimal(optional(row, cols.monthly_limit))?,
    })
}

fn parse_card_fields(
    row: &[String],
    cols: &Columns,
    institution: &str,
    product: &str,
) -> Result<CardDefinition> {
    // Placeholder base rate; replaced once the card's 'everything' row is seen.
    let mut card = CardDefinition::new(
        institution,
        product,
        Network::parse(optional(row, cols.network)),
        RewardRate::points(SpendingCategory::Everything, Decimal::ZERO),
    );
    card.is_premium = parse_flag(optional(row, cols.premium))?;
    card.annual_fee = parse_decimal(optional(row, cols.annual_fee))?;
    card.benefits = optional(row, cols.benefits)
        .split(';')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect();
    Ok(card)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
