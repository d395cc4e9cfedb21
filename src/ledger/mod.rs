//! Historical earnings: replay stored transactions through the calculator,
//! carrying each card's year- and month-to-date spend forward so caps bite
//! the way they did when the purchases were made.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

use crate::calc::{calculate_earnings_with, SpendToDate};
use crate::catalog::CardCatalog;
use crate::categorize::Categorizer;
use crate::engine::SpendHistory;
use crate::import::{parse_ledger, CsvTable};
use crate::models::{CardId, EarningsResult, SpendingCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub card_name: String,
    pub category: SpendingCategory,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
    pub entry: LedgerEntry,
    /// `None` when the card isn't in the catalog.
    pub card: Option<CardId>,
    pub earnings: EarningsResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardTotal {
    pub card: CardId,
    pub transactions: usize,
    pub spend: Decimal,
    pub points: Decimal,
    pub cash_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerReport {
    /// In date order.
    pub lines: Vec<LedgerLine>,
    /// One per card, in order of first use.
    pub totals: Vec<CardTotal>,
    pub unknown_cards: Vec<String>,
}

impl LedgerReport {
    pub fn total_cash_value(&self) -> Decimal {
        self.totals
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.cash_value))
    }
}

type WindowKey = (CardId, SpendingCategory, i32);

/// Running spend per card and category, bucketed by calendar year and month.
#[derive(Debug, Clone, Default)]
pub struct SpendTracker {
    yearly: HashMap<WindowKey, Decimal>,
    monthly: HashMap<(WindowKey, u32), Decimal>,
}

impl SpendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a purchase. Refunds and zero amounts don't reduce the windows.
    pub fn record(&mut self, card: &CardId, category: SpendingCategory, date: NaiveDate, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        let key = (card.clone(), category, date.year());
        let month = self.monthly.entry((key.clone(), date.month())).or_default();
        *month = month.saturating_add(amount);
        let year = self.yearly.entry(key).or_default();
        *year = year.saturating_add(amount);
    }

    pub fn spend_on(&self, card: &CardId, category: SpendingCategory, date: NaiveDate) -> SpendToDate {
        let key = (card.clone(), category, date.year());
        let this_month = self
            .monthly
            .get(&(key.clone(), date.month()))
            .copied()
            .unwrap_or_default();
        let this_year = self.yearly.get(&key).copied().unwrap_or_default();
        SpendToDate {
            this_year,
            this_month,
        }
    }

    /// View of the tracker as a [`SpendHistory`] for purchases made on `date`.
    pub fn as_of(&self, date: NaiveDate) -> SpendAsOf<'_> {
        SpendAsOf {
            tracker: self,
            date,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpendAsOf<'a> {
    tracker: &'a SpendTracker,
    date: NaiveDate,
}

impl SpendHistory for SpendAsOf<'_> {
    fn spend_to_date(&self, card: &CardId, category: SpendingCategory) -> SpendToDate {
        self.tracker.spend_on(card, category, self.date)
    }
}

/// Replay `entries` in date order (ties keep file order). Each purchase is
/// priced against the spend booked before it, then booked itself.
pub fn replay(catalog: &CardCatalog, entries: &[LedgerEntry]) -> (LedgerReport, SpendTracker) {
    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.date);

    let mut tracker = SpendTracker::new();
    let mut report = LedgerReport::default();

    for entry in ordered {
        let Some(card) = catalog.find(&entry.card_name) else {
            if !report.unknown_cards.contains(&entry.card_name) {
                tracing::warn!(card = %entry.card_name, "ledger card not in catalog");
                report.unknown_cards.push(entry.card_name.clone());
            }
            report.lines.push(LedgerLine {
                entry: entry.clone(),
                card: None,
                earnings: EarningsResult::zero(),
            });
            continue;
        };

        let id = card.id();
        let spend = tracker.spend_on(&id, entry.category, entry.date);
        let earnings = calculate_earnings_with(card, entry.category, entry.amount, spend);
        tracker.record(&id, entry.category, entry.date, entry.amount);

        let idx = match report.totals.iter().position(|t| t.card == id) {
            Some(idx) => idx,
            None => {
                report.totals.push(CardTotal {
                    card: id.clone(),
                    transactions: 0,
                    spend: Decimal::ZERO,
                    points: Decimal::ZERO,
                    cash_value: Decimal::ZERO,
                });
                report.totals.len() - 1
            }
        };
        let total = &mut report.totals[idx];
        total.transactions += 1;
        total.spend = total.spend.saturating_add(entry.amount);
        total.points = total.points.saturating_add(earnings.points);
        total.cash_value = total.cash_value.saturating_add(earnings.cash_value);

        report.lines.push(LedgerLine {
            entry: entry.clone(),
            card: Some(id),
            earnings,
        });
    }

    tracing::debug!(
        lines = report.lines.len(),
        cards = report.totals.len(),
        unknown = report.unknown_cards.len(),
        "ledger replayed"
    );
    (report, tracker)
}

pub fn read_ledger_csv(path: &Path, categorizer: &Categorizer) -> Result<Vec<LedgerEntry>> {
    let table = CsvTable::open(path)?;
    parse_ledger(&table, categorizer)
        .with_context(|| format!("Invalid ledger file: {}", path.display()))
}

#[cfg(test)]
mod tests;
