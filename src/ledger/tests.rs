#![allow(clippy::unwrap_used)]

use super::*;
use crate::engine::RecommendationEngine;
use crate::models::{CardDefinition, Network, RewardRate};
use rust_decimal_macros::dec;
use std::io::Write;
use SpendingCategory::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(d: NaiveDate, card: &str, category: SpendingCategory, amount: Decimal) -> LedgerEntry {
    LedgerEntry {
        date: d,
        card_name: card.into(),
        category,
        amount,
    }
}

fn catalog() -> CardCatalog {
    let mut grocery = CardDefinition::new(
        "bank_a",
        "Grocery Six",
        Network::Amex,
        RewardRate::percent(Everything, dec!(1)),
    );
    grocery.reward_rates = vec![RewardRate::percent(Groceries, dec!(6)).with_annual_cap(dec!(6000))];

    let mut monthly = CardDefinition::new(
        "bank_b",
        "Monthly Five",
        Network::Mastercard,
        RewardRate::percent(Everything, dec!(1)),
    );
    monthly.reward_rates = vec![RewardRate::percent(Dining, dec!(5)).with_monthly_limit(dec!(500))];

    let flat = CardDefinition::new(
        "bank_c",
        "Flat Two",
        Network::Visa,
        RewardRate::percent(Everything, dec!(2)),
    );

    CardCatalog::new(vec![grocery, monthly, flat])
}

// ── Replay ────────────────────────────────────────────────────

#[test]
fn test_annual_cap_reached_mid_year() {
    let entries = vec![
        entry(date(2024, 2, 1), "Grocery Six", Groceries, dec!(4000)),
        entry(date(2024, 6, 1), "Grocery Six", Groceries, dec!(3000)),
        entry(date(2024, 9, 1), "Grocery Six", Groceries, dec!(500)),
    ];
    let (report, _) = replay(&catalog(), &entries);

    let cash: Vec<Decimal> = report.lines.iter().map(|l| l.earnings.cash_value).collect();
    // 4000 full, then 2000 of 3000 left under the cap, then nothing
    assert_eq!(cash, vec![dec!(240), dec!(120), dec!(0)]);
    assert_eq!(report.totals[0].spend, dec!(7500));
    assert_eq!(report.totals[0].cash_value, dec!(360));
    assert_eq!(report.totals[0].transactions, 3);
}

#[test]
fn test_annual_cap_resets_next_year() {
    let entries = vec![
        entry(date(2023, 12, 1), "Grocery Six", Groceries, dec!(6000)),
        entry(date(2024, 1, 2), "Grocery Six", Groceries, dec!(100)),
    ];
    let (report, _) = replay(&catalog(), &entries);
    assert_eq!(report.lines[1].earnings.cash_value, dec!(6));
}

#[test]
fn test_monthly_limit_resets_each_month() {
    let entries = vec![
        entry(date(2024, 3, 2), "Monthly Five", Dining, dec!(450)),
        entry(date(2024, 3, 20), "Monthly Five", Dining, dec!(100)),
        entry(date(2024, 4, 1), "Monthly Five", Dining, dec!(100)),
    ];
    let (report, _) = replay(&catalog(), &entries);
    let cash: Vec<Decimal> = report.lines.iter().map(|l| l.earnings.cash_value).collect();
    assert_eq!(cash, vec![dec!(22.50), dec!(2.50), dec!(5.00)]);
}

#[test]
fn test_replays_in_date_order() {
    let entries = vec![
        entry(date(2024, 6, 1), "Grocery Six", Groceries, dec!(3000)),
        entry(date(2024, 2, 1), "Grocery Six", Groceries, dec!(4000)),
    ];
    let (report, _) = replay(&catalog(), &entries);
    assert_eq!(report.lines[0].entry.date, date(2024, 2, 1));
    assert_eq!(report.lines[0].earnings.cash_value, dec!(240));
    assert_eq!(report.lines[1].earnings.cash_value, dec!(120));
}

#[test]
fn test_categories_tracked_separately() {
    let entries = vec![
        entry(date(2024, 1, 1), "Grocery Six", Gas, dec!(9000)),
        entry(date(2024, 1, 2), "Grocery Six", Groceries, dec!(100)),
    ];
    let (report, _) = replay(&catalog(), &entries);
    assert_eq!(report.lines[1].earnings.cash_value, dec!(6));
}

#[test]
fn test_unknown_card_line() {
    let entries = vec![
        entry(date(2024, 1, 1), "Mystery Card", Dining, dec!(50)),
        entry(date(2024, 1, 2), "Mystery Card", Dining, dec!(50)),
        entry(date(2024, 1, 3), "Flat Two", Dining, dec!(50)),
    ];
    let (report, _) = replay(&catalog(), &entries);
    assert!(report.lines[0].card.is_none());
    assert!(report.lines[0].earnings.is_zero());
    assert_eq!(report.unknown_cards, vec!["Mystery Card".to_string()]);
    assert_eq!(report.totals.len(), 1);
    assert_eq!(report.total_cash_value(), dec!(1.00));
}

#[test]
fn test_huge_entries_saturate_totals() {
    let entries = vec![
        entry(date(2024, 1, 1), "Flat Two", Gas, Decimal::MAX),
        entry(date(2024, 1, 2), "Flat Two", Gas, Decimal::MAX),
    ];
    let (report, tracker) = replay(&catalog(), &entries);
    assert_eq!(report.totals[0].transactions, 2);
    assert_eq!(report.totals[0].spend, Decimal::MAX);
    assert!(report.total_cash_value() > Decimal::ZERO);

    let id = CardId::new("bank_c", "Flat Two");
    assert_eq!(tracker.spend_on(&id, Gas, date(2024, 1, 3)).this_year, Decimal::MAX);
}

#[test]
fn test_refund_earns_nothing_and_is_not_booked() {
    let entries = vec![
        entry(date(2024, 1, 1), "Grocery Six", Groceries, dec!(-200)),
        entry(date(2024, 1, 2), "Grocery Six", Groceries, dec!(100)),
    ];
    let (report, tracker) = replay(&catalog(), &entries);
    assert!(report.lines[0].earnings.is_zero());
    let spend = tracker.spend_on(&CardId::new("bank_a", "Grocery Six"), Groceries, date(2024, 1, 31));
    assert_eq!(spend.this_year, dec!(100));
}

// ── SpendTracker ──────────────────────────────────────────────

#[test]
fn test_tracker_windows() {
    let id = CardId::new("bank_b", "Monthly Five");
    let mut tracker = SpendTracker::new();
    tracker.record(&id, Dining, date(2024, 3, 2), dec!(100));
    tracker.record(&id, Dining, date(2024, 4, 2), dec!(40));

    let april = tracker.spend_on(&id, Dining, date(2024, 4, 30));
    assert_eq!(april, SpendToDate::new(dec!(140), dec!(40)));

    let other_year = tracker.spend_on(&id, Dining, date(2025, 4, 30));
    assert_eq!(other_year, SpendToDate::default());
}

#[test]
fn test_tracker_feeds_recommendations() {
    let entries = vec![entry(date(2024, 5, 3), "Grocery Six", Groceries, dec!(6000))];
    let (_, tracker) = replay(&catalog(), &entries);
    let engine = RecommendationEngine::new(catalog());
    let names = ["Grocery Six", "Flat Two"];

    let fresh = engine.recommend(Groceries, dec!(100), &names);
    assert_eq!(fresh.card.unwrap().product_name, "Grocery Six");

    let later = engine.recommend_with_history(
        Groceries,
        dec!(100),
        &names,
        &tracker.as_of(date(2024, 8, 1)),
    );
    assert_eq!(later.card.unwrap().product_name, "Flat Two");

    let next_year = engine.recommend_with_history(
        Groceries,
        dec!(100),
        &names,
        &tracker.as_of(date(2025, 1, 1)),
    );
    assert_eq!(next_year.card.unwrap().product_name, "Grocery Six");
}

// ── CSV ───────────────────────────────────────────────────────

#[test]
fn test_read_ledger_csv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        b"date,card,category,amount\n\
          2024-02-01,Grocery Six,groceries,4000\n\
          2024-06-01,Grocery Six,Trader Joe's,3000\n",
    )
    .unwrap();

    let entries = read_ledger_csv(file.path(), &Categorizer::default()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].category, Groceries);

    let (report, _) = replay(&catalog(), &entries);
    assert_eq!(report.total_cash_value(), dec!(360));
}

#[test]
fn test_read_ledger_csv_error_names_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"date,card,category,amount\nnope,Flat Two,gas,1\n").unwrap();
    let err = read_ledger_csv(file.path(), &Categorizer::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid ledger file"));
}
