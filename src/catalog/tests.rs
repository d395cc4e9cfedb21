#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Network, RewardRate, SpendingCategory};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::io::Write;

fn plain(institution: &str, product: &str, base: rust_decimal::Decimal) -> CardDefinition {
    CardDefinition::new(
        institution,
        product,
        Network::Visa,
        RewardRate::percent(SpendingCategory::Everything, base),
    )
}

// ── Built-in catalog ──────────────────────────────────────────

#[test]
fn test_builtin_not_empty() {
    let catalog = CardCatalog::builtin();
    assert!(!catalog.is_empty());
    assert_eq!(catalog.len(), catalog.all_definitions().len());
}

#[test]
fn test_builtin_identities_unique() {
    let catalog = CardCatalog::builtin();
    let ids: HashSet<CardId> = catalog.all_definitions().iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), catalog.len());
}

#[test]
fn test_builtin_invariants() {
    for card in CardCatalog::builtin().all_definitions() {
        assert_eq!(
            card.base_rate.category,
            SpendingCategory::Everything,
            "{} base rate",
            card.product_name
        );
        let mut seen = HashSet::new();
        for rate in &card.reward_rates {
            assert!(rate.rate >= dec!(0), "{} negative rate", card.product_name);
            assert!(
                seen.insert(rate.category),
                "{} repeats {}",
                card.product_name,
                rate.category
            );
        }
    }
}

#[test]
fn test_builtin_known_cards() {
    let catalog = CardCatalog::builtin();
    let bcp = catalog.find("Blue Cash Preferred").unwrap();
    assert_eq!(bcp.institution_id, "amex");
    assert_eq!(bcp.annual_fee, dec!(95));
    let groceries = bcp.rate_for(SpendingCategory::Groceries);
    assert_eq!(groceries.annual_cap, Some(dec!(6000)));

    let csp = catalog.find("Sapphire Preferred").unwrap();
    assert!(!csp.base_rate.is_percentage);
    assert!(csp.signup_bonus.is_some());
}

// ── Lookups ───────────────────────────────────────────────────

#[test]
fn test_find_exact_case_sensitive() {
    let catalog = CardCatalog::new(vec![plain("citi", "Double Cash", dec!(2))]);
    assert!(catalog.find("Double Cash").is_some());
    assert!(catalog.find("double cash").is_none());
    assert!(catalog.find("Double Cash ").is_none());
    assert!(catalog.find("Nonexistent Card").is_none());
}

#[test]
fn test_find_name_collision_returns_first() {
    let catalog = CardCatalog::new(vec![
        plain("bank_a", "Cash Rewards", dec!(1.5)),
        plain("bank_b", "Cash Rewards", dec!(2)),
    ]);
    assert_eq!(catalog.find("Cash Rewards").unwrap().institution_id, "bank_a");
}

#[test]
fn test_find_by_id_distinguishes_issuers() {
    let catalog = CardCatalog::new(vec![
        plain("bank_a", "Cash Rewards", dec!(1.5)),
        plain("bank_b", "Cash Rewards", dec!(2)),
    ]);
    let b = catalog
        .find_by_id(&CardId::new("bank_b", "Cash Rewards"))
        .unwrap();
    assert_eq!(b.base_rate.rate, dec!(2));
    assert!(catalog
        .find_by_id(&CardId::new("bank_c", "Cash Rewards"))
        .is_none());
}

#[test]
fn test_all_definitions_keeps_order() {
    let catalog = CardCatalog::new(vec![
        plain("x", "Zeta", dec!(1)),
        plain("x", "Alpha", dec!(1)),
    ]);
    let names: Vec<&str> = catalog
        .all_definitions()
        .iter()
        .map(|c| c.product_name.as_str())
        .collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_empty_catalog() {
    let catalog = CardCatalog::default();
    assert!(catalog.is_empty());
    assert!(catalog.find("anything").is_none());
}

// ── CSV loading ───────────────────────────────────────────────

#[test]
fn test_load_csv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        b"institution,product,category,rate,percentage,annual_cap\n\
          amex,Blue Cash Preferred,groceries,6,yes,6000\n\
          amex,Blue Cash Preferred,everything,1,yes,\n",
    )
    .unwrap();

    let catalog = CardCatalog::load_csv(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    let card = catalog.find("Blue Cash Preferred").unwrap();
    assert_eq!(card.reward_rates[0].annual_cap, Some(dec!(6000)));
}

#[test]
fn test_load_csv_error_names_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"institution,product,category,rate\namex,Gold Card,dining,4\n")
        .unwrap();
    let err = CardCatalog::load_csv(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid card catalog"));
}

#[test]
fn test_from_reader() {
    let catalog =
        CardCatalog::from_reader("institution,product,category,rate\nacme,Plain,everything,1\n".as_bytes())
            .unwrap();
    assert!(catalog.find("Plain").is_some());
}
