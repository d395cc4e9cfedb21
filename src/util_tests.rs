#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount(dec!(3)), "$3.00");
    assert_eq!(format_amount(dec!(0.5)), "$0.50");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(1000)), "$1,000.00");
}

#[test]
fn test_format_amount_rounds() {
    assert_eq!(format_amount(dec!(0.49995)), "$0.50");
    assert_eq!(format_amount(dec!(2.004)), "$2.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.5)), "-$42.50");
    assert_eq!(format_amount(dec!(-0.001)), "$0.00");
}

// ── format_points ─────────────────────────────────────────────

#[test]
fn test_format_points() {
    assert_eq!(format_points(dec!(300)), "300");
    assert_eq!(format_points(dec!(36000.0)), "36,000");
    assert_eq!(format_points(dec!(99.99)), "99");
    assert_eq!(format_points(dec!(0)), "0");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Gold Card", 20), "Gold Card");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Customized Cash Rewards", 10), "Customize…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}
