use rust_decimal::Decimal;

use crate::models::{CardDefinition, EarningsResult, RewardRate, SpendingCategory, POINT_VALUE};

/// Spend already booked in the windows a cap is measured over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpendToDate {
    pub this_year: Decimal,
    pub this_month: Decimal,
}

impl SpendToDate {
    pub fn new(this_year: Decimal, this_month: Decimal) -> Self {
        Self {
            this_year,
            this_month,
        }
    }
}

/// What `card` earns on one `amount` in `category`.
///
/// `spent_this_year` and `spent_this_month` are the cardholder's prior spend
/// in the category, used against annual caps and monthly limits.
pub fn calculate_earnings(
    card: &CardDefinition,
    category: SpendingCategory,
    amount: Decimal,
    spent_this_year: Decimal,
    spent_this_month: Decimal,
) -> EarningsResult {
    calculate_earnings_with(
        card,
        category,
        amount,
        SpendToDate::new(spent_this_year, spent_this_month),
    )
}

pub fn calculate_earnings_with(
    card: &CardDefinition,
    category: SpendingCategory,
    amount: Decimal,
    spend: SpendToDate,
) -> EarningsResult {
    let rate = card.rate_for(category);
    let effective = effective_amount(rate, amount, spend);
    // Saturates at Decimal::MAX
    let points = effective.saturating_mul(rate.rate);

    let cash_value = if rate.is_percentage {
        effective.saturating_mul(rate.rate / Decimal::ONE_HUNDRED)
    } else {
        points.saturating_mul(POINT_VALUE)
    };

    EarningsResult {
        points,
        cash_value,
        description: rate.description(),
    }
}

/// The part of `amount` that earns `rate`. Caps only ever narrow it:
/// annual, then quarterly, then monthly.
///
/// The quarterly limit is checked against this transaction alone;
/// quarter-to-date spend is not tracked.
pub fn effective_amount(rate: &RewardRate, amount: Decimal, spend: SpendToDate) -> Decimal {
    let mut effective = amount.max(Decimal::ZERO);

    if let Some(cap) = rate.annual_cap {
        effective = effective.min(cap.saturating_sub(spend.this_year).max(Decimal::ZERO));
    }
    if let Some(limit) = rate.quarterly_limit {
        effective = effective.min(limit);
    }
    if let Some(limit) = rate.monthly_limit {
        effective = effective.min(limit.saturating_sub(spend.this_month).max(Decimal::ZERO));
    }

    effective
}
