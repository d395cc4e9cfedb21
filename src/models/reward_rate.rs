use rust_decimal::Decimal;

use super::SpendingCategory;

/// One row of a card's reward table.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRate {
    pub category: SpendingCategory,
    /// Points per dollar, or percent back when `is_percentage` is set.
    pub rate: Decimal,
    pub is_percentage: bool,
    /// Spend per calendar year that earns this rate.
    pub annual_cap: Option<Decimal>,
    /// Per-transaction ceiling for rotating quarterly categories.
    pub quarterly_limit: Option<Decimal>,
    /// Spend per calendar month that earns this rate.
    pub monthly_limit: Option<Decimal>,
}

impl RewardRate {
    pub fn points(category: SpendingCategory, rate: Decimal) -> Self {
        Self {
            category,
            rate,
            is_percentage: false,
            annual_cap: None,
            quarterly_limit: None,
            monthly_limit: None,
        }
    }

    pub fn percent(category: SpendingCategory, rate: Decimal) -> Self {
        Self {
            is_percentage: true,
            ..Self::points(category, rate)
        }
    }

    pub fn with_annual_cap(mut self, cap: Decimal) -> Self {
        self.annual_cap = Some(cap);
        self
    }

    pub fn with_quarterly_limit(mut self, limit: Decimal) -> Self {
        self.quarterly_limit = Some(limit);
        self
    }

    pub fn with_monthly_limit(mut self, limit: Decimal) -> Self {
        self.monthly_limit = Some(limit);
        self
    }

    /// Dollars of value earned per dollar spent, ignoring caps.
    /// Points are valued at one cent each.
    pub fn value_per_dollar(&self) -> Decimal {
        if self.is_percentage {
            self.rate / Decimal::ONE_HUNDRED
        } else {
            self.rate * POINT_VALUE
        }
    }

    /// "3.0× points" / "6.0% cash back"
    pub fn description(&self) -> String {
        let rate = format_rate(self.rate);
        if self.is_percentage {
            format!("{rate}% cash back")
        } else {
            format!("{rate}× points")
        }
    }

    pub fn has_cap(&self) -> bool {
        self.annual_cap.is_some() || self.quarterly_limit.is_some() || self.monthly_limit.is_some()
    }
}

/// Cash value of a single transferable point.
pub const POINT_VALUE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Render a rate with at least one fractional digit: `3` → `"3.0"`, `1.50` → `"1.5"`.
pub fn format_rate(rate: Decimal) -> String {
    let normalized = rate.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}
