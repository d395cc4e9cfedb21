use rust_decimal::Decimal;

use super::CardDefinition;

#[derive(Debug, Clone, PartialEq)]
pub struct EarningsResult {
    pub points: Decimal,
    pub cash_value: Decimal,
    pub description: String,
}

impl EarningsResult {
    pub fn zero() -> Self {
        Self {
            points: Decimal::ZERO,
            cash_value: Decimal::ZERO,
            description: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.cash_value.is_zero() && self.points.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub card: Option<CardDefinition>,
    pub earnings: EarningsResult,
    /// Ready for display as-is.
    pub reason: String,
    /// Candidate names the catalog did not recognize, in input order.
    pub unresolved: Vec<String>,
}

impl RecommendationResult {
    pub(crate) fn none(reason: &str, unresolved: Vec<String>) -> Self {
        Self {
            card: None,
            earnings: EarningsResult::zero(),
            reason: reason.to_string(),
            unresolved,
        }
    }
}

/// One candidate's standing in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCard {
    pub card: CardDefinition,
    pub earnings: EarningsResult,
}
