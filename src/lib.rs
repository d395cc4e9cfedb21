//! Cardwise picks the credit card that earns the most for a purchase.
//!
//! The engine is pure computation over an immutable [`CardCatalog`]:
//! [`calculate_earnings`] prices one card for one purchase,
//! [`RecommendationEngine`] chooses among a cardholder's cards, and
//! [`SimpleRulesEngine`] does the same from a free-text venue string.
//! [`ledger`] replays stored transactions for historical totals.

pub mod calc;
pub mod catalog;
pub mod categorize;
pub mod engine;
mod import;
pub mod ledger;
pub mod models;

pub use calc::{calculate_earnings, calculate_earnings_with, SpendToDate};
pub use catalog::CardCatalog;
pub use categorize::{Categorizer, VenueRule};
pub use engine::{NoHistory, RecommendationEngine, SimpleRulesEngine, SpendHistory};
pub use models::{
    CardDefinition, CardId, CategoryKey, EarningsResult, Network, RankedCard,
    RecommendationResult, RewardRate, SignupBonus, SpendingCategory,
};

/// Parse a user-entered money amount (`"$1,234.50"`, `"(20)"`).
pub fn parse_amount(s: &str) -> anyhow::Result<rust_decimal::Decimal> {
    import::parse_decimal(s)
}
