use rust_decimal::Decimal;

use super::{REASON_NO_CARDS, REASON_NO_MATCH};
use crate::categorize::Categorizer;
use crate::models::{CardDefinition, SpendingCategory};

/// Venue-driven recommendation: free-text category in, best card of the
/// caller's list out. Caps are ignored; cards are compared on their rate's
/// value per dollar.
#[derive(Debug, Clone, Default)]
pub struct SimpleRulesEngine {
    categorizer: Categorizer,
}

impl SimpleRulesEngine {
    pub fn new(categorizer: Categorizer) -> Self {
        Self { categorizer }
    }

    pub fn recommend(
        &self,
        category_key: &str,
        candidates: &[CardDefinition],
    ) -> (Option<CardDefinition>, String) {
        if candidates.is_empty() {
            return (None, REASON_NO_CARDS.to_string());
        }

        let key = self.categorizer.normalize(category_key);
        let category = key.known().unwrap_or(SpendingCategory::Everything);

        let mut best: Option<&CardDefinition> = None;
        let mut best_value = Decimal::ZERO;
        for card in candidates {
            let value = card.rate_for(category).value_per_dollar();
            if value > best_value {
                best = Some(card);
                best_value = value;
            }
        }

        match best {
            Some(card) => {
                tracing::debug!(
                    venue = category_key,
                    category = category.as_str(),
                    card = %card.product_name,
                    "venue recommendation"
                );
                let reason = format!(
                    "{} at {} with {}",
                    card.rate_for(category).description(),
                    category.display_name(),
                    card.product_name
                );
                (Some(card.clone()), reason)
            }
            None => (None, REASON_NO_MATCH.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "simple_tests.rs"]
mod tests;
