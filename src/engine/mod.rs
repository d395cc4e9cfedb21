//! Card selection.
//!
//! [`RecommendationEngine`] answers "which of my cards should I use for this
//! category and amount?" from explicit category values. [`SimpleRulesEngine`]
//! is the lighter, string-keyed path used when all the caller has is a venue
//! description.

mod simple;

pub use simple::SimpleRulesEngine;

use rust_decimal::Decimal;

use crate::calc::{calculate_earnings_with, SpendToDate};
use crate::catalog::CardCatalog;
use crate::categorize::Categorizer;
use crate::models::{
    CardDefinition, CardId, CategoryKey, EarningsResult, RankedCard, RecommendationResult,
    SpendingCategory,
};

pub const REASON_NO_CARDS: &str = "Add cards to get recommendations";
pub const REASON_NO_MATCH: &str = "No optimal card found";

/// Source of a cardholder's prior spend, per card and category.
pub trait SpendHistory {
    fn spend_to_date(&self, card: &CardId, category: SpendingCategory) -> SpendToDate;
}

/// History with nothing booked yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl SpendHistory for NoHistory {
    fn spend_to_date(&self, _card: &CardId, _category: SpendingCategory) -> SpendToDate {
        SpendToDate::default()
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: CardCatalog,
    categorizer: Categorizer,
}

impl RecommendationEngine {
    pub fn new(catalog: CardCatalog) -> Self {
        Self::with_categorizer(catalog, Categorizer::default())
    }

    pub fn with_categorizer(catalog: CardCatalog, categorizer: Categorizer) -> Self {
        Self {
            catalog,
            categorizer,
        }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Best card among `candidates` (product names) for one purchase,
    /// assuming no prior spend against any cap.
    pub fn recommend<S: AsRef<str>>(
        &self,
        category: SpendingCategory,
        amount: Decimal,
        candidates: &[S],
    ) -> RecommendationResult {
        self.recommend_with_history(category, amount, candidates, &NoHistory)
    }

    /// As [`recommend`](Self::recommend), with each card's caps measured
    /// against the spend `history` reports for it.
    ///
    /// The card with the strictly highest cash value wins; on a tie the
    /// candidate listed first keeps the spot. Names the catalog doesn't know
    /// are skipped and listed in `unresolved`.
    pub fn recommend_with_history<S, H>(
        &self,
        category: SpendingCategory,
        amount: Decimal,
        candidates: &[S],
        history: &H,
    ) -> RecommendationResult
    where
        S: AsRef<str>,
        H: SpendHistory + ?Sized,
    {
        if candidates.is_empty() {
            return RecommendationResult::none(REASON_NO_CARDS, Vec::new());
        }

        let (evaluated, unresolved) = self.evaluate(category, amount, candidates, history);

        let mut best: Option<RankedCard> = None;
        for entry in evaluated {
            let best_value = best
                .as_ref()
                .map_or(Decimal::ZERO, |b| b.earnings.cash_value);
            if entry.earnings.cash_value > best_value {
                best = Some(entry);
            }
        }

        match best {
            Some(RankedCard { card, earnings }) => {
                tracing::debug!(
                    card = %card.product_name,
                    category = category.as_str(),
                    %amount,
                    cash_value = %earnings.cash_value,
                    "recommended card"
                );
                let reason = format!("Earn {} with {}", earnings.description, card.product_name);
                RecommendationResult {
                    card: Some(card),
                    earnings,
                    reason,
                    unresolved,
                }
            }
            None => RecommendationResult::none(REASON_NO_MATCH, unresolved),
        }
    }

    /// Recommend from a category key, mapping free text through the
    /// categorizer first.
    pub fn recommend_key<S: AsRef<str>>(
        &self,
        key: &CategoryKey,
        amount: Decimal,
        candidates: &[S],
    ) -> RecommendationResult {
        self.recommend(self.categorizer.resolve(key), amount, candidates)
    }

    /// Every resolvable candidate with its earnings, best first. Equal cash
    /// values keep their input order.
    pub fn rank<S: AsRef<str>>(
        &self,
        category: SpendingCategory,
        amount: Decimal,
        candidates: &[S],
    ) -> Vec<RankedCard> {
        let (mut ranked, _) = self.evaluate(category, amount, candidates, &NoHistory);
        ranked.sort_by(|a, b| b.earnings.cash_value.cmp(&a.earnings.cash_value));
        ranked
    }

    fn evaluate<S, H>(
        &self,
        category: SpendingCategory,
        amount: Decimal,
        candidates: &[S],
        history: &H,
    ) -> (Vec<RankedCard>, Vec<String>)
    where
        S: AsRef<str>,
        H: SpendHistory + ?Sized,
    {
        let mut evaluated = Vec::with_capacity(candidates.len());
        let mut unresolved = Vec::new();

        for name in candidates {
            let name = name.as_ref();
            match self.catalog.find(name) {
                Some(card) => {
                    let earnings = self.earnings_for(card, category, amount, history);
                    evaluated.push(RankedCard {
                        card: card.clone(),
                        earnings,
                    });
                }
                None => {
                    tracing::debug!(card = name, "candidate not in catalog, skipping");
                    unresolved.push(name.to_string());
                }
            }
        }

        (evaluated, unresolved)
    }

    fn earnings_for<H: SpendHistory + ?Sized>(
        &self,
        card: &CardDefinition,
        category: SpendingCategory,
        amount: Decimal,
        history: &H,
    ) -> EarningsResult {
        let spend = history.spend_to_date(&card.id(), category);
        calculate_earnings_with(card, category, amount, spend)
    }
}
