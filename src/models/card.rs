use rust_decimal::Decimal;

use super::{RewardRate, SpendingCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Other,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "visa" => Self::Visa,
            "mastercard" | "master card" | "mc" => Self::Mastercard,
            "amex" | "american express" => Self::Amex,
            "discover" => Self::Discover,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a card product. Two issuers may sell products with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId {
    pub institution_id: String,
    pub product_name: String,
}

impl CardId {
    pub fn new(institution_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            institution_id: institution_id.into(),
            product_name: product_name.into(),
        }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.institution_id, self.product_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupBonus {
    /// Points, or dollars when `is_cash` is set.
    pub bonus: Decimal,
    pub is_cash: bool,
    pub min_spend: Decimal,
    pub window_months: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardDefinition {
    pub institution_id: String,
    pub product_name: String,
    pub network: Network,
    pub is_premium: bool,
    pub annual_fee: Decimal,
    pub reward_rates: Vec<RewardRate>,
    pub base_rate: RewardRate,
    pub signup_bonus: Option<SignupBonus>,
    pub benefits: Vec<String>,
}

impl CardDefinition {
    pub fn new(
        institution_id: impl Into<String>,
        product_name: impl Into<String>,
        network: Network,
        base_rate: RewardRate,
    ) -> Self {
        Self {
            institution_id: institution_id.into(),
            product_name: product_name.into(),
            network,
            is_premium: false,
            annual_fee: Decimal::ZERO,
            reward_rates: Vec::new(),
            base_rate,
            signup_bonus: None,
            benefits: Vec::new(),
        }
    }

    pub fn id(&self) -> CardId {
        CardId::new(self.institution_id.clone(), self.product_name.clone())
    }

    pub fn is(&self, id: &CardId) -> bool {
        self.institution_id == id.institution_id && self.product_name == id.product_name
    }

    /// The rate that applies to `category`: the first matching table entry,
    /// otherwise the base rate.
    pub fn rate_for(&self, category: SpendingCategory) -> &RewardRate {
        self.reward_rates
            .iter()
            .find(|r| r.category == category)
            .unwrap_or(&self.base_rate)
    }
}
