mod card;
mod category;
mod results;
mod reward_rate;

pub use card::{CardDefinition, CardId, Network, SignupBonus};
pub use category::{CategoryKey, SpendingCategory};
pub use results::{EarningsResult, RankedCard, RecommendationResult};
pub use reward_rate::{format_rate, RewardRate, POINT_VALUE};
