use rust_decimal::Decimal;

use crate::models::{CardDefinition, Network, RewardRate, SignupBonus, SpendingCategory};
use SpendingCategory::*;

fn d(n: i64) -> Decimal {
    Decimal::from(n)
}

/// `tenths(15)` == 1.5
fn tenths(n: i64) -> Decimal {
    Decimal::new(n, 1)
}

fn card(
    institution: &str,
    product: &str,
    network: Network,
    annual_fee: i64,
    base_rate: RewardRate,
    reward_rates: Vec<RewardRate>,
    benefits: &[&str],
) -> CardDefinition {
    let mut def = CardDefinition::new(institution, product, network, base_rate);
    def.annual_fee = d(annual_fee);
    def.is_premium = annual_fee >= 250;
    def.reward_rates = reward_rates;
    def.benefits = benefits.iter().map(|b| b.to_string()).collect();
    def
}

fn points(category: SpendingCategory, rate: i64) -> RewardRate {
    RewardRate::points(category, d(rate))
}

fn percent(category: SpendingCategory, rate: i64) -> RewardRate {
    RewardRate::percent(category, d(rate))
}

fn bonus(amount: i64, is_cash: bool, min_spend: i64, window_months: u32) -> Option<SignupBonus> {
    Some(SignupBonus {
        bonus: d(amount),
        is_cash,
        min_spend: d(min_spend),
        window_months,
    })
}

pub(super) fn definitions() -> Vec<CardDefinition> {
    let mut cards = vec![
        card(
            "chase",
            "Sapphire Preferred",
            Network::Visa,
            95,
            points(Everything, 1),
            vec![points(Dining, 3), points(Streaming, 3), points(Travel, 2)],
            &["Primary car rental insurance", "Trip cancellation insurance", "No foreign transaction fees"],
        ),
        card(
            "chase",
            "Sapphire Reserve",
            Network::Visa,
            550,
            points(Everything, 1),
            vec![points(Dining, 3), points(Travel, 3), points(Hotels, 3), points(Airfare, 3)],
            &["$300 annual travel credit", "Priority Pass lounge access", "No foreign transaction fees"],
        ),
        card(
            "chase",
            "Freedom Flex",
            Network::Mastercard,
            0,
            percent(Everything, 1),
            vec![
                percent(Gas, 5).with_quarterly_limit(d(1500)),
                percent(Dining, 3),
                percent(Drugstores, 3),
            ],
            &["Cell phone protection"],
        ),
        card(
            "chase",
            "Freedom Unlimited",
            Network::Visa,
            0,
            RewardRate::percent(Everything, tenths(15)),
            vec![percent(Dining, 3), percent(Drugstores, 3)],
            &["Purchase protection"],
        ),
        card(
            "amex",
            "Gold Card",
            Network::Amex,
            325,
            points(Everything, 1),
            vec![
                points(Dining, 4).with_annual_cap(d(50_000)),
                points(Restaurants, 4).with_annual_cap(d(50_000)),
                points(Groceries, 4).with_annual_cap(d(25_000)),
                points(Airfare, 3),
            ],
            &["$120 dining credit", "$120 Uber Cash", "No foreign transaction fees"],
        ),
        card(
            "amex",
            "Platinum Card",
            Network::Amex,
            695,
            points(Everything, 1),
            vec![
                points(Airfare, 5).with_annual_cap(d(500_000)),
                points(Hotels, 5),
            ],
            &["Centurion lounge access", "$200 hotel credit", "Global Entry credit"],
        ),
        card(
            "amex",
            "Blue Cash Preferred",
            Network::Amex,
            95,
            percent(Everything, 1),
            vec![
                percent(Groceries, 6).with_annual_cap(d(6000)),
                percent(Streaming, 6),
                percent(Gas, 3),
                percent(Transit, 3),
                percent(Rideshare, 3),
            ],
            &["Return protection", "Car rental loss and damage insurance"],
        ),
        card(
            "amex",
            "Blue Cash Everyday",
            Network::Amex,
            0,
            percent(Everything, 1),
            vec![
                percent(Groceries, 3).with_annual_cap(d(6000)),
                percent(Online, 3).with_annual_cap(d(6000)),
                percent(Gas, 3).with_annual_cap(d(6000)),
            ],
            &["Purchase protection"],
        ),
        card(
            "capital_one",
            "SavorOne",
            Network::Mastercard,
            0,
            percent(Everything, 1),
            vec![
                percent(Dining, 3),
                percent(Groceries, 3),
                percent(Streaming, 3),
            ],
            &["No foreign transaction fees"],
        ),
        card(
            "capital_one",
            "Venture X",
            Network::Visa,
            395,
            points(Everything, 2),
            vec![points(Hotels, 10), points(Airfare, 5)],
            &["$300 annual travel credit", "Priority Pass lounge access"],
        ),
        card(
            "citi",
            "Double Cash",
            Network::Mastercard,
            0,
            percent(Everything, 2),
            vec![],
            &[],
        ),
        card(
            "citi",
            "Custom Cash",
            Network::Mastercard,
            0,
            percent(Everything, 1),
            vec![percent(Dining, 5).with_monthly_limit(d(500))],
            &[],
        ),
        card(
            "citi",
            "Costco Anywhere Visa",
            Network::Visa,
            0,
            percent(Everything, 1),
            vec![
                percent(Gas, 4).with_annual_cap(d(7000)),
                percent(Restaurants, 3),
                percent(Dining, 3),
                percent(Travel, 3),
                percent(Wholesale, 2),
            ],
            &["Extended warranty"],
        ),
        card(
            "discover",
            "it Cash Back",
            Network::Discover,
            0,
            percent(Everything, 1),
            vec![percent(Groceries, 5).with_quarterly_limit(d(1500))],
            &["Cashback match in the first year"],
        ),
        card(
            "wells_fargo",
            "Autograph",
            Network::Visa,
            0,
            points(Everything, 1),
            vec![
                points(Dining, 3),
                points(Travel, 3),
                points(Gas, 3),
                points(Transit, 3),
                points(Streaming, 3),
            ],
            &["Cell phone protection"],
        ),
        card(
            "bank_of_america",
            "Customized Cash Rewards",
            Network::Visa,
            0,
            percent(Everything, 1),
            vec![
                percent(Online, 3).with_quarterly_limit(d(2500)),
                percent(Groceries, 2).with_quarterly_limit(d(2500)),
                percent(Wholesale, 2).with_quarterly_limit(d(2500)),
            ],
            &[],
        ),
    ];

    for c in cards.iter_mut() {
        c.signup_bonus = match c.product_name.as_str() {
            "Sapphire Preferred" => bonus(60_000, false, 4000, 3),
            "Sapphire Reserve" => bonus(60_000, false, 4000, 3),
            "Gold Card" => bonus(60_000, false, 6000, 6),
            "Platinum Card" => bonus(80_000, false, 8000, 6),
            "Venture X" => bonus(75_000, false, 4000, 3),
            "Blue Cash Preferred" => bonus(250, true, 3000, 6),
            "Freedom Flex" | "Freedom Unlimited" | "SavorOne" => bonus(200, true, 500, 3),
            _ => None,
        };
    }

    cards
}
