use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;

use cardwise::ledger::{read_ledger_csv, replay};
use cardwise::{
    calculate_earnings_with, parse_amount, CardCatalog, CardDefinition, Categorizer,
    RecommendationEngine, SimpleRulesEngine, SpendToDate, SpendingCategory,
};

use crate::config::Config;
use crate::util::{format_amount, format_points, truncate};

/// Flags that take a value; everything else is positional.
const VALUE_FLAGS: &[&str] = &["--catalog", "--year-spend", "--month-spend"];

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let rest = args.get(1..).unwrap_or(&[]);
    let positional = positionals(rest);
    let Some(command) = positional.first() else {
        print_usage();
        return Ok(());
    };
    let params = &positional[1..];

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cardwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "cards" | "ls" => cli_cards(&load_catalog(rest)?),
        "earnings" | "e" => cli_earnings(params, rest, &load_catalog(rest)?),
        "recommend" | "r" => cli_recommend(params, &load_catalog(rest)?),
        "venue" | "v" => cli_venue(params, &load_catalog(rest)?),
        "ledger" => cli_ledger(params, &load_catalog(rest)?),
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("Cardwise: pick the card that earns the most");
    println!();
    println!("Usage: cardwise <command> [--catalog <cards.csv>]");
    println!();
    println!("Commands:");
    println!("  cards                                  List cards in the catalog");
    println!("  earnings <card> <category> <amount>    What one card earns on a purchase");
    println!("    --year-spend <amount>                Category spend so far this year");
    println!("    --month-spend <amount>               Category spend so far this month");
    println!("  recommend <category> <amount> <card>…  Best of your cards for a purchase");
    println!("  venue <place> <card>…                  Best of your cards for a venue or merchant");
    println!("  ledger <file.csv>                      Replay date,card,category,amount rows");
    println!("  --help, -h                             Show this help");
    println!("  --version, -V                          Show version");
    println!();
    println!("Catalog: --catalog, then $CARDWISE_CATALOG, then cards.csv in the data");
    println!("directory, then the built-in list.");
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn positionals(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn load_catalog(args: &[String]) -> Result<CardCatalog> {
    let config = Config::resolve(flag_value(args, "--catalog"))?;
    tracing::debug!(source = ?config.catalog, "catalog source");
    config.load_catalog()
}

fn parse_category(raw: &str, categorizer: &Categorizer) -> SpendingCategory {
    let key = categorizer.normalize(raw);
    let category = categorizer.resolve(&key);
    if key.known().is_none() {
        eprintln!("Note: '{raw}' not recognized, using {category}");
    }
    category
}

fn find_card<'a>(catalog: &'a CardCatalog, name: &str) -> Result<&'a CardDefinition> {
    catalog.find(name).ok_or_else(|| {
        let lower = name.to_lowercase();
        let close: Vec<&str> = catalog
            .all_definitions()
            .iter()
            .map(|c| c.product_name.as_str())
            .filter(|n| n.to_lowercase().contains(&lower))
            .collect();
        if close.is_empty() {
            anyhow::anyhow!("Card '{name}' not found (see `cardwise cards`)")
        } else {
            anyhow::anyhow!("Card '{name}' not found. Did you mean: {}?", close.join(", "))
        }
    })
}

fn cli_cards(catalog: &CardCatalog) -> Result<()> {
    if catalog.is_empty() {
        println!("No cards");
        return Ok(());
    }

    println!(
        "{:<26} {:<16} {:<17} {:>9}  Base / bonus categories",
        "Card", "Issuer", "Network", "Fee"
    );
    println!("{}", "─".repeat(100));
    for card in catalog.all_definitions() {
        let bonus: Vec<String> = card
            .reward_rates
            .iter()
            .map(|r| format!("{} {}", r.category.as_str(), r.description()))
            .collect();
        println!(
            "{:<26} {:<16} {:<17} {:>9}  {}{}",
            truncate(&card.product_name, 26),
            truncate(&card.institution_id, 16),
            card.network.as_str(),
            format_amount(card.annual_fee),
            card.base_rate.description(),
            if bonus.is_empty() {
                String::new()
            } else {
                format!(" / {}", bonus.join(", "))
            }
        );
    }
    Ok(())
}

fn cli_earnings(params: &[String], all_args: &[String], catalog: &CardCatalog) -> Result<()> {
    if params.len() < 3 {
        anyhow::bail!(
            "Usage: cardwise earnings <card> <category> <amount> [--year-spend X] [--month-spend Y]"
        );
    }
    let card = find_card(catalog, &params[0])?;
    let category = parse_category(&params[1], &Categorizer::default());
    let amount = parse_amount(&params[2])?;
    let spend = SpendToDate::new(
        optional_amount(all_args, "--year-spend")?,
        optional_amount(all_args, "--month-spend")?,
    );

    let earnings = calculate_earnings_with(card, category, amount, spend);
    let rate = card.rate_for(category);

    println!("{}: {} on {}", card.product_name, format_amount(amount), category);
    println!("{}", "─".repeat(40));
    println!("  Rate:       {}", earnings.description);
    if rate.has_cap() {
        let effective = cardwise::calc::effective_amount(rate, amount, spend);
        println!("  Eligible:   {}", format_amount(effective));
    }
    if !rate.is_percentage {
        println!("  Points:     {}", format_points(earnings.points));
    }
    println!("  Value:      {}", format_amount(earnings.cash_value));
    Ok(())
}

fn optional_amount(args: &[String], flag: &str) -> Result<Decimal> {
    match flag_value(args, flag) {
        Some(raw) => parse_amount(raw),
        None => Ok(Decimal::ZERO),
    }
}

fn cli_recommend(params: &[String], catalog: &CardCatalog) -> Result<()> {
    if params.len() < 2 {
        anyhow::bail!("Usage: cardwise recommend <category> <amount> <card>…");
    }
    let engine = RecommendationEngine::new(catalog.clone());
    let category = parse_category(&params[0], engine.categorizer());
    let amount = parse_amount(&params[1])?;
    let cards = &params[2..];

    let result = engine.recommend(category, amount, cards);
    if !result.unresolved.is_empty() {
        eprintln!("Warning: unknown card(s) ignored: {}", result.unresolved.join(", "));
    }

    println!("{}", result.reason);
    if result.card.is_none() {
        return Ok(());
    }

    println!();
    println!("{:<28} {:<18} {:>10} {:>12}", "Card", "Rate", "Points", "Value");
    println!("{}", "─".repeat(71));
    for ranked in engine.rank(category, amount, cards) {
        println!(
            "{:<28} {:<18} {:>10} {:>12}",
            truncate(&ranked.card.product_name, 28),
            ranked.earnings.description,
            format_points(ranked.earnings.points),
            format_amount(ranked.earnings.cash_value),
        );
    }
    Ok(())
}

fn cli_venue(params: &[String], catalog: &CardCatalog) -> Result<()> {
    if params.is_empty() {
        anyhow::bail!("Usage: cardwise venue <place> <card>…");
    }
    let mut wallet = Vec::new();
    let mut unknown = Vec::new();
    for name in &params[1..] {
        match catalog.find(name) {
            Some(card) => wallet.push(card.clone()),
            None => unknown.push(name.as_str()),
        }
    }
    if !unknown.is_empty() {
        eprintln!("Warning: unknown card(s) ignored: {}", unknown.join(", "));
    }

    let (card, reason) = SimpleRulesEngine::default().recommend(&params[0], &wallet);
    match card {
        Some(card) => println!("Use {}: {reason}", card.product_name),
        None => println!("{reason}"),
    }
    Ok(())
}

fn cli_ledger(params: &[String], catalog: &CardCatalog) -> Result<()> {
    let Some(file) = params.first() else {
        anyhow::bail!("Usage: cardwise ledger <file.csv>");
    };
    let expanded = crate::run::shellexpand(file);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file}");
    }

    let entries = read_ledger_csv(path, &Categorizer::default())?;
    let (report, _) = replay(catalog, &entries);
    println!("Replayed {} transactions", report.lines.len());
    if !report.unknown_cards.is_empty() {
        eprintln!(
            "Warning: unknown card(s), no earnings counted: {}",
            report.unknown_cards.join(", ")
        );
    }

    println!();
    println!(
        "{:<10} {:<24} {:<18} {:>12} {:>10}",
        "Date", "Card", "Category", "Amount", "Value"
    );
    println!("{}", "─".repeat(78));
    for line in &report.lines {
        println!(
            "{:<10} {:<24} {:<18} {:>12} {:>10}",
            line.entry.date.format("%Y-%m-%d"),
            truncate(&line.entry.card_name, 24),
            truncate(line.entry.category.display_name(), 18),
            format_amount(line.entry.amount),
            format_amount(line.earnings.cash_value),
        );
    }

    if !report.totals.is_empty() {
        println!();
        println!("Earnings by Card:");
        for total in &report.totals {
            println!(
                "  {:<26} {:>4} txns  spend {:>12}  earned {:>10}",
                truncate(&total.card.product_name, 26),
                total.transactions,
                format_amount(total.spend),
                format_amount(total.cash_value),
            );
        }
        println!("  Total earned: {}", format_amount(report.total_cash_value()));
    }
    Ok(())
}
