use regex::{Regex, RegexBuilder};

use crate::models::{CategoryKey, SpendingCategory};

/// One keyword rule: venue text containing `pattern` (or matching it, when
/// `is_regex` is set) belongs to `category`.
#[derive(Debug, Clone)]
pub struct VenueRule {
    pub pattern: String,
    pub is_regex: bool,
    pub category: SpendingCategory,
}

impl VenueRule {
    pub fn contains(pattern: &str, category: SpendingCategory) -> Self {
        Self {
            pattern: pattern.to_string(),
            is_regex: false,
            category,
        }
    }

    pub fn regex(pattern: &str, category: SpendingCategory) -> Self {
        Self {
            pattern: pattern.to_string(),
            is_regex: true,
            category,
        }
    }
}

/// Maps free-text venue and merchant strings onto spending categories.
/// Rules are tried in order; the first match wins.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CompiledRule>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    category: SpendingCategory,
    is_regex: bool,
}

impl Categorizer {
    /// Compile `rules`. Regex rules that fail to compile never match; their
    /// patterns are returned alongside so the caller can report them.
    pub fn new(rules: &[VenueRule]) -> (Self, Vec<String>) {
        let mut bad_patterns = Vec::new();
        let compiled = rules
            .iter()
            .map(|r| {
                let regex = if r.is_regex {
                    let built = RegexBuilder::new(&r.pattern).case_insensitive(true).build();
                    if built.is_err() {
                        bad_patterns.push(r.pattern.clone());
                    }
                    built.ok()
                } else {
                    None
                };
                CompiledRule {
                    pattern: r.pattern.to_lowercase(),
                    regex,
                    category: r.category,
                    is_regex: r.is_regex,
                }
            })
            .collect();

        (Self { rules: compiled }, bad_patterns)
    }

    pub fn categorize(&self, text: &str) -> Option<SpendingCategory> {
        let text_lower = text.to_lowercase();

        for rule in &self.rules {
            let matched = if rule.is_regex {
                rule.regex.as_ref().is_some_and(|re| re.is_match(text))
            } else {
                text_lower.contains(&rule.pattern)
            };

            if matched {
                return Some(rule.category);
            }
        }

        None
    }

    /// Exact category names first, then keyword rules. Text that matches
    /// neither stays `FreeText`.
    pub fn normalize(&self, text: &str) -> CategoryKey {
        match CategoryKey::parse(text) {
            CategoryKey::FreeText(free) => match self.categorize(&free) {
                Some(category) => CategoryKey::Known(category),
                None => CategoryKey::FreeText(free),
            },
            known => known,
        }
    }

    /// The category a key earns under. Unmatched free text earns the
    /// catch-all rate.
    pub fn resolve(&self, key: &CategoryKey) -> SpendingCategory {
        match key {
            CategoryKey::Known(category) => *category,
            CategoryKey::FreeText(text) => self
                .categorize(text)
                .unwrap_or(SpendingCategory::Everything),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        // The built-in patterns are all valid.
        Self::new(&default_rules()).0
    }
}

/// Built-in vocabulary for point-of-interest categories and well-known merchants.
pub fn default_rules() -> Vec<VenueRule> {
    use SpendingCategory::*;

    let contains: &[(&str, SpendingCategory)] = &[
        // Delivery apps bill as dining, so they go before rideshare
        ("uber eats", Dining),
        ("doordash", Dining),
        ("grubhub", Dining),
        ("starbucks", Coffee),
        ("dunkin", Coffee),
        ("coffee", Coffee),
        ("espresso", Coffee),
        ("cafe", Coffee),
        ("café", Coffee),
        ("uber", Rideshare),
        ("lyft", Rideshare),
        ("taxi", Rideshare),
        ("airline", Airfare),
        ("airways", Airfare),
        ("flight", Airfare),
        ("hotel", Hotels),
        ("motel", Hotels),
        ("marriott", Hotels),
        ("hilton", Hotels),
        ("hyatt", Hotels),
        ("resort", Hotels),
        ("lodging", Hotels),
        ("airport", Travel),
        ("car rental", Travel),
        ("parking", Travel),
        ("cruise", Travel),
        ("travel", Travel),
        ("publictransport", Transit),
        ("public transport", Transit),
        ("transit", Transit),
        ("subway", Transit),
        ("train station", Transit),
        ("gas station", Gas),
        ("gasstation", Gas),
        ("fuel", Gas),
        ("evcharger", Gas),
        ("ev charger", Gas),
        ("chevron", Gas),
        ("exxon", Gas),
        ("costco", Wholesale),
        ("sam's club", Wholesale),
        ("wholesale", Wholesale),
        ("grocery", Groceries),
        ("supermarket", Groceries),
        ("foodmarket", Groceries),
        ("food market", Groceries),
        ("whole foods", Groceries),
        ("trader joe", Groceries),
        ("safeway", Groceries),
        ("kroger", Groceries),
        ("pharmacy", Drugstores),
        ("drugstore", Drugstores),
        ("walgreens", Drugstores),
        ("rite aid", Drugstores),
        ("department store", DepartmentStores),
        ("macy", DepartmentStores),
        ("nordstrom", DepartmentStores),
        ("netflix", Streaming),
        ("spotify", Streaming),
        ("hulu", Streaming),
        ("streaming", Streaming),
        ("amazon", Online),
        ("online", Online),
        ("restaurant", Dining),
        ("dining", Dining),
        ("bakery", Dining),
        ("brewery", Dining),
        ("winery", Dining),
        ("nightlife", Dining),
        ("pizza", Dining),
        ("bistro", Dining),
        ("diner", Dining),
        ("grill", Dining),
    ];

    let regexes: &[(&str, SpendingCategory)] = &[
        (r"\bgas\b", Gas),
        (r"\b(bp|mobil)\b", Gas),
        (r"\bshell\b", Gas),
        (r"\bmetro\b", Transit),
        (r"\bcvs\b", Drugstores),
        (r"\b(bar|pub)\b", Dining),
    ];

    contains
        .iter()
        .map(|&(p, c)| VenueRule::contains(p, c))
        .chain(regexes.iter().map(|&(p, c)| VenueRule::regex(p, c)))
        .collect()
}
