/// Merchant categories a card's reward table can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendingCategory {
    Dining,
    Groceries,
    Gas,
    Travel,
    Streaming,
    Transit,
    Drugstores,
    DepartmentStores,
    Wholesale,
    Everything,
    Hotels,
    Airfare,
    Rideshare,
    Coffee,
    Restaurants,
    Online,
}

impl SpendingCategory {
    /// Stable lowercase key, used in catalog files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dining => "dining",
            Self::Groceries => "groceries",
            Self::Gas => "gas",
            Self::Travel => "travel",
            Self::Streaming => "streaming",
            Self::Transit => "transit",
            Self::Drugstores => "drugstores",
            Self::DepartmentStores => "department_stores",
            Self::Wholesale => "wholesale",
            Self::Everything => "everything",
            Self::Hotels => "hotels",
            Self::Airfare => "airfare",
            Self::Rideshare => "rideshare",
            Self::Coffee => "coffee",
            Self::Restaurants => "restaurants",
            Self::Online => "online",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dining => "Dining",
            Self::Groceries => "Groceries",
            Self::Gas => "Gas",
            Self::Travel => "Travel",
            Self::Streaming => "Streaming",
            Self::Transit => "Transit",
            Self::Drugstores => "Drugstores",
            Self::DepartmentStores => "Department Stores",
            Self::Wholesale => "Wholesale Clubs",
            Self::Everything => "Everything Else",
            Self::Hotels => "Hotels",
            Self::Airfare => "Airfare",
            Self::Rideshare => "Rideshare",
            Self::Coffee => "Coffee",
            Self::Restaurants => "Restaurants",
            Self::Online => "Online Shopping",
        }
    }

    /// Parse a key, display name or camelCase spelling (case-insensitive).
    /// Returns `None` for anything else; free text goes through the categorizer.
    pub fn parse(s: &str) -> Option<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::all()
            .iter()
            .copied()
            .find(|c| {
                c.as_str().replace('_', "") == folded
                    || c.display_name().replace(' ', "").to_lowercase() == folded
            })
            .or(match folded.as_str() {
                "default" | "other" | "all" => Some(Self::Everything),
                "departmentstore" => Some(Self::DepartmentStores),
                "drugstore" | "pharmacy" => Some(Self::Drugstores),
                "grocery" => Some(Self::Groceries),
                "restaurant" => Some(Self::Restaurants),
                "hotel" => Some(Self::Hotels),
                _ => None,
            })
    }

    pub fn all() -> &'static [SpendingCategory] {
        &[
            Self::Dining,
            Self::Groceries,
            Self::Gas,
            Self::Travel,
            Self::Streaming,
            Self::Transit,
            Self::Drugstores,
            Self::DepartmentStores,
            Self::Wholesale,
            Self::Everything,
            Self::Hotels,
            Self::Airfare,
            Self::Rideshare,
            Self::Coffee,
            Self::Restaurants,
            Self::Online,
        ]
    }
}

impl std::fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A category as callers hand it over: either already one of ours, or
/// free text from a point-of-interest search that still needs mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKey {
    Known(SpendingCategory),
    FreeText(String),
}

impl CategoryKey {
    pub fn parse(s: &str) -> Self {
        match SpendingCategory::parse(s) {
            Some(category) => Self::Known(category),
            None => Self::FreeText(s.trim().to_string()),
        }
    }

    pub fn known(&self) -> Option<SpendingCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::FreeText(_) => None,
        }
    }
}

impl From<SpendingCategory> for CategoryKey {
    fn from(category: SpendingCategory) -> Self {
        Self::Known(category)
    }
}
