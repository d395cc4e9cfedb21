//! Registry of known card products.
//!
//! A catalog is built once (from the built-in table or a CSV file) and only
//! read afterwards, so it can be shared freely between threads.

mod builtin;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::import::{parse_catalog, CsvTable};
use crate::models::{CardDefinition, CardId};

#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    definitions: Vec<CardDefinition>,
}

impl CardCatalog {
    pub fn new(definitions: Vec<CardDefinition>) -> Self {
        Self { definitions }
    }

    /// The reference catalog compiled into the crate.
    pub fn builtin() -> Self {
        Self::new(builtin::definitions())
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let table = CsvTable::open(path)?;
        let definitions = parse_catalog(&table)
            .with_context(|| format!("Invalid card catalog: {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            cards = definitions.len(),
            "loaded card catalog"
        );
        Ok(Self::new(definitions))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let table = CsvTable::from_reader(reader)?;
        Ok(Self::new(parse_catalog(&table)?))
    }

    pub fn all_definitions(&self) -> &[CardDefinition] {
        &self.definitions
    }

    /// Exact, case-sensitive match on product name alone. When two issuers
    /// share a product name the first one in catalog order is returned; use
    /// [`CardCatalog::find_by_id`] to tell them apart.
    pub fn find(&self, product_name: &str) -> Option<&CardDefinition> {
        self.definitions
            .iter()
            .find(|c| c.product_name == product_name)
    }

    pub fn find_by_id(&self, id: &CardId) -> Option<&CardDefinition> {
        self.definitions.iter().find(|c| c.is(id))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests;
