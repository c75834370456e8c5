/*!
 * Immutable translation table.
 *
 * The table maps a source dialogue pair to its translated pair. It is
 * loaded once per run from an external JSON resource and never mutated;
 * entry order is the file order and is significant, because the normalized
 * and fragment match tiers resolve collisions by taking the first entry in
 * iteration order.
 */

use std::fs;
use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};

use crate::question_processor::DialoguePair;

/// One table entry: a source dialogue pair and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Source dialogue pair, stored trimmed
    pub source: DialoguePair,

    /// Translated dialogue pair
    pub translation: DialoguePair,
}

/// Ordered, immutable lookup table supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: Vec<TableEntry>,
}

impl TranslationTable {
    /// Build a table from entries, preserving their order
    pub fn from_entries(entries: Vec<TableEntry>) -> Self {
        TranslationTable { entries }
    }

    /// Parse a table from its JSON representation: an array of
    /// `{"source": {...}, "translation": {...}}` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: TranslationTable =
            serde_json::from_str(json).context("Failed to parse translation table JSON")?;
        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation table: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load translation table: {}", path.display()))
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
