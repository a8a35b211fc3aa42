use std::collections::{BTreeMap, HashSet};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FrequencyRow – one (title, category, skill) observation
// ---------------------------------------------------------------------------

/// A single row of the aggregated skill-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub title: String,
    pub category: String,
    pub skill: String,
    pub frequency: u64,
}

impl FrequencyRow {
    pub fn new(title: &str, category: &str, skill: &str, frequency: u64) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            skill: skill.to_string(),
            frequency,
        }
    }
}

// ---------------------------------------------------------------------------
// FrequencyTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full frequency table with its distinct titles and categories.
///
/// Distinct values keep first-appearance order, which fixes the order of
/// grid cells in both plotters.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
    titles: Vec<String>,
    categories: Vec<String>,
}

impl FrequencyTable {
    /// Build the table, rejecting a skill that appears twice in the same
    /// (title, category) cell.
    pub fn from_rows(rows: Vec<FrequencyRow>) -> Result<Self> {
        let mut titles: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        {
            let mut seen: HashSet<(&str, &str, &str)> = HashSet::with_capacity(rows.len());
            for row in &rows {
                if !seen.insert((row.title.as_str(), row.category.as_str(), row.skill.as_str())) {
                    bail!(
                        "Duplicate skill '{}' for title '{}' in category '{}'",
                        row.skill,
                        row.title,
                        row.category
                    );
                }
                if !titles.contains(&row.title) {
                    titles.push(row.title.clone());
                }
                if !categories.contains(&row.category) {
                    categories.push(row.category.clone());
                }
            }
        }

        Ok(FrequencyTable {
            rows,
            titles,
            categories,
        })
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Distinct titles in table order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Distinct categories in table order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count per title, for the status bar.
    pub fn rows_per_title(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.title.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
