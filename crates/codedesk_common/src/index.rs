//! Candidate index: the loaded dataset grouped by code.
//!
//! Codes keep first-seen order from the dataset, which is the iteration
//! order the match selector relies on for tie handling. Each code maps to
//! one descriptive name (first occurrence wins) and all of its rows.

use crate::dataset::Record;
use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// How to treat rows that share a code but carry different names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Keep the first name, log the divergence
    #[default]
    FirstWins,
    /// Refuse to build the index
    Strict,
}

/// All rows sharing one code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGroup {
    pub code: String,
    pub name: String,
    pub rows: Vec<Record>,
}

impl CodeGroup {
    /// Group for a code the index does not know
    pub fn empty(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: String::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    rows: Vec<Record>,
}

/// Dataset summary for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub rows: usize,
    pub unique_codes: usize,
    /// Codes whose rows disagree on the name, in first-seen order
    pub divergent_codes: Vec<String>,
}

/// Read-only index over the knowledge base
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
    divergent: Vec<String>,
    rows: usize,
}

impl CandidateIndex {
    /// Group records by code
    pub fn build(records: Vec<Record>, policy: NamePolicy) -> Result<Self, DatasetError> {
        let mut index = Self::default();

        for record in records {
            index.rows += 1;
            match index.entries.get_mut(&record.code) {
                Some(entry) => {
                    if entry.name != record.name {
                        if policy == NamePolicy::Strict {
                            return Err(DatasetError::DivergentName {
                                code: record.code,
                                first: entry.name.clone(),
                                other: record.name,
                            });
                        }
                        if !index.divergent.contains(&record.code) {
                            warn!(
                                "Code '{}' has divergent names ('{}' vs '{}'); keeping the first",
                                record.code, entry.name, record.name
                            );
                            index.divergent.push(record.code.clone());
                        }
                    }
                    entry.rows.push(record);
                }
                None => {
                    index.order.push(record.code.clone());
                    index.entries.insert(
                        record.code.clone(),
                        Entry {
                            name: record.name.clone(),
                            rows: vec![record],
                        },
                    );
                }
            }
        }

        debug!(
            "Indexed {} rows into {} codes",
            index.rows,
            index.order.len()
        );
        Ok(index)
    }

    /// Unique codes in first-seen order
    pub fn unique_codes(&self) -> &[String] {
        &self.order
    }

    /// All rows for a code; empty for unknown codes
    pub fn group(&self, code: &str) -> CodeGroup {
        match self.entries.get(code) {
            Some(entry) => CodeGroup {
                code: code.to_string(),
                name: entry.name.clone(),
                rows: entry.rows.clone(),
            },
            None => CodeGroup::empty(code),
        }
    }

    /// Descriptive name of a code; empty for unknown codes
    pub fn name_of(&self, code: &str) -> &str {
        self.entries
            .get(code)
            .map(|entry| entry.name.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            rows: self.rows,
            unique_codes: self.order.len(),
            divergent_codes: self.divergent.clone(),
        }
    }
}
