//! Unified data loading service
//!
//! Loads expenses from a single export file or from every supported export
//! under a directory, merging sources into one date-ordered list.

use std::path::Path;

use crate::parsers::{dedup_by_id, ParserRegistry};
use crate::types::{Expense, Result, SpendtrackError};

/// Expense loading across all registered parsers
pub struct DataLoaderService {
    registry: ParserRegistry,
}

impl DataLoaderService {
    pub fn new() -> Self {
        Self {
            registry: ParserRegistry::new(),
        }
    }

    /// Load a file or directory. Expenses are de-duplicated by id (first
    /// wins) and sorted by date ascending.
    pub fn load(&self, path: &Path) -> Result<Vec<Expense>> {
        let expenses = if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path)?
        };

        if expenses.is_empty() {
            return Err(SpendtrackError::Parse(format!(
                "No expenses found in {}",
                path.display()
            )));
        }

        let mut expenses = dedup_by_id(expenses);
        expenses.sort_by_key(|e| e.date);
        tracing::debug!(count = expenses.len(), path = %path.display(), "loaded expenses");
        Ok(expenses)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Expense>> {
        let parser = self.registry.for_path(path).ok_or_else(|| {
            SpendtrackError::Parse(format!(
                "Unsupported expense file {} (expected .json or .jsonl)",
                path.display()
            ))
        })?;
        parser.parse_file(path)
    }

    fn load_dir(&self, dir: &Path) -> Vec<Expense> {
        let mut all = Vec::new();
        for parser in self.registry.parsers() {
            match parser.parse_dir(dir) {
                Ok(expenses) => all.extend(expenses),
                Err(e) => {
                    tracing::warn!(parser = parser.name(), error = %e, "parser failed");
                }
            }
        }
        all
    }
}

impl Default for DataLoaderService {
    fn default() -> Self {
        Self::new()
    }
}
