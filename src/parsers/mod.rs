//! Parser trait and implementations for expense exports

mod jsonl;
mod splitwise;

pub use jsonl::JsonlParser;
pub use splitwise::SplitwiseParser;

use crate::types::{Expense, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Trait for parsing expenses from one export format
pub trait ExpenseParser: Send + Sync {
    /// Parser name (e.g., "splitwise")
    fn name(&self) -> &str;

    /// File extension this parser handles, without the dot
    fn extension(&self) -> &str;

    /// Parse a single file and return validated expenses
    fn parse_file(&self, path: &Path) -> Result<Vec<Expense>>;

    /// Glob pattern for finding files under a directory
    fn file_pattern(&self) -> String {
        format!("**/*.{}", self.extension())
    }

    /// Collect all files under `dir` matching the glob pattern
    fn collect_files(&self, dir: &Path) -> Vec<PathBuf> {
        let pattern = dir.join(self.file_pattern());
        glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default()
    }

    /// Parse every matching file under `dir` in parallel, with deduplication
    fn parse_dir(&self, dir: &Path) -> Result<Vec<Expense>> {
        let mut files = self.collect_files(dir);
        files.sort();
        Ok(self.parse_and_dedup(&files))
    }

    /// Parse files in parallel and keep the first expense seen per id
    fn parse_and_dedup(&self, files: &[PathBuf]) -> Vec<Expense> {
        let per_file: Vec<Vec<Expense>> = files
            .par_iter()
            .map(|f| match self.parse_file(f) {
                Ok(expenses) => expenses,
                Err(e) => {
                    tracing::warn!(parser = self.name(), file = %f.display(), error = %e, "failed to parse file");
                    Vec::new()
                }
            })
            .collect();

        dedup_by_id(per_file.into_iter().flatten())
    }
}

/// Keep the first expense for each id, preserving order
pub fn dedup_by_id(expenses: impl IntoIterator<Item = Expense>) -> Vec<Expense> {
    let mut seen: HashSet<u64> = HashSet::new();
    expenses.into_iter().filter(|e| seen.insert(e.id)).collect()
}

/// Registry of available parsers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ExpenseParser>>,
}

impl ParserRegistry {
    /// Create a new registry with default parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(JsonlParser::new()), Box::new(SplitwiseParser::new())],
        }
    }

    /// Get all registered parsers
    pub fn parsers(&self) -> &[Box<dyn ExpenseParser>] {
        &self.parsers
    }

    /// Find a parser by name
    pub fn get(&self, name: &str) -> Option<&dyn ExpenseParser> {
        self.parsers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Find the parser responsible for a file, by extension
    pub fn for_path(&self, path: &Path) -> Option<&dyn ExpenseParser> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.parsers
            .iter()
            .find(|p| p.extension() == ext)
            .map(|p| p.as_ref())
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
