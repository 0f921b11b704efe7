//! Native JSONL parser: one serialized `Expense` per line

use crate::types::{Expense, Result, SpendtrackError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::ExpenseParser;

/// Parser for spendtrack's own `.jsonl` export
pub struct JsonlParser;

impl JsonlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single JSONL line; invalid records yield None
    fn parse_line(&self, line: &mut [u8], line_no: usize, path: &Path) -> Option<Expense> {
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            return None;
        }

        let expense: Expense = match simd_json::from_slice(line) {
            Ok(expense) => expense,
            Err(e) => {
                tracing::warn!(file = %path.display(), line = line_no, error = %e, "skipping malformed expense");
                return None;
            }
        };

        if let Err(e) = expense.validate() {
            tracing::warn!(file = %path.display(), line = line_no, error = %e, "skipping invalid expense");
            return None;
        }

        Some(expense)
    }
}

impl Default for JsonlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseParser for JsonlParser {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn extension(&self) -> &str {
        "jsonl"
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<Expense>> {
        let file = File::open(path).map_err(SpendtrackError::Io)?;
        let reader = BufReader::new(file);

        let mut expenses = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let mut bytes = line?.into_bytes();
            if let Some(expense) = self.parse_line(&mut bytes, idx + 1, path) {
                expenses.push(expense);
            }
        }

        Ok(expenses)
    }
}
