//! Splitwise API export parser
//!
//! Reads the `{"expenses": [...]}` document returned by the Splitwise
//! `get_expenses` endpoint. Amounts arrive as decimal strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::ExpenseParser;
use crate::types::{Category, Expense, ExpenseUser, Result, SpendtrackError, User};

#[derive(Deserialize)]
struct SplitwiseExport {
    expenses: Vec<SplitwiseExpense>,
}

#[derive(Deserialize)]
struct SplitwiseExpense {
    id: u64,
    cost: String,
    #[serde(default)]
    currency_code: Option<String>,
    date: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    deleted_at: Option<String>,
    #[serde(default)]
    description: Option<String>,
    category: SplitwiseCategory,
    #[serde(default)]
    users: Vec<SplitwiseShare>,
}

#[derive(Deserialize)]
struct SplitwiseCategory {
    id: u64,
    name: String,
}

#[derive(Deserialize)]
struct SplitwiseShare {
    user_id: u64,
    user: SplitwiseUser,
    #[serde(default)]
    paid_share: Option<String>,
    #[serde(default)]
    owed_share: Option<String>,
}

#[derive(Deserialize)]
struct SplitwiseUser {
    id: u64,
    first_name: String,
    #[serde(default)]
    last_name: Option<String>,
}

/// Parser for Splitwise JSON exports
pub struct SplitwiseParser;

impl SplitwiseParser {
    pub fn new() -> Self {
        Self
    }

    fn convert(&self, raw: SplitwiseExpense) -> Result<Expense> {
        let cost = parse_amount(&raw.cost).ok_or_else(|| {
            SpendtrackError::InvalidInput(format!(
                "expense {} has non-numeric cost '{}'",
                raw.id, raw.cost
            ))
        })?;
        let date = parse_timestamp(&raw.date).ok_or_else(|| {
            SpendtrackError::InvalidInput(format!(
                "expense {} has invalid date '{}'",
                raw.id, raw.date
            ))
        })?;

        let users = raw
            .users
            .into_iter()
            .map(|share| ExpenseUser {
                user_id: share.user_id,
                user: User {
                    id: share.user.id,
                    first_name: share.user.first_name,
                    last_name: share.user.last_name,
                },
                paid_share: share.paid_share.as_deref().and_then(parse_amount).unwrap_or(0.0),
                owed_share: share.owed_share.as_deref().and_then(parse_amount).unwrap_or(0.0),
            })
            .collect();

        let expense = Expense {
            id: raw.id,
            cost,
            currency_code: raw.currency_code.unwrap_or_default(),
            date,
            description: raw.description.unwrap_or_default(),
            category: Category {
                id: raw.category.id,
                name: raw.category.name,
            },
            users,
            created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        };
        expense.validate()?;
        Ok(expense)
    }
}

impl Default for SplitwiseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseParser for SplitwiseParser {
    fn name(&self) -> &str {
        "splitwise"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<Expense>> {
        let mut content = fs::read(path).map_err(SpendtrackError::Io)?;
        let export: SplitwiseExport =
            simd_json::from_slice(&mut content).map_err(|e| SpendtrackError::Parse(e.to_string()))?;

        let mut expenses = Vec::with_capacity(export.expenses.len());
        for raw in export.expenses {
            if raw.deleted_at.is_some() {
                continue;
            }
            let id = raw.id;
            match self.convert(raw) {
                Ok(expense) => expenses.push(expense),
                Err(e) => {
                    tracing::warn!(file = %path.display(), expense = id, error = %e, "skipping expense");
                }
            }
        }

        Ok(expenses)
    }
}

/// Decimal string ("25.0") to a finite amount
fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
