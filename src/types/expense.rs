//! Expense record and aggregation output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Result, SpendtrackError};

/// Bucket start in milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Bucket start → per-category totals for that bucket
pub type BucketMap = BTreeMap<Timestamp, Vec<CategoryInsight>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// "First Last", or just "First" when no last name is recorded
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// A participant of an expense and their share of it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseUser {
    pub user_id: u64,
    pub user: User,
    #[serde(default)]
    pub paid_share: f64,
    #[serde(default)]
    pub owed_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: u64,
    pub cost: f64,
    /// Carried through to insights, never converted
    #[serde(default)]
    pub currency_code: String,
    /// Source of truth for day/week bucketing
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub users: Vec<ExpenseUser>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Reject records whose cost would corrupt a category total.
    pub fn validate(&self) -> Result<()> {
        if !self.cost.is_finite() {
            return Err(SpendtrackError::InvalidInput(format!(
                "expense {} has non-finite cost",
                self.id
            )));
        }
        if self.cost < 0.0 {
            return Err(SpendtrackError::InvalidInput(format!(
                "expense {} has negative cost {}",
                self.id, self.cost
            )));
        }
        Ok(())
    }
}

/// Aggregated total cost for one category over some expense subset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryInsight {
    pub id: u64,
    pub name: String,
    pub total: f64,
    pub currency_code: String,
}
