//! Dashboard bundle: everything the charts and tables consume, in one pass

use chrono::TimeZone;
use serde::Serialize;

use super::filter::{distinct_categories, distinct_users, ExpenseFilter};
use super::Aggregator;
use crate::types::{BucketMap, Category, CategoryInsight, Expense, User};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    /// Sum of filtered costs
    pub total: f64,
    pub expense_count: usize,
    pub by_category: Vec<CategoryInsight>,
    pub by_day: BucketMap,
    pub by_week: BucketMap,
    /// Catalog over the unfiltered list, for filter controls
    pub categories: Vec<Category>,
    /// Catalog over the unfiltered list, for filter controls
    pub users: Vec<User>,
}

impl Dashboard {
    pub fn build<Tz: TimeZone>(
        expenses: &[Expense],
        filter: &ExpenseFilter,
        aggregator: &Aggregator<Tz>,
    ) -> Self {
        let filtered = filter.apply(expenses);
        let by_category = aggregator.by_category(&filtered);

        Self {
            total: by_category.iter().map(|i| i.total).sum(),
            expense_count: filtered.len(),
            by_day: aggregator.by_day(&filtered),
            by_week: aggregator.by_week(&filtered),
            by_category,
            categories: distinct_categories(expenses),
            users: distinct_users(expenses),
        }
    }
}
