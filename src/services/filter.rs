//! Expense filtering and catalog helpers
//!
//! Narrow the raw expense list (date range, participants, categories,
//! free-text search) before it is handed to the aggregator.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::normalizer::matches_search;
use crate::types::{Category, Expense, User};

/// Selection applied to an expense list. Unset fields don't restrict.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Inclusive lower bound on `Expense::date`
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `Expense::date`
    pub to: Option<DateTime<Utc>>,
    /// Keep expenses whose participants are all in this set
    pub user_ids: Option<HashSet<u64>>,
    /// Keep these categories; an empty set keeps every category
    pub category_ids: Option<HashSet<u64>>,
    /// Matched against description or category name
    pub search: Option<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_users(mut self, user_ids: impl IntoIterator<Item = u64>) -> Self {
        self.user_ids = Some(user_ids.into_iter().collect());
        self
    }

    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = u64>) -> Self {
        self.category_ids = Some(category_ids.into_iter().collect());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if self.from.is_some_and(|from| expense.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| expense.date > to) {
            return false;
        }

        if let Some(user_ids) = &self.user_ids {
            if !expense.users.iter().all(|u| user_ids.contains(&u.user.id)) {
                return false;
            }
        }

        if let Some(category_ids) = &self.category_ids {
            if !category_ids.is_empty() && !category_ids.contains(&expense.category.id) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !matches_search(&expense.description, search)
                && !matches_search(&expense.category.name, search)
            {
                return false;
            }
        }

        true
    }

    /// Copy out the matching expenses, preserving input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

/// Categories appearing in `expenses`, unique by id, first-seen order
pub fn distinct_categories(expenses: &[Expense]) -> Vec<Category> {
    let mut seen: HashSet<u64> = HashSet::new();
    expenses
        .iter()
        .filter(|e| seen.insert(e.category.id))
        .map(|e| e.category.clone())
        .collect()
}

/// Participants appearing in `expenses`, unique by id, first-seen order
pub fn distinct_users(expenses: &[Expense]) -> Vec<User> {
    let mut seen: HashSet<u64> = HashSet::new();
    expenses
        .iter()
        .flat_map(|e| e.users.iter())
        .filter(|u| seen.insert(u.user.id))
        .map(|u| u.user.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseUser;
    use chrono::TimeZone;

    fn user(id: u64, first: &str) -> ExpenseUser {
        ExpenseUser {
            user_id: id,
            user: User {
                id,
                first_name: first.into(),
                last_name: None,
            },
            paid_share: 0.0,
            owed_share: 0.0,
        }
    }

    fn make_expense(
        id: u64,
        day: u32,
        category: (u64, &str),
        description: &str,
        users: Vec<ExpenseUser>,
    ) -> Expense {
        Expense {
            id,
            cost: 10.0,
            currency_code: "USD".into(),
            date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            description: description.into(),
            category: Category {
                id: category.0,
                name: category.1.into(),
            },
            users,
            created_at: None,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            make_expense(1, 1, (1, "Food"), "Supermarket", vec![user(10, "Ana")]),
            make_expense(
                2,
                5,
                (2, "Transport"),
                "Taxi home",
                vec![user(10, "Ana"), user(11, "Ben")],
            ),
            make_expense(3, 9, (1, "Food"), "Café breakfast", vec![user(11, "Ben")]),
            make_expense(4, 12, (3, "Rent"), "March rent", Vec::new()),
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<u64> {
        expenses.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let result = ExpenseFilter::new().apply(&sample());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let from = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let result = ExpenseFilter::new()
            .with_range(Some(from), Some(to))
            .apply(&sample());
        assert_eq!(ids(&result), vec![2, 3]);
    }

    #[test]
    fn test_open_ended_range() {
        let from = Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap();
        let result = ExpenseFilter::new().with_range(Some(from), None).apply(&sample());
        assert_eq!(ids(&result), vec![3, 4]);
    }

    #[test]
    fn test_users_require_every_participant() {
        let result = ExpenseFilter::new().with_users([10]).apply(&sample());
        // expense 2 also includes Ben; expense 4 has no participants
        assert_eq!(ids(&result), vec![1, 4]);

        let both = ExpenseFilter::new().with_users([10, 11]).apply(&sample());
        assert_eq!(ids(&both), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_categories() {
        let result = ExpenseFilter::new().with_categories([1]).apply(&sample());
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_empty_category_set_keeps_all() {
        let result = ExpenseFilter::new()
            .with_categories(Vec::<u64>::new())
            .apply(&sample());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_search_description_and_category() {
        let by_description = ExpenseFilter::new().with_search("cafe").apply(&sample());
        assert_eq!(ids(&by_description), vec![3]);

        let by_category = ExpenseFilter::new().with_search("FOOD").apply(&sample());
        assert_eq!(ids(&by_category), vec![1, 3]);
    }

    #[test]
    fn test_filters_combine() {
        let result = ExpenseFilter::new()
            .with_categories([1, 2])
            .with_users([11])
            .apply(&sample());
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let expenses = sample();
        let before = expenses.clone();
        let _ = ExpenseFilter::new().with_categories([3]).apply(&expenses);
        assert_eq!(expenses, before);
    }

    #[test]
    fn test_distinct_categories_first_seen() {
        let categories = distinct_categories(&sample());
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Rent"]);
    }

    #[test]
    fn test_distinct_users_first_seen() {
        let users = distinct_users(&sample());
        let names: Vec<&str> = users.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
    }

    #[test]
    fn test_distinct_empty() {
        assert!(distinct_categories(&[]).is_empty());
        assert!(distinct_users(&[]).is_empty());
    }
}
