//! Plain-text reports printed by the CLI subcommands

use std::fmt::Display;

use chrono::TimeZone;

use crate::services::{format_amount, format_date, Dashboard};
use crate::types::{BucketMap, CategoryInsight, Expense};

const NAME_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 16;

fn insight_line(indent: &str, insight: &CategoryInsight) -> String {
    format!(
        "{}{:<nw$} {:>aw$}\n",
        indent,
        insight.name,
        format_amount(insight.total, &insight.currency_code),
        nw = NAME_WIDTH,
        aw = AMOUNT_WIDTH
    )
}

/// Category totals table with a trailing grand total
pub fn render_categories(insights: &[CategoryInsight]) -> String {
    if insights.is_empty() {
        return "No expenses\n".to_string();
    }

    let mut out = String::new();
    for insight in insights {
        out.push_str(&insight_line("", insight));
    }

    let total: f64 = insights.iter().map(|i| i.total).sum();
    let currency = insights
        .first()
        .map(|i| i.currency_code.as_str())
        .unwrap_or_default();
    out.push_str(&format!(
        "{:<nw$} {:>aw$}\n",
        "Total",
        format_amount(total, currency),
        nw = NAME_WIDTH,
        aw = AMOUNT_WIDTH
    ));
    out
}

/// One block per bucket, headed by its formatted start date
pub fn render_buckets<Tz>(buckets: &BucketMap, tz: &Tz, heading: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if buckets.is_empty() {
        return "No expenses\n".to_string();
    }

    let mut out = String::new();
    for (key, insights) in buckets {
        out.push_str(&format!("{}{}\n", heading, format_date(*key, tz)));
        if insights.is_empty() {
            out.push_str("  (no expenses)\n");
        }
        for insight in insights {
            out.push_str(&insight_line("  ", insight));
        }
    }
    out
}

/// Expense table: date, description, category, amount, participants
pub fn render_expenses<Tz>(expenses: &[Expense], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if expenses.is_empty() {
        return "No expenses\n".to_string();
    }

    let mut out = String::new();
    for expense in expenses {
        let users: Vec<String> = expense.users.iter().map(|u| u.user.full_name()).collect();
        out.push_str(&format!(
            "{:<22} {} [{}]  {}",
            format_date(expense.date.timestamp_millis(), tz),
            expense.description,
            expense.category.name,
            format_amount(expense.cost, &expense.currency_code),
        ));
        if !users.is_empty() {
            out.push_str(&format!("  ({})", users.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Overview: grand total, range covered, category breakdown
pub fn render_summary<Tz>(dashboard: &Dashboard, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let currency = dashboard
        .by_category
        .first()
        .map(|i| i.currency_code.as_str())
        .unwrap_or_default();

    let mut out = format!(
        "Total: {} ({} expenses)\n",
        format_amount(dashboard.total, currency),
        dashboard.expense_count
    );

    if let (Some(first), Some(last)) = (
        dashboard.by_day.keys().next(),
        dashboard.by_day.keys().next_back(),
    ) {
        out.push_str(&format!(
            "Period: {} to {} ({} days, {} weeks)\n",
            format_date(*first, tz),
            format_date(*last, tz),
            dashboard.by_day.len(),
            dashboard.by_week.len()
        ));
    }

    out.push_str(&format!(
        "Catalog: {} categories, {} people\n\n",
        dashboard.categories.len(),
        dashboard.users.len()
    ));
    out.push_str(&render_categories(&dashboard.by_category));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Aggregator, ExpenseFilter};
    use crate::types::{Category, ExpenseUser, User};
    use chrono::Utc;

    fn make_expense(id: u64, cost: f64, day: u32, category: (u64, &str)) -> Expense {
        Expense {
            id,
            cost,
            currency_code: "USD".into(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            description: format!("item {}", id),
            category: Category {
                id: category.0,
                name: category.1.into(),
            },
            users: Vec::new(),
            created_at: None,
        }
    }

    fn scenario() -> Vec<Expense> {
        vec![
            make_expense(1, 10.0, 6, (1, "Food")),
            make_expense(2, 5.0, 6, (2, "Transport")),
            make_expense(3, 7.0, 8, (1, "Food")),
        ]
    }

    #[test]
    fn test_render_categories() {
        let insights = Aggregator::new(Utc).by_category(&scenario());
        let text = render_categories(&insights);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].ends_with("USD 17"));
        assert!(lines[1].starts_with("Transport"));
        assert!(lines[2].starts_with("Total"));
        assert!(lines[2].ends_with("USD 22"));
    }

    #[test]
    fn test_render_categories_empty() {
        assert_eq!(render_categories(&[]), "No expenses\n");
    }

    #[test]
    fn test_render_daily_marks_empty_days() {
        let days = Aggregator::new(Utc).by_day(&scenario());
        let text = render_buckets(&days, &Utc, "");

        assert!(text.contains("Monday May 6\n"));
        assert!(text.contains("Tuesday May 7\n  (no expenses)\n"));
        assert!(text.contains("Wednesday May 8\n"));
    }

    #[test]
    fn test_render_weekly_heading() {
        let weeks = Aggregator::new(Utc).by_week(&scenario());
        let text = render_buckets(&weeks, &Utc, "Week of ");
        assert!(text.starts_with("Week of Monday May 6\n"));
    }

    #[test]
    fn test_render_expenses_with_participants() {
        let mut expense = make_expense(1, 1234.5, 3, (1, "Food"));
        expense.users.push(ExpenseUser {
            user_id: 5,
            user: User {
                id: 5,
                first_name: "Ana".into(),
                last_name: Some("Ruiz".into()),
            },
            paid_share: 1234.5,
            owed_share: 1234.5,
        });

        let text = render_expenses(&[expense], &Utc);
        assert!(text.starts_with("Friday May 3"));
        assert!(text.contains("item 1 [Food]  USD 1,234.5  (Ana Ruiz)"));
    }

    #[test]
    fn test_render_summary() {
        let dashboard = Dashboard::build(
            &scenario(),
            &ExpenseFilter::new(),
            &Aggregator::new(Utc),
        );
        let text = render_summary(&dashboard, &Utc);

        assert!(text.starts_with("Total: USD 22 (3 expenses)\n"));
        assert!(text.contains("Period: Monday May 6 to Wednesday May 8 (3 days, 1 weeks)"));
    }
}
