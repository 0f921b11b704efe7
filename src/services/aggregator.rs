//! Aggregator service for category totals and day/week time series
//!
//! Day and week boundaries are computed in the time zone the aggregator is
//! built with. Weeks always start on Monday.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Weekday};

use crate::types::{BucketMap, CategoryInsight, Expense, Timestamp};

/// First day of a weekly bucket, independent of locale
pub const WEEK_START: Weekday = Weekday::Mon;

/// Aggregator for per-category totals, pinned to one time zone
#[derive(Debug, Clone)]
pub struct Aggregator<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> Aggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Totals per category, sorted by total descending.
    ///
    /// Name and currency come from the first expense seen for each category.
    /// Ties keep first-seen order.
    pub fn by_category<'a, I>(&self, expenses: I) -> Vec<CategoryInsight>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut insights: Vec<CategoryInsight> = Vec::new();
        let mut index: HashMap<u64, usize> = HashMap::new();

        for expense in expenses {
            match index.get(&expense.category.id) {
                Some(&i) => insights[i].total += expense.cost,
                None => {
                    index.insert(expense.category.id, insights.len());
                    insights.push(CategoryInsight {
                        id: expense.category.id,
                        name: expense.category.name.clone(),
                        total: expense.cost,
                        currency_code: expense.currency_code.clone(),
                    });
                }
            }
        }

        // sort_by is stable
        insights.sort_by(|a, b| b.total.total_cmp(&a.total));
        insights
    }

    /// Category totals per calendar day, keyed by local midnight.
    ///
    /// Every day between the first and last day with an expense is present;
    /// days without expenses map to an empty list.
    pub fn by_day(&self, expenses: &[Expense]) -> BucketMap {
        self.by_date(expenses)
            .into_iter()
            .map(|(day, insights)| (self.start_of_day(day), insights))
            .collect()
    }

    /// Category totals per Monday-based week, keyed by Monday local midnight.
    ///
    /// Built from the gap-filled daily buckets, so weeks without any expense
    /// inside the observed range are still present (empty).
    pub fn by_week(&self, expenses: &[Expense]) -> BucketMap {
        let mut weeks: BucketMap = BTreeMap::new();

        for (day, day_insights) in self.by_date(expenses) {
            let week_key = self.start_of_day(week_start(day));
            match weeks.entry(week_key) {
                Entry::Vacant(slot) => {
                    slot.insert(day_insights);
                }
                Entry::Occupied(mut slot) => merge_insights(slot.get_mut(), day_insights),
            }
        }

        weeks
    }

    /// Calendar day of an expense in the pinned zone
    pub fn local_date(&self, expense: &Expense) -> NaiveDate {
        expense.date.with_timezone(&self.tz).date_naive()
    }

    /// Milliseconds since epoch of the first instant of `date` in the pinned zone.
    pub fn start_of_day(&self, date: NaiveDate) -> Timestamp {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.tz.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => dt.timestamp_millis(),
            LocalResult::Ambiguous(earlier, _) => earlier.timestamp_millis(),
            LocalResult::None => {
                // DST spring-forward: midnight doesn't exist, take the first valid hour
                (1..24)
                    .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
                    .find_map(|dt| self.tz.from_local_datetime(&dt).earliest())
                    .map(|dt| dt.timestamp_millis())
                    .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
            }
        }
    }

    /// Gap-filled daily buckets keyed by calendar date
    fn by_date(&self, expenses: &[Expense]) -> BTreeMap<NaiveDate, Vec<CategoryInsight>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
        for expense in expenses {
            grouped
                .entry(self.local_date(expense))
                .or_default()
                .push(expense);
        }

        let (Some((&first, _)), Some((&last, _))) =
            (grouped.first_key_value(), grouped.last_key_value())
        else {
            return BTreeMap::new();
        };

        let days: BTreeMap<NaiveDate, Vec<CategoryInsight>> = first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|day| {
                let insights = grouped
                    .get(&day)
                    .map(|day_expenses| self.by_category(day_expenses.iter().copied()))
                    .unwrap_or_default();
                (day, insights)
            })
            .collect();

        tracing::debug!(
            expenses = expenses.len(),
            active_days = grouped.len(),
            days = days.len(),
            "bucketed expenses by day"
        );

        days
    }
}

/// Most recent Monday at or before `day`
pub fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = (7 + day.weekday().num_days_from_monday() - WEEK_START.num_days_from_monday()) % 7;
    day - Duration::days(offset as i64)
}

/// Fold one day's insights into a week: same id adds up, new ids are appended.
fn merge_insights(week: &mut Vec<CategoryInsight>, day: Vec<CategoryInsight>) {
    for insight in day {
        match week.iter_mut().find(|existing| existing.id == insight.id) {
            Some(existing) => existing.total += insight.total,
            None => week.push(insight),
        }
    }
}
