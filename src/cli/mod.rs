mod report;

pub use report::{render_buckets, render_categories, render_expenses, render_summary};

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};

use crate::services::{Aggregator, Config, Dashboard, DataLoaderService, ExpenseFilter, ZoneSetting};
use crate::types::Expense;

/// Shared expense dashboard: category totals and daily/weekly series
#[derive(Parser)]
#[command(name = "spendtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Expense export: Splitwise .json, native .jsonl, or a directory of them
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Time zone for day and week boundaries: utc, local or +HH:MM
    #[arg(long, global = true)]
    tz: Option<ZoneSetting>,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// First day to include (YYYY-MM-DD, in the selected zone)
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, in the selected zone)
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Keep expenses whose participants are all among these user ids (repeatable)
    #[arg(long = "user", global = true)]
    users: Vec<u64>,

    /// Keep only these category ids (repeatable)
    #[arg(long = "category", global = true)]
    categories: Vec<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals per category, highest first
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-category totals for every day in the range
    Daily {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-category totals per Monday-based week
    Weekly {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Totals, time series and catalogs in one report
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List expenses
    List {
        /// Match description or category name
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let (path, zone) = self.settings(Config::load)?;
        let expenses = DataLoaderService::new().load(&path)?;

        let output = match zone {
            ZoneSetting::Utc => self.execute(&expenses, &Aggregator::new(Utc))?,
            ZoneSetting::Local => self.execute(&expenses, &Aggregator::new(Local))?,
            ZoneSetting::Fixed(offset) => self.execute(&expenses, &Aggregator::new(offset))?,
        };
        print!("{}", output);
        Ok(())
    }

    /// Data path and zone: flags first, then the config file.
    ///
    /// The config is only read when a flag is missing, so a broken config
    /// file does not block a fully specified command.
    fn settings<F>(&self, load_config: F) -> anyhow::Result<(PathBuf, ZoneSetting)>
    where
        F: FnOnce() -> crate::types::Result<Config>,
    {
        let config = match (&self.path, self.tz) {
            (Some(_), Some(_)) => Config::default(),
            _ => load_config()?,
        };
        let path = self
            .path
            .clone()
            .or(config.data_path)
            .context("No expense data: pass --path or set data_path in ~/.spendtrack/config.json")?;
        Ok((path, self.tz.unwrap_or(config.timezone)))
    }

    /// Render the selected subcommand for already-loaded expenses
    fn execute<Tz>(
        &self,
        expenses: &[Expense],
        aggregator: &Aggregator<Tz>,
    ) -> anyhow::Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut filter = self.filter.to_filter(aggregator);
        let tz = aggregator.timezone();

        let output = match &self.command {
            Commands::Categories { json } => {
                let insights = aggregator.by_category(&filter.apply(expenses));
                if *json {
                    serde_json::to_string_pretty(&insights)? + "\n"
                } else {
                    render_categories(&insights)
                }
            }
            Commands::Daily { json } => {
                let days = aggregator.by_day(&filter.apply(expenses));
                if *json {
                    serde_json::to_string_pretty(&days)? + "\n"
                } else {
                    render_buckets(&days, tz, "")
                }
            }
            Commands::Weekly { json } => {
                let weeks = aggregator.by_week(&filter.apply(expenses));
                if *json {
                    serde_json::to_string_pretty(&weeks)? + "\n"
                } else {
                    render_buckets(&weeks, tz, "Week of ")
                }
            }
            Commands::Summary { json } => {
                let dashboard = Dashboard::build(expenses, &filter, aggregator);
                if *json {
                    serde_json::to_string_pretty(&dashboard)? + "\n"
                } else {
                    render_summary(&dashboard, tz)
                }
            }
            Commands::List { search, json } => {
                filter.search = search.clone();
                let shown = filter.apply(expenses);
                if *json {
                    serde_json::to_string_pretty(&shown)? + "\n"
                } else {
                    render_expenses(&shown, tz)
                }
            }
        };

        Ok(output)
    }
}

impl FilterArgs {
    /// `from`/`to` are whole days in the aggregator's zone, both inclusive.
    fn to_filter<Tz: TimeZone>(&self, aggregator: &Aggregator<Tz>) -> ExpenseFilter {
        let from = self.from.and_then(|day| day_bounds(aggregator, day).0);
        let to = self.to.and_then(|day| day_bounds(aggregator, day).1);

        let mut filter = ExpenseFilter::new().with_range(from, to);
        if !self.users.is_empty() {
            filter = filter.with_users(self.users.iter().copied());
        }
        if !self.categories.is_empty() {
            filter = filter.with_categories(self.categories.iter().copied());
        }
        filter
    }
}

/// First and last millisecond of `day` in the aggregator's zone
fn day_bounds<Tz: TimeZone>(
    aggregator: &Aggregator<Tz>,
    day: NaiveDate,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let start = DateTime::from_timestamp_millis(aggregator.start_of_day(day));
    let end = day
        .succ_opt()
        .and_then(|next| DateTime::from_timestamp_millis(aggregator.start_of_day(next) - 1));
    (start, end)
}
