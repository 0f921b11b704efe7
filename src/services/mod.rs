//! Services for expense loading, filtering and aggregation

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod data_loader;
pub mod filter;
pub mod format;
pub mod normalizer;

pub use aggregator::Aggregator;
pub use config::{Config, ZoneSetting};
pub use dashboard::Dashboard;
pub use data_loader::DataLoaderService;
pub use filter::ExpenseFilter;
pub use format::{format_amount, format_date};
pub use normalizer::normalize_text;
