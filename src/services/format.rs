//! Display formatting for bucket keys and amounts

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::types::Timestamp;

/// Render a bucket key as "<weekday> <month> <day>" in the given zone.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use spendtrack::services::format::format_date;
///
/// let ts = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap().timestamp_millis();
/// assert_eq!(format_date(ts, &Utc), "Friday May 3");
/// ```
pub fn format_date<Tz>(timestamp: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(timestamp) {
        Some(instant) => instant.with_timezone(tz).format("%A %B %-d").to_string(),
        None => String::new(),
    }
}

/// Render an amount as "<code> 1,234.5".
///
/// Thousands are comma-grouped, at most two fraction digits are kept and
/// trailing zeros dropped. A missing currency code renders as "$".
pub fn format_amount(amount: f64, currency_code: &str) -> String {
    let symbol = if currency_code.is_empty() {
        "$"
    } else {
        currency_code
    };

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{} {}{}", symbol, sign, grouped)
    } else {
        format!("{} {}{}.{}", symbol, sign, grouped, frac_part)
    }
}
