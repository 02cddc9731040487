//! Display formatting helpers shared by the presenters.
//!
//! All functions are pure. Fallback conventions: missing text renders as
//! [`FALLBACK_TEXT`], missing amounts as `$0.00`, missing counts as 0.

use chrono::{DateTime, Utc};

/// Fallback for missing text fields.
pub const FALLBACK_TEXT: &str = "N/A";

/// Medium date: `Jan 5, 2026`. Used for events and holiday packages.
pub fn medium_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Medium date with time: `Jan 5, 2026, 3:04 PM`. Used for bookings.
pub fn medium_date_time(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Currency with grouping separators and two decimals: `$1,234.56`.
pub fn currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < -f64::EPSILON { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// The last 8 characters of an identifier, for display brevity.
pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let start = chars.len().saturating_sub(8);
    chars[start..].iter().collect()
}

/// `Found 3 events` / `Found 1 event`. Pluralizes with a trailing `s`.
pub fn count_summary(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("Found 1 {noun}")
    } else {
        format!("Found {count} {noun}s")
    }
}

/// `2 seats` / `1 seat`.
pub fn seat_count(seats: u32) -> String {
    if seats == 1 {
        "1 seat".to_string()
    } else {
        format!("{seats} seats")
    }
}
