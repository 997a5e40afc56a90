//! Display formatting for money, dates and names.
//!
//! Unparsable date input renders as an empty string instead of failing.

use crate::dates::{parse_calendar_date, parse_timestamp};
use crate::model::Kes;
use chrono::{DateTime, NaiveDate, Utc};

/// `Ksh 1,234`; negatives render as `-Ksh 1,234`.
pub fn format_kes(amount: Kes) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount < 0 {
        format!("-Ksh {grouped}")
    } else {
        format!("Ksh {grouped}")
    }
}

/// `Mar 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Mar 5`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `March 5, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `Mar '24`, used for trend axes.
pub fn format_month_label(date: NaiveDate) -> String {
    date.format("%b '%y").to_string()
}

/// `h:mm AM`.
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Calendar string to `Mar 5, 2024`, or empty when unparsable.
pub fn format_date_str(value: &str) -> String {
    parse_calendar_date(value)
        .map(format_date)
        .unwrap_or_default()
}

/// Inbox list date: clock time today, `Yesterday`, else `Mar 5`.
pub fn email_date_label(value: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(value) else {
        return String::new();
    };
    email_timestamp_label(at, now)
}

pub fn email_timestamp_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = at.date_naive();
    let today = now.date_naive();
    if day == today {
        format_clock(at)
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        format_short_date(day)
    }
}

/// First letters of the first two name parts, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
