//! Relative time labels for chat messages.
//!
//! Labels are a pure function of `(timestamp, now)`. Callers pass a fresh
//! `now` on every render; nothing here caches across calls.

#[cfg(test)]
#[path = "time_label_test.rs"]
mod time_label_test;

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

const MS_PER_MINUTE: i64 = 60_000;

/// Relative label for `timestamp` as seen at `now`.
///
/// Under a minute (including timestamps ahead of `now`) reads "just now",
/// then whole minutes, then whole hours, and from 24 hours on the absolute
/// date and time in the timestamp's own zone.
pub fn label<Tz>(timestamp: &DateTime<Tz>, now: DateTime<Utc>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed_ms = (now - timestamp.with_timezone(&Utc)).num_milliseconds();
    let elapsed_minutes = elapsed_ms.div_euclid(MS_PER_MINUTE);
    if elapsed_minutes < 1 {
        return "just now".to_owned();
    }
    if elapsed_minutes < 60 {
        return format!("{elapsed_minutes} min ago");
    }
    let elapsed_hours = elapsed_minutes / 60;
    if elapsed_hours < 24 {
        return format!("{elapsed_hours} h ago");
    }
    absolute(timestamp)
}

/// Numeric date and time, e.g. `07.03.2024, 09:05`.
pub fn absolute<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%d.%m.%Y, %H:%M").to_string()
}

/// Long-form date and time for profile pages, e.g. `7 March 2024, 09:05`.
pub fn long_date<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%-d %B %Y, %H:%M").to_string()
}
