use chrono::{DateTime, Utc};

/// Number of billable days for a rental, counting both ends
///
/// Partial days are truncated before the inclusive day is added, so a rental
/// starting and ending on the same day bills one day.
#[inline]
pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days() + 1
}

/// Quote a rental at `daily_rate` for the inclusive range `start..=end`
///
/// Returns `None` when `end` is before `start`, even by less than a day.
pub fn quote_rental(daily_rate: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<(i64, f64)> {
    if end < start {
        return None;
    }
    let days = rental_days(start, end);
    Some((days, days as f64 * daily_rate))
}
