// Date utility functions
// Exact calendar-day arithmetic; never goes through floating point

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Midnight at the start of the following day
pub fn start_of_next_day(date: NaiveDate) -> NaiveDateTime {
    add_days(date, 1).and_time(NaiveTime::MIN)
}

/// Signed number of calendar days from `from` to `to`
pub fn day_delta(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shift `date` by `days`, saturating at chrono's supported range
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_signed(Duration::days(days))
    } else {
        date.checked_sub_signed(Duration::days(-days))
    };
    shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}
