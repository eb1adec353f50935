//! Date conversions between chrono and Arrow `Date32`

use chrono::{Days, NaiveDate};

/// Days from 0001-01-01 (day 1 of the common era) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a date to days since the Unix epoch (Arrow `Date32`)
#[must_use]
pub fn date_to_days(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert days since the Unix epoch back to a date
#[must_use]
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Add a non-negative day offset to a date
#[must_use]
pub fn add_days(date: NaiveDate, offset: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(offset))
}
