//! Weekend correction for payment dates.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Moves a Saturday or Sunday back to the preceding Friday.
///
/// Returns the corrected date and whether it changed. Weekdays pass through.
#[must_use]
pub fn adjust(date: NaiveDate) -> (NaiveDate, bool) {
    let back = match date.weekday() {
        Weekday::Sat => 1,
        Weekday::Sun => 2,
        _ => return (date, false),
    };

    date.checked_sub_days(Days::new(back))
        .map_or((date, false), |friday| (friday, true))
}
