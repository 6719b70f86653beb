//! Age and birthday arithmetic used by the family tree views.

use chrono::{Datelike, NaiveDate};

/// Age in completed years on `on`
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Anniversary of `birth_date` in `year`.
/// A 29 February birthday falls on 1 March in common years.
pub fn birthday_in_year(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Next birthday on or after `today`
pub fn next_birthday(birth_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = birthday_in_year(birth_date, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        birthday_in_year(birth_date, today.year() + 1)
    }
}

pub fn days_until_birthday(birth_date: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_birthday(birth_date, today).map(|birthday| (birthday - today).num_days())
}

/// Whether the next birthday falls within `[today, today + window_days]`
pub fn has_upcoming_birthday(birth_date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    days_until_birthday(birth_date, today)
        .map(|days| days <= i64::from(window_days))
        .unwrap_or(false)
}
