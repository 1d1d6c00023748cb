//! Mortality rule: a member is dead once it reaches the death age.

use chrono::{Datelike, NaiveDate};

/// Age (in whole years) at which members die.
pub const DEATH_AGE: u32 = 100;

/// Whole years elapsed between `birth_date` and `at`.
///
/// A birthday counts only once its month and day have been reached, so a
/// member born on Feb 29 turns one year older on Mar 1 in common years.
/// Birth dates after `at` yield 0.
pub fn age_at(birth_date: NaiveDate, at: NaiveDate) -> u32 {
    if at <= birth_date {
        return 0;
    }
    let mut years = at.year() - birth_date.year();
    if (at.month(), at.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// True when the member has reached [`DEATH_AGE`] at `at`.
pub fn is_deceased(birth_date: NaiveDate, at: NaiveDate) -> bool {
    age_at(birth_date, at) >= DEATH_AGE
}
