use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_COMMON_YEAR, DAYS_PER_LEAP_YEAR, DAYS_PER_WEEK,
    FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A day of the week, numbered from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Weekday {
    #[display(fmt = "Monday")]
    Monday,
    #[display(fmt = "Tuesday")]
    Tuesday,
    #[display(fmt = "Wednesday")]
    Wednesday,
    #[display(fmt = "Thursday")]
    Thursday,
    #[display(fmt = "Friday")]
    Friday,
    #[display(fmt = "Saturday")]
    Saturday,
    #[display(fmt = "Sunday")]
    Sunday,
}

impl Weekday {
    /// All weekdays in order, starting with Monday
    pub const ALL: [Self; DAYS_PER_WEEK as usize] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the weekday number with Monday = 0 and Sunday = 6
    #[inline]
    pub const fn number_from_monday(self) -> u8 {
        self as u8
    }

    /// Looks up a weekday by its Monday-based number (0..=6)
    pub const fn from_number_from_monday(number: u8) -> Option<Self> {
        if number < DAYS_PER_WEEK {
            Some(Self::ALL[number as usize])
        } else {
            None
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        DAYS_PER_LEAP_YEAR
    } else {
        DAYS_PER_COMMON_YEAR
    }
}

/// Ordinal of a valid date within its year, 1-based
pub const fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    let mut total = day as u16;
    let mut m = JANUARY;
    while m < month {
        total += days_in_month(year, m) as u16;
        m += 1;
    }
    total
}

/// Absolute day count of a valid date, with 01.01.0001 as day 1.
///
/// Equivalent to summing the length of every year before `year`, every month
/// before `month`, and `day`, but computed in closed form.
pub const fn day_number(year: i64, month: u8, day: u8) -> i64 {
    let prior = year - 1;
    let leap_days = prior / LEAP_YEAR_CYCLE - prior / CENTURY_CYCLE + prior / GREGORIAN_CYCLE;
    prior * DAYS_PER_COMMON_YEAR as i64 + leap_days + day_of_year(year, month, day) as i64
}

/// Weekday of a valid date.
///
/// January and February count as months 13 and 14 of the previous year; the
/// resulting congruence yields Monday = 0 directly.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn weekday(year: i64, month: u8, day: u8) -> Weekday {
    let (m, y) = if month <= FEBRUARY {
        (month as i64 + MAX_MONTH as i64, year - 1)
    } else {
        (month as i64, year)
    };
    let w = (day as i64 + 2 * m + 3 * (m + 1) / 5 + y + y / LEAP_YEAR_CYCLE - y / CENTURY_CYCLE
        + y / GREGORIAN_CYCLE)
        .rem_euclid(DAYS_PER_WEEK as i64);
    Weekday::ALL[w as usize]
}
