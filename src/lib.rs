mod console;
mod consts;
mod counter;
mod error;
mod prelude;
mod types;

pub use consts::*;
pub use counter::InstanceCounter;
pub use error::{ConsoleError, DateError};
pub use types::{Weekday, days_in_month, days_in_year, is_leap_year};

use crate::consts::{DAYS_PER_GREGORIAN_CYCLE, GREGORIAN_CYCLE};
use crate::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Sub;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

/// A valid date in the proleptic Gregorian calendar.
///
/// Every value upholds `1 <= day <= days_in_month(year, month)`,
/// `1 <= month <= 12` and `year >= 1`. Constructors reject anything else, and
/// every mutating operation either succeeds or leaves the date untouched.
///
/// Each value is tracked by an [`InstanceCounter`]; clones count as new
/// instances and drops release them.
#[derive(Display)]
#[display(fmt = "{:02}.{:02}.{}", day, month, year)]
pub struct CalendarDate {
    day: u8,
    month: u8,
    year: i32,
    counter: Arc<InstanceCounter>,
}

impl CalendarDate {
    /// Creates a date from `(day, month, year)`, tracked by the global counter.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the triple is not a valid Gregorian date.
    pub fn new(day: i32, month: i32, year: i32) -> Result<Self, DateError> {
        Self::new_in(day, month, year, InstanceCounter::global())
    }

    /// Creates a date tracked by `counter` instead of the global counter.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the triple is not a valid Gregorian date.
    pub fn new_in(
        day: i32,
        month: i32,
        year: i32,
        counter: &Arc<InstanceCounter>,
    ) -> Result<Self, DateError> {
        let (day, month, year) = validate(day, month, year)?;
        Ok(Self::from_parts(day, month, year, Arc::clone(counter)))
    }

    /// The default date (01.01.2000) tracked by `counter`
    pub fn default_in(counter: &Arc<InstanceCounter>) -> Self {
        Self::from_parts(DEFAULT_DAY, DEFAULT_MONTH, DEFAULT_YEAR, Arc::clone(counter))
    }

    fn from_parts(day: u8, month: u8, year: i32, counter: Arc<InstanceCounter>) -> Self {
        counter.record_created();
        Self {
            day,
            month,
            year,
            counter,
        }
    }

    /// Returns the day of month (1..=31)
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the month (1..=12)
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the year (>= 1)
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Whether this date falls in a leap year
    pub const fn is_leap(&self) -> bool {
        is_leap_year(self.year as i64)
    }

    /// Returns the counter this date records into
    pub const fn counter(&self) -> &Arc<InstanceCounter> {
        &self.counter
    }

    /// Number of dates created against the global counter so far
    pub fn total_created() -> usize {
        InstanceCounter::global().total_created()
    }

    /// Number of dates currently alive against the global counter
    pub fn alive_count() -> usize {
        InstanceCounter::global().alive()
    }

    /// Replaces the day of month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` and leaves the date unchanged if the
    /// resulting date would be invalid.
    pub fn set_day(&mut self, day: i32) -> Result<(), DateError> {
        self.assign(day, i32::from(self.month), self.year)
    }

    /// Replaces the month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` and leaves the date unchanged if the
    /// resulting date would be invalid.
    pub fn set_month(&mut self, month: i32) -> Result<(), DateError> {
        self.assign(i32::from(self.day), month, self.year)
    }

    /// Replaces the year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` and leaves the date unchanged if the
    /// resulting date would be invalid (e.g. 29 February in a common year).
    pub fn set_year(&mut self, year: i32) -> Result<(), DateError> {
        self.assign(i32::from(self.day), i32::from(self.month), year)
    }

    /// Validates the whole triple before touching any field
    pub(crate) fn assign(&mut self, day: i32, month: i32, year: i32) -> Result<(), DateError> {
        let (day, month, year) = validate(day, month, year)?;
        self.day = day;
        self.month = month;
        self.year = year;
        Ok(())
    }

    /// Moves the date forward by `days`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year would exceed `i32::MAX`.
    pub fn add_days(&mut self, days: u32) -> Result<(), DateError> {
        self.shift_days(i64::from(days))
    }

    /// Moves the date backward by `days`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the date would fall before 01.01.0001.
    pub fn subtract_days(&mut self, days: u32) -> Result<(), DateError> {
        self.shift_days(-i64::from(days))
    }

    /// Moves the date by a signed number of days, rolling over months and
    /// years in either direction.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` and leaves the date unchanged if the
    /// result falls outside years `1..=i32::MAX`.
    pub fn shift_days(&mut self, delta: i64) -> Result<(), DateError> {
        let (day, month, year) =
            shifted(self.year, self.month, self.day, delta).ok_or(DateError::OutOfRange { delta })?;
        trace!(from = %self, delta, "shifting date");
        self.day = day;
        self.month = month;
        self.year = year;
        Ok(())
    }

    /// Returns a copy shifted by `delta` days.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn checked_add_days(&self, delta: i64) -> Result<Self, DateError> {
        let mut shifted = self.clone();
        shifted.shift_days(delta)?;
        Ok(shifted)
    }

    /// Advances by one day and returns the updated date
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` past the last representable year.
    pub fn increment(&mut self) -> Result<&mut Self, DateError> {
        self.add_days(1)?;
        Ok(self)
    }

    /// Steps back one day and returns the updated date
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` when called on 01.01.0001.
    pub fn decrement(&mut self) -> Result<&mut Self, DateError> {
        self.subtract_days(1)?;
        Ok(self)
    }

    /// Advances by one day and returns a copy of the date before the step
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` past the last representable year.
    pub fn post_increment(&mut self) -> Result<Self, DateError> {
        let prior = self.clone();
        self.add_days(1)?;
        Ok(prior)
    }

    /// Steps back one day and returns a copy of the date before the step
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` when called on 01.01.0001.
    pub fn post_decrement(&mut self) -> Result<Self, DateError> {
        let prior = self.clone();
        self.subtract_days(1)?;
        Ok(prior)
    }

    /// Absolute day count with 01.01.0001 as day 1
    pub fn day_number(&self) -> i64 {
        types::day_number(i64::from(self.year), self.month, self.day)
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: &Self) -> i64 {
        other - self
    }

    /// Ordinal day within the year, starting at 1
    pub fn day_of_year(&self) -> u16 {
        types::day_of_year(i64::from(self.year), self.month, self.day)
    }

    /// Day of the week
    pub fn day_of_week(&self) -> Weekday {
        types::weekday(i64::from(self.year), self.month, self.day)
    }

    /// Sequential week of the year: days 1-7 are week 1, days 8-14 week 2, and so on.
    /// This is not ISO-8601 week numbering.
    pub fn week_number(&self) -> u16 {
        (self.day_of_year() - 1) / u16::from(DAYS_PER_WEEK) + 1
    }

    /// Parses `DD.MM.YYYY` into a date tracked by `counter`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidFormat` if the text is not three dot-separated
    /// integers, or `DateError::InvalidDate` if they do not form a valid date.
    pub fn from_str_in(text: &str, counter: &Arc<InstanceCounter>) -> Result<Self, DateError> {
        let (day, month, year) = parse_fields(text)?;
        Self::new_in(day, month, year, counter)
    }

    /// Overwrites this date with the one parsed from `text`.
    ///
    /// # Errors
    /// Same as [`CalendarDate::from_str_in`]; on error the date keeps its prior value.
    pub fn set_from_str(&mut self, text: &str) -> Result<(), DateError> {
        let (day, month, year) = parse_fields(text)?;
        self.assign(day, month, year)
    }

    #[inline]
    const fn key(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }
}

fn invalid_date(day: i32, month: i32, year: i32) -> DateError {
    debug!(day, month, year, "rejected invalid date");
    DateError::InvalidDate { day, month, year }
}

/// Checks a raw triple against the Gregorian calendar
fn validate(day: i32, month: i32, year: i32) -> Result<(u8, u8, i32), DateError> {
    if year < MIN_YEAR {
        return Err(invalid_date(day, month, year));
    }
    let month_u8 = u8::try_from(month)
        .ok()
        .filter(|m| (MIN_MONTH..=MAX_MONTH).contains(m))
        .ok_or_else(|| invalid_date(day, month, year))?;
    let max_day = days_in_month(i64::from(year), month_u8);
    let day_u8 = u8::try_from(day)
        .ok()
        .filter(|d| (MIN_DAY..=max_day).contains(d))
        .ok_or_else(|| invalid_date(day, month, year))?;
    Ok((day_u8, month_u8, year))
}

/// Applies `delta` days to a valid date, carrying overflow forward and
/// borrowing underflow from preceding months. `None` if the result leaves
/// years `1..=i32::MAX`.
fn shifted(year: i32, month: u8, day: u8, delta: i64) -> Option<(u8, u8, i32)> {
    let mut year = i64::from(year);
    let mut month = month;
    let mut day = i64::from(day).checked_add(delta)?;

    // Whole 400-year cycles first so the month loops stay short.
    if day > DAYS_PER_GREGORIAN_CYCLE {
        let cycles = (day - 1) / DAYS_PER_GREGORIAN_CYCLE;
        day -= cycles * DAYS_PER_GREGORIAN_CYCLE;
        year += cycles * GREGORIAN_CYCLE;
    } else if day < -DAYS_PER_GREGORIAN_CYCLE {
        let cycles = -day / DAYS_PER_GREGORIAN_CYCLE;
        day += cycles * DAYS_PER_GREGORIAN_CYCLE;
        year -= cycles * GREGORIAN_CYCLE;
    }

    while day > i64::from(days_in_month(year, month)) {
        day -= i64::from(days_in_month(year, month));
        month += 1;
        if month > DECEMBER {
            month = JANUARY;
            year += 1;
        }
    }

    while day < i64::from(MIN_DAY) {
        month -= 1;
        if month < JANUARY {
            month = DECEMBER;
            year -= 1;
        }
        day += i64::from(days_in_month(year, month));
    }

    let year = i32::try_from(year).ok().filter(|y| *y >= MIN_YEAR)?;
    let day = u8::try_from(day).ok()?;
    Some((day, month, year))
}

/// Helper to parse one numeric token; only leading whitespace is tolerated
fn parse_i32(token: &str, text: &str) -> Result<i32, DateError> {
    token.trim_start().parse::<i32>().map_err(|_| {
        debug!(text, "rejected malformed date text");
        DateError::InvalidFormat(text.to_owned())
    })
}

/// Splits `<int>.<int>.<int>` into raw (day, month, year)
fn parse_fields(text: &str) -> Result<(i32, i32, i32), DateError> {
    let mut parts = text.splitn(3, DATE_SEPARATOR);
    let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
        debug!(text, "rejected malformed date text");
        return Err(DateError::InvalidFormat(text.to_owned()));
    };
    Ok((
        parse_i32(day, text)?,
        parse_i32(month, text)?,
        parse_i32(year, text)?,
    ))
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::default_in(InstanceCounter::global())
    }
}

impl Clone for CalendarDate {
    fn clone(&self) -> Self {
        Self::from_parts(self.day, self.month, self.year, Arc::clone(&self.counter))
    }
}

impl Drop for CalendarDate {
    fn drop(&mut self) {
        self.counter.record_dropped();
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarDate")
            .field("day", &self.day)
            .field("month", &self.month)
            .field("year", &self.year)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Sub for &CalendarDate {
    type Output = i64;

    fn sub(self, other: Self) -> i64 {
        self.day_number() - other.day_number()
    }
}

impl Sub for CalendarDate {
    type Output = i64;

    fn sub(self, other: Self) -> i64 {
        &self - &other
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_in(s, InstanceCounter::global())
    }
}

impl TryFrom<(i32, i32, i32)> for CalendarDate {
    type Error = DateError;

    /// Builds from `(day, month, year)`
    fn try_from(value: (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
