//! Error types for the calendar_date crate.

/// Error type for all fallible date operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The (day, month, year) triple is not a valid Gregorian date.
    #[error("Invalid date: {day:02}.{month:02}.{year}")]
    InvalidDate { day: i32, month: i32, year: i32 },

    /// The text does not match `<int>.<int>.<int>`.
    #[error("Invalid date format: {0:?}")]
    InvalidFormat(String),

    /// Shifting by `delta` days would leave the representable year range.
    #[error("Shifting by {delta} days leaves the supported year range")]
    OutOfRange { delta: i64 },
}

/// Error type for the console hooks.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Reading or writing the text stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The marshalled fields did not form a valid date.
    #[error(transparent)]
    Date(#[from] DateError),
}
