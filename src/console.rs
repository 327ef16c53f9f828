//! Hooks between a date and a line-oriented text stream.
//!
//! Input is one line of three whitespace-separated integers in the order
//! `day month year`; output is one `DD.MM.YYYY` line.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{CalendarDate, ConsoleError, DateError};

/// Reads `day month year` from the next line of `reader`
fn read_fields<R: BufRead>(reader: &mut R) -> Result<(i32, i32, i32), ConsoleError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no date on input").into());
    }

    let malformed = || {
        debug!(line = line.trim_end(), "rejected malformed console input");
        DateError::InvalidFormat(line.trim_end().to_owned())
    };
    let fields: Vec<i32> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;
    match fields[..] {
        [day, month, year] => Ok((day, month, year)),
        _ => Err(malformed().into()),
    }
}

impl CalendarDate {
    /// Replaces this date with one read as `day month year` from `reader`.
    ///
    /// # Errors
    /// Returns `ConsoleError::Io` if reading fails or the stream is exhausted,
    /// and `ConsoleError::Date` if the line is malformed or names an invalid
    /// date. On error the date keeps its prior value.
    pub fn input<R: BufRead>(&mut self, reader: &mut R) -> Result<(), ConsoleError> {
        let (day, month, year) = read_fields(reader)?;
        self.assign(day, month, year)?;
        Ok(())
    }

    /// Reads a new date as `day month year` from `reader`.
    ///
    /// # Errors
    /// Same as [`CalendarDate::input`].
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ConsoleError> {
        let (day, month, year) = read_fields(reader)?;
        Ok(Self::new(day, month, year)?)
    }

    /// Writes the date as a `DD.MM.YYYY` line.
    ///
    /// # Errors
    /// Propagates write failures from `writer`.
    pub fn print<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_from() {
        let mut input = Cursor::new("15 8 1991\n");
        let date = CalendarDate::read_from(&mut input).unwrap();
        assert_eq!(date.to_string(), "15.08.1991");
    }

    #[test]
    fn test_read_consumes_one_line_at_a_time() {
        let mut input = Cursor::new("  1   2 2003 \n4 5 2006");
        let first = CalendarDate::read_from(&mut input).unwrap();
        let second = CalendarDate::read_from(&mut input).unwrap();
        assert_eq!(first.to_string(), "01.02.2003");
        assert_eq!(second.to_string(), "04.05.2006");
        assert!(matches!(
            CalendarDate::read_from(&mut input),
            Err(ConsoleError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn test_read_malformed() {
        for text in ["15.08.1991\n", "15 8\n", "15 8 1991 1\n", "a b c\n", "\n"] {
            let mut input = Cursor::new(text);
            let result = CalendarDate::read_from(&mut input);
            assert!(
                matches!(result, Err(ConsoleError::Date(DateError::InvalidFormat(_)))),
                "{text:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_read_invalid_date() {
        let mut input = Cursor::new("29 2 2023\n");
        let result = CalendarDate::read_from(&mut input);
        assert!(matches!(
            result,
            Err(ConsoleError::Date(DateError::InvalidDate {
                day: 29,
                month: 2,
                year: 2023
            }))
        ));
    }

    #[test]
    fn test_input_keeps_prior_value_on_error() {
        let mut date = CalendarDate::default();
        assert!(date.input(&mut Cursor::new("31 4 2024\n")).is_err());
        assert_eq!(date.to_string(), "01.01.2000");

        date.input(&mut Cursor::new("30 4 2024\n")).unwrap();
        assert_eq!(date.to_string(), "30.04.2024");
    }

    #[test]
    fn test_print() {
        let date = CalendarDate::new(5, 3, 24).unwrap();
        let mut out = Vec::new();
        date.print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "05.03.24\n");
    }
}
