use crate::{Error, InvalidRange, Range, ResolvedRange, Timestamp, resolve_range};

use chrono::NaiveDate;
use std::{fmt::Display, str::FromStr};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SEPARATOR: &str = " to ";

/// Calendar range picked in the dashboard's date picker.
///
/// Dates are interpreted as midnight UTC, so `2024-01-01 to 2024-01-11` is a
/// ten-day window.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses the picker's `Y-m-d to Y-m-d` format.
    ///
    /// # Errors
    ///
    /// [`InvalidRange::MissingDates`] for blank input or a single date;
    /// [`Error::MalformedDate`] if either side is not a `Y-m-d` date.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        let Some((start, end)) = input.split_once(SEPARATOR) else {
            return Err(InvalidRange::MissingDates.into());
        };
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(InvalidRange::MissingDates.into());
        }

        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Midnight UTC of the start date in epoch milliseconds.
    #[must_use]
    pub fn start_millis(&self) -> Timestamp {
        midnight_millis(self.start)
    }

    /// Midnight UTC of the end date in epoch milliseconds.
    #[must_use]
    pub fn end_millis(&self) -> Timestamp {
        midnight_millis(self.end)
    }

    /// Resolves this range as a [`Range::Custom`] request.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_range`]; picking the same day twice yields
    /// [`InvalidRange::EmptyWindow`].
    pub fn resolve(&self, now: Timestamp) -> Result<ResolvedRange, Error> {
        resolve_range(
            Range::Custom,
            now,
            Some(self.start_millis()),
            Some(self.end_millis()),
        )
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| Error::MalformedDate {
        input: input.to_owned(),
        reason: e.to_string(),
    })
}

// Dates before 1970 clamp to the epoch.
fn midnight_millis(date: NaiveDate) -> Timestamp {
    let millis = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    Timestamp::try_from(millis).unwrap_or(0)
}
