use crate::{InvalidRange, Timestamp};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Closed time window `[start, end]` in epoch milliseconds.
///
/// Always satisfies `start <= end`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: Timestamp,
    end: Timestamp,
}

impl TryFrom<WindowBounds> for TimeWindow {
    type Error = InvalidRange;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl TimeWindow {
    /// Creates a window, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange::EmptyWindow`] when `start > end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, InvalidRange> {
        if start > end {
            return Err(InvalidRange::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// `end - start`.
    #[must_use]
    pub fn span(&self) -> Timestamp {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(&self, time: Timestamp) -> bool {
        (self.start..=self.end).contains(&time)
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before 1970 read as `0`.
#[must_use]
pub fn now_millis() -> Timestamp {
    Timestamp::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
