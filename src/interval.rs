use crate::{Error, Timestamp};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

pub(crate) const MINUTE: Timestamp = 60 * 1000;
pub(crate) const HOUR: Timestamp = 60 * MINUTE;
pub(crate) const DAY: Timestamp = 24 * HOUR;

/// Sampling granularity requested from the historical-data endpoint.
///
/// Serialized with the exchange's shorthand (`"3m"`, `"12h"`, `"1w"`, ...).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "3m")]
    Minutes3,
    #[serde(rename = "15m")]
    Minutes15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "12h")]
    Hours12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Days3,
    #[serde(rename = "1w")]
    Week1,
}

impl Interval {
    /// All intervals, shortest first.
    pub const ALL: [Self; 7] = [
        Self::Minutes3,
        Self::Minutes15,
        Self::Hour1,
        Self::Hours12,
        Self::Day1,
        Self::Days3,
        Self::Week1,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minutes3 => "3m",
            Self::Minutes15 => "15m",
            Self::Hour1 => "1h",
            Self::Hours12 => "12h",
            Self::Day1 => "1d",
            Self::Days3 => "3d",
            Self::Week1 => "1w",
        }
    }

    /// Length of one bucket in milliseconds.
    #[must_use]
    pub fn millis(self) -> Timestamp {
        match self {
            Self::Minutes3 => 3 * MINUTE,
            Self::Minutes15 => 15 * MINUTE,
            Self::Hour1 => HOUR,
            Self::Hours12 => 12 * HOUR,
            Self::Day1 => DAY,
            Self::Days3 => 3 * DAY,
            Self::Week1 => 7 * DAY,
        }
    }

    /// Picks the interval for an arbitrary span of `span` milliseconds.
    ///
    /// Used for custom ranges: up to 7 days → `15m`, up to 30 days → `1h`,
    /// up to 365 days → `12h`, anything longer → `1d`. Bounds are inclusive.
    #[must_use]
    pub fn for_span(span: Timestamp) -> Self {
        if span <= 7 * DAY {
            Self::Minutes15
        } else if span <= 30 * DAY {
            Self::Hour1
        } else if span <= 365 * DAY {
            Self::Hours12
        } else {
            Self::Day1
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| Error::UnknownInterval(s.to_owned()))
    }
}
