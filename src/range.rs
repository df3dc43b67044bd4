use crate::{Error, Interval, Timestamp, interval::DAY};

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// 2017-01-01T00:00:00Z, the left edge of the `10y` range.
pub const TEN_YEAR_ANCHOR: Timestamp = 1_483_228_800_000;

/// Display range selected by the user.
///
/// Serialized with the dashboard's token (`"1d"`, `"1mo"`, `"custom"`, ...).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub enum Range {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "10y")]
    TenYears,
    /// Caller-supplied start and end dates.
    #[serde(rename = "custom")]
    Custom,
}

/// How far back a preset range reaches from `now`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Lookback {
    /// A fixed number of milliseconds before `now`.
    Span(Timestamp),
    /// From a fixed instant up to `now`.
    Since(Timestamp),
}

impl Lookback {
    /// Window start for the given `now`, or `None` if a span reaches back
    /// past the epoch.
    #[must_use]
    pub fn start(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            Self::Span(span) => now.checked_sub(span),
            Self::Since(anchor) => Some(anchor),
        }
    }
}

impl Range {
    /// All tokens in the order the dashboard lists them.
    pub const ALL: [Self; 7] = [
        Self::OneDay,
        Self::SevenDays,
        Self::OneMonth,
        Self::OneYear,
        Self::ThreeYears,
        Self::TenYears,
        Self::Custom,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::SevenDays => "7d",
            Self::OneMonth => "1mo",
            Self::OneYear => "1y",
            Self::ThreeYears => "3y",
            Self::TenYears => "10y",
            Self::Custom => "custom",
        }
    }

    /// Fixed interval and lookback of a preset range; `None` for
    /// [`Range::Custom`].
    #[must_use]
    pub fn preset(self) -> Option<(Interval, Lookback)> {
        let preset = match self {
            Self::OneDay => (Interval::Minutes3, Lookback::Span(DAY)),
            Self::SevenDays => (Interval::Minutes15, Lookback::Span(7 * DAY)),
            Self::OneMonth => (Interval::Hour1, Lookback::Span(30 * DAY)),
            Self::OneYear => (Interval::Hours12, Lookback::Span(365 * DAY)),
            Self::ThreeYears => (Interval::Days3, Lookback::Span(3 * 365 * DAY)),
            Self::TenYears => (Interval::Week1, Lookback::Since(TEN_YEAR_ANCHOR)),
            Self::Custom => return None,
        };
        Some(preset)
    }

    #[must_use]
    pub fn is_custom(self) -> bool {
        self == Self::Custom
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| Error::UnknownRange(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod preset {
        use super::*;

        #[test]
        fn custom_has_no_preset() {
            assert_eq!(Range::Custom.preset(), None);
        }

        #[test]
        fn three_years_is_1095_days() {
            assert_eq!(
                Range::ThreeYears.preset(),
                Some((Interval::Days3, Lookback::Span(1095 * DAY)))
            );
        }

        #[test]
        fn ten_years_is_anchored() {
            assert_eq!(
                Range::TenYears.preset(),
                Some((Interval::Week1, Lookback::Since(TEN_YEAR_ANCHOR)))
            );
        }
    }

    mod lookback {
        use super::*;

        #[test]
        fn span_subtracts_from_now() {
            assert_eq!(Lookback::Span(DAY).start(3 * DAY), Some(2 * DAY));
        }

        #[test]
        fn span_longer_than_now_is_none() {
            assert_eq!(Lookback::Span(DAY).start(DAY - 1), None);
        }

        #[test]
        fn since_ignores_now() {
            assert_eq!(
                Lookback::Since(TEN_YEAR_ANCHOR).start(TEN_YEAR_ANCHOR + DAY),
                Some(TEN_YEAR_ANCHOR)
            );
        }

        #[test]
        fn since_does_not_depend_on_now() {
            assert_eq!(Lookback::Since(TEN_YEAR_ANCHOR).start(0), Some(TEN_YEAR_ANCHOR));
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn round_trips_every_token() {
            for range in Range::ALL {
                assert_eq!(range.to_string().parse::<Range>(), Ok(range));
            }
        }

        #[test]
        fn rejects_unknown_token() {
            assert_eq!("2w".parse::<Range>(), Err(Error::UnknownRange("2w".into())));
        }

        #[test]
        fn token_is_case_sensitive() {
            assert!("1D".parse::<Range>().is_err());
        }

        #[test]
        fn serde_uses_token() {
            assert_eq!(serde_json::to_string(&Range::OneMonth).unwrap(), "\"1mo\"");
            let range: Range = serde_json::from_str("\"custom\"").unwrap();
            assert_eq!(range, Range::Custom);
        }
    }

    #[test]
    fn default_is_one_day() {
        assert_eq!(Range::default(), Range::OneDay);
    }
}
