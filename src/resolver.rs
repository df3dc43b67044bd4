use crate::{Error, HistoryQuery, Interval, InvalidRange, Lookback, Range, TimeWindow, Timestamp};

use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// Interval and window to request from the historical-data endpoint.
///
/// Only produced by [`resolve_range`], so `start_time() < end_time()` always
/// holds. Serializes as the `{interval, startTime, endTime}` query.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
#[serde(into = "HistoryQuery")]
pub struct ResolvedRange {
    interval: Interval,
    window: TimeWindow,
}

impl ResolvedRange {
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn start_time(&self) -> Timestamp {
        self.window.start()
    }

    #[must_use]
    pub fn end_time(&self) -> Timestamp {
        self.window.end()
    }

    /// Number of buckets the window spans at the resolved interval, rounded up.
    #[must_use]
    pub fn estimated_candles(&self) -> u64 {
        self.window.span().div_ceil(self.interval.millis())
    }
}

impl Display for ResolvedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} over {}", self.interval, self.window)
    }
}

/// Maps a display range to the interval and window to query.
///
/// Preset ranges end at `now` and ignore `custom_start`/`custom_end`.
/// [`Range::Custom`] uses both dates as the window and derives the interval
/// from its span with [`Interval::for_span`].
///
/// # Errors
///
/// - [`InvalidRange::MissingDates`] if `range` is custom and either date is
///   `None`.
/// - [`InvalidRange::LookbackBeforeEpoch`] if a preset's span is longer than
///   `now`.
/// - [`InvalidRange::EmptyWindow`] if the resulting window is not strictly
///   increasing (inverted custom dates, or `now` not after the `10y` anchor).
///
/// # Example
///
/// ```
/// use kline_range::{Interval, Range, resolve_range};
///
/// const DAY: u64 = 86_400_000;
/// let now = 1_700_000_000_000;
///
/// let resolved = resolve_range(Range::Custom, now, Some(now - 10 * DAY), Some(now)).unwrap();
/// assert_eq!(resolved.interval(), Interval::Hour1);
/// ```
pub fn resolve_range(
    range: Range,
    now: Timestamp,
    custom_start: Option<Timestamp>,
    custom_end: Option<Timestamp>,
) -> Result<ResolvedRange, Error> {
    let (interval, start, end) = match range.preset() {
        Some((interval, lookback)) => {
            let start = match lookback {
                Lookback::Span(span) => now
                    .checked_sub(span)
                    .ok_or(InvalidRange::LookbackBeforeEpoch { span, now })?,
                Lookback::Since(anchor) => anchor,
            };
            (interval, start, now)
        }
        None => {
            let (Some(start), Some(end)) = (custom_start, custom_end) else {
                return Err(InvalidRange::MissingDates.into());
            };
            (Interval::for_span(end.saturating_sub(start)), start, end)
        }
    };

    if start >= end {
        return Err(InvalidRange::EmptyWindow { start, end }.into());
    }

    let window = TimeWindow::new(start, end)?;
    debug!(%range, %interval, %window, "resolved chart range");

    Ok(ResolvedRange { interval, window })
}
