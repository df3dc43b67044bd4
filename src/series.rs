use crate::{Ohlcv, Price, TimeWindow, Timestamp};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One chart record, serialized in the `{x, o, h, l, c}` shape candlestick
/// charts consume.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "x")]
    pub time: Timestamp,
    #[serde(rename = "o")]
    pub open: Price,
    #[serde(rename = "h")]
    pub high: Price,
    #[serde(rename = "l")]
    pub low: Price,
    #[serde(rename = "c")]
    pub close: Price,
}

impl Candle {
    #[must_use]
    pub fn new(time: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Projects any [`Ohlcv`] record.
    #[must_use]
    pub fn from_ohlcv(record: &impl Ohlcv) -> Self {
        Self::new(
            record.open_time(),
            record.open(),
            record.high(),
            record.low(),
            record.close(),
        )
    }

    #[inline]
    fn prices(&self) -> [Price; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

impl Ohlcv for Candle {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn open_time(&self) -> Timestamp {
        self.time
    }
}

/// Axis bounds of a non-empty series.
#[derive(PartialEq, Clone, Copy, Debug, Serialize)]
pub struct Bounds {
    /// Lowest of every open, high, low and close.
    pub min: Price,
    /// Highest of every open, high, low and close.
    pub max: Price,
    /// Time of the first candle.
    pub first: Timestamp,
    /// Time of the last candle.
    pub last: Timestamp,
}

impl Bounds {
    /// `[first, last]` as a window; `None` if the fields were edited so that
    /// `first > last`.
    #[must_use]
    pub fn time_window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.first, self.last).ok()
    }
}

/// Result of [`normalize_series`].
#[derive(PartialEq, Clone, Debug, Default, Serialize)]
pub struct NormalizedSeries {
    series: Vec<Candle>,
    bounds: Option<Bounds>,
}

impl NormalizedSeries {
    /// Candles in ascending time order.
    #[must_use]
    pub fn series(&self) -> &[Candle] {
        &self.series
    }

    /// `None` when the series is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Candle>, Option<Bounds>) {
        (self.series, self.bounds)
    }
}

/// Converts raw OHLC records into a time-ordered candle series and the axis
/// bounds a chart needs.
///
/// Input that is already in ascending time order is passed through as-is.
/// Out-of-order input is stably sorted, so records sharing a timestamp keep
/// their relative order. Values are not validated: NaN prices are skipped by
/// the min/max computation and never become a bound unless every price is
/// NaN.
///
/// An empty input yields an empty series and no bounds.
///
/// # Example
///
/// ```
/// use kline_range::{Candle, normalize_series};
///
/// let raw = [
///     Candle::new(1, 10.0, 12.0, 9.0, 11.0),
///     Candle::new(2, 11.0, 13.0, 10.0, 12.0),
/// ];
/// let bounds = normalize_series(&raw).bounds().unwrap();
/// assert_eq!((bounds.min, bounds.max), (9.0, 13.0));
/// assert_eq!((bounds.first, bounds.last), (1, 2));
/// ```
pub fn normalize_series<T: Ohlcv>(records: &[T]) -> NormalizedSeries {
    let mut series: Vec<Candle> = records.iter().map(Candle::from_ohlcv).collect();

    if !series.is_sorted_by_key(|c| c.time) {
        warn!(len = series.len(), "records out of time order, sorting");
        series.sort_by_key(|c| c.time);
    }

    let bounds = compute_bounds(&series);
    debug!(len = series.len(), ?bounds, "normalized series");

    NormalizedSeries { series, bounds }
}

fn compute_bounds(series: &[Candle]) -> Option<Bounds> {
    let (first, last) = (series.first()?, series.last()?);

    let (min, max) = series
        .iter()
        .flat_map(Candle::prices)
        .fold((Price::NAN, Price::NAN), |(min, max), price| {
            (min.min(price), max.max(price))
        });

    Some(Bounds {
        min,
        max,
        first: first.time,
        last: last.time,
    })
}
