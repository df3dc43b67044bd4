//! Chart range resolution and OHLC series normalization for price
//! dashboards.
//!
//! [`resolve_range`] turns a display [`Range`] (plus explicit dates for
//! [`Range::Custom`]) and the current time into the [`Interval`] and
//! [`TimeWindow`] to request from a historical-data endpoint.
//! [`normalize_series`] turns the returned records, any type implementing
//! [`Ohlcv`], into a time-ordered [`Candle`] series with the axis
//! [`Bounds`] a chart needs.
//!
//! Both are pure and synchronous: `now` is a parameter, nothing is cached.
//!
//! [`DcaPlan`] replays a dollar-cost averaging schedule against daily closes.
//!
//! ```
//! use kline_range::{Candle, Interval, Range, normalize_series, resolve_range};
//!
//! let now = 1_700_000_000_000;
//! let resolved = resolve_range(Range::SevenDays, now, None, None).unwrap();
//! assert_eq!(resolved.interval(), Interval::Minutes15);
//!
//! let series = normalize_series::<Candle>(&[]);
//! assert!(series.bounds().is_none());
//! ```
//!
//! With the default `http` feature, [`DashboardClient`] performs the two
//! upstream requests (historical candles and live price) and evaluates
//! [`DcaPlan`]s against them.

mod config;
mod date_range;
mod dca;
mod error;
mod interval;
mod ohlcv;
mod range;
mod resolver;
mod series;
mod ticker;
mod window;
mod wire;

#[cfg(feature = "http")]
mod client;

pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::date_range::DateRange;
pub use crate::dca::{DcaPlan, DcaReport, Frequency, Installment, calculate_dca};
pub use crate::error::{Error, InvalidRange, UpstreamError};
pub use crate::interval::Interval;
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::range::{Lookback, Range, TEN_YEAR_ANCHOR};
pub use crate::resolver::{ResolvedRange, resolve_range};
pub use crate::series::{Bounds, Candle, NormalizedSeries, normalize_series};
pub use crate::ticker::{PriceDirection, PriceTicker};
pub use crate::window::{TimeWindow, now_millis};
pub use crate::wire::{HistoryPayload, HistoryQuery, Kline, PricePayload};

#[cfg(feature = "http")]
pub use crate::client::{DashboardClient, HttpError};

#[cfg(test)]
mod test_util;
