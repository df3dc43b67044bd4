/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Milliseconds since the Unix epoch.
///
/// Matches the `startTime`/`endTime` query parameters and the `x` field of
/// chart records.
pub type Timestamp = u64;

/// One OHLC bucket, as accepted by [`normalize_series`](crate::normalize_series).
///
/// Implement this on your own kline/candle type to normalize it without an
/// intermediate conversion. [`Candle`](crate::Candle) and
/// [`Kline`](crate::Kline) implement it already.
///
/// `high >= max(open, close, low)` and `low <= min(open, close, high)` are
/// expected to hold, but nothing in this crate checks them.
///
/// # Example
///
/// ```
/// use kline_range::{Ohlcv, Price, Timestamp, normalize_series};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
///
/// let series = normalize_series(&[MyKline { o: 10.0, h: 12.0, l: 9.0, c: 11.0, ts: 1 }]);
/// assert_eq!(series.bounds().map(|b| b.max), Some(12.0));
/// ```
pub trait Ohlcv {
    /// Opening price of the bucket.
    fn open(&self) -> Price;

    /// Highest price during the bucket.
    fn high(&self) -> Price;

    /// Lowest price during the bucket.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bucket.
    fn close(&self) -> Price;

    /// Bucket open time in epoch milliseconds.
    fn open_time(&self) -> Timestamp;
}
