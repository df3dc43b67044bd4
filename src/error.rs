use crate::Timestamp;

use thiserror::Error;

/// Errors raised while turning user input into a query window or an
/// investment plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid range: {0}")]
    InvalidRange(InvalidRange),

    #[error("unknown range token `{0}`")]
    UnknownRange(String),

    #[error("unknown interval `{0}`")]
    UnknownInterval(String),

    #[error("malformed date `{input}`: {reason}")]
    MalformedDate { input: String, reason: String },

    #[error("unknown investment frequency `{0}`")]
    UnknownFrequency(String),

    #[error("invalid investment amount `{0}`: expected a positive number")]
    InvalidAmount(String),
}

impl From<InvalidRange> for Error {
    fn from(value: InvalidRange) -> Self {
        Self::InvalidRange(value)
    }
}

/// Why a range could not be resolved to a non-empty window.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRange {
    /// `custom` was requested without both a start and an end date.
    #[error("custom range requires both a start and an end date")]
    MissingDates,

    /// The window would not satisfy `start < end`.
    #[error("window [{start}, {end}] is empty or inverted")]
    EmptyWindow { start: Timestamp, end: Timestamp },

    /// A preset's lookback reaches back past the epoch from `now`.
    #[error("lookback of {span} ms reaches past the epoch from {now}")]
    LookbackBeforeEpoch { span: Timestamp, now: Timestamp },
}

/// Failures reported by the historical-data or live-price endpoints in
/// their response bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("historical data request rejected: {0}")]
    Rejected(String),

    #[error("price unavailable: {0}")]
    PriceUnavailable(String),
}
