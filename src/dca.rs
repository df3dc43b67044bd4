//! Dollar-cost averaging: a fixed amount bought at each installment date's
//! daily close, valued at the current price.

use crate::{DateRange, Error, HistoryQuery, Interval, Ohlcv, Price, Timestamp, interval::DAY};

use chrono::{DateTime, Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};
use tracing::{debug, warn};

// Monthly installments never land after the 28th, so every month has one.
const MONTHLY_DAY_CAP: u32 = 28;

/// How often an installment is made.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Installment date following `date`.
    ///
    /// Monthly steps keep the day of month but clamp it to the 28th, and the
    /// clamped day carries over: `01-31` is followed by `02-28`, then `03-28`.
    /// `None` past the end of the calendar.
    #[must_use]
    pub fn next(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => {
                let (year, month) = match date.month() {
                    12 => (date.year() + 1, 1),
                    month => (date.year(), month + 1),
                };
                NaiveDate::from_ymd_opt(year, month, date.day().min(MONTHLY_DAY_CAP))
            }
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == token)
            .ok_or_else(|| Error::UnknownFrequency(token.to_owned()))
    }
}

/// A validated dollar-cost averaging plan.
///
/// # Example
///
/// ```
/// use kline_range::{Candle, DcaPlan};
///
/// let plan = DcaPlan::parse("2024-03-01 to 2024-03-02", "daily", "100").unwrap();
/// let closes = [
///     Candle::new(1_709_251_200_000, 0.0, 0.0, 0.0, 100.0),
///     Candle::new(1_709_337_600_000, 0.0, 0.0, 0.0, 200.0),
/// ];
/// let report = plan.evaluate(&closes, 200.0);
/// assert_eq!(report.total_invested, 200.0);
/// assert_eq!(report.holdings, 1.5);
/// assert_eq!(report.total_value, 300.0);
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct DcaPlan {
    range: DateRange,
    frequency: Frequency,
    amount: Price,
}

impl DcaPlan {
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] unless `amount` is finite and positive.
    pub fn new(range: DateRange, frequency: Frequency, amount: Price) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }
        Ok(Self {
            range,
            frequency,
            amount,
        })
    }

    /// Builds a plan from the calculator form's three text fields.
    ///
    /// # Errors
    ///
    /// As [`DateRange::parse`], plus [`Error::UnknownFrequency`] and
    /// [`Error::InvalidAmount`].
    pub fn parse(date_range: &str, frequency: &str, amount: &str) -> Result<Self, Error> {
        let range = DateRange::parse(date_range)?;
        let frequency = frequency.parse()?;
        let amount = amount
            .trim()
            .parse::<Price>()
            .map_err(|_| Error::InvalidAmount(amount.trim().to_owned()))?;
        Self::new(range, frequency, amount)
    }

    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Amount invested per installment.
    #[must_use]
    pub fn amount(&self) -> Price {
        self.amount
    }

    /// Installment dates from the start date through the end date inclusive.
    /// Empty when the end date is before the start date.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let end = self.range.end();
        std::iter::successors(Some(self.range.start()), |&date| self.frequency.next(date))
            .take_while(|&date| date <= end)
            .collect()
    }

    /// Daily candles covering every installment: midnight UTC of the start
    /// date through the last millisecond of the end date.
    #[must_use]
    pub fn history_query(&self) -> HistoryQuery {
        HistoryQuery {
            interval: Interval::Day1,
            start_time: self.range.start_millis(),
            end_time: self.range.end_millis() + DAY - 1,
        }
    }

    /// See [`calculate_dca`].
    #[must_use]
    pub fn evaluate<T: Ohlcv>(&self, daily: &[T], current_price: Price) -> DcaReport {
        calculate_dca(self, daily, current_price)
    }
}

/// One installment of a [`DcaReport`].
#[derive(PartialEq, Clone, Copy, Debug, Serialize)]
pub struct Installment {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Close of the record on that UTC day.
    pub price: Option<Price>,
    /// Units bought; zero when there was no price.
    pub units: f64,
    /// Holdings after this installment valued at `price`.
    pub value: Option<Price>,
}

/// Outcome of a [`DcaPlan`].
#[derive(PartialEq, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaReport {
    /// Amount spent on installments that found a price.
    pub total_invested: Price,
    /// Units held at the end.
    pub holdings: f64,
    /// `holdings` at the current price.
    pub total_value: Price,
    /// Return on `total_invested` in percent; `0` when nothing was invested.
    pub roi_percentage: f64,
    pub installments: Vec<Installment>,
}

impl DcaReport {
    /// Installments skipped for lack of a price.
    #[must_use]
    pub fn missed(&self) -> usize {
        self.installments.iter().filter(|i| i.price.is_none()).count()
    }
}

/// Runs `plan` against daily records and values the result at
/// `current_price`.
///
/// Each record is keyed by the UTC date of its open time; when several fall
/// on one day the last in input order wins. An installment whose day has no
/// record, or a close that is not a positive finite number, buys nothing and
/// is left out of `total_invested`.
#[must_use]
pub fn calculate_dca<T: Ohlcv>(plan: &DcaPlan, daily: &[T], current_price: Price) -> DcaReport {
    let closes = closes_by_date(daily);
    let mut holdings = 0.0;
    let mut total_invested = 0.0;

    let installments: Vec<Installment> = plan
        .dates()
        .into_iter()
        .map(|date| {
            let Some(price) = closes.get(&date).copied() else {
                debug!(%date, "no close for installment");
                return Installment {
                    date,
                    price: None,
                    units: 0.0,
                    value: None,
                };
            };
            let units = plan.amount / price;
            holdings += units;
            total_invested += plan.amount;
            Installment {
                date,
                price: Some(price),
                units,
                value: Some(holdings * price),
            }
        })
        .collect();

    let total_value = holdings * current_price;
    let roi_percentage = if total_invested > 0.0 {
        (total_value - total_invested) / total_invested * 100.0
    } else {
        0.0
    };

    let report = DcaReport {
        total_invested,
        holdings,
        total_value,
        roi_percentage,
        installments,
    };

    let missed = report.missed();
    if missed > 0 {
        warn!(
            missed,
            installments = report.installments.len(),
            "installments without a daily close"
        );
    }
    debug!(
        frequency = %plan.frequency,
        range = %plan.range,
        total_invested,
        total_value,
        "evaluated dca plan"
    );

    report
}

fn closes_by_date<T: Ohlcv>(records: &[T]) -> BTreeMap<NaiveDate, Price> {
    records
        .iter()
        .filter(|r| r.close().is_finite() && r.close() > 0.0)
        .filter_map(|r| Some((utc_date(r.open_time())?, r.close())))
        .collect()
}

fn utc_date(time: Timestamp) -> Option<NaiveDate> {
    let millis = i64::try_from(time).ok()?;
    DateTime::from_timestamp_millis(millis).map(|t| t.date_naive())
}
