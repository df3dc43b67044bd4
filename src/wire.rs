//! Payloads exchanged with the historical-data and live-price endpoints.

use crate::{Candle, Interval, Ohlcv, Price, ResolvedRange, Timestamp, UpstreamError};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Expected, IgnoredAny, SeqAccess, Visitor},
};
use std::fmt;

/// Query sent to the historical-data endpoint.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
pub struct HistoryQuery {
    pub interval: Interval,
    #[serde(rename = "startTime")]
    pub start_time: Timestamp,
    #[serde(rename = "endTime")]
    pub end_time: Timestamp,
}

impl HistoryQuery {
    /// `interval`, `startTime`, `endTime` as URL query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("interval", self.interval.as_str().to_owned()),
            ("startTime", self.start_time.to_string()),
            ("endTime", self.end_time.to_string()),
        ]
    }
}

impl From<&ResolvedRange> for HistoryQuery {
    fn from(range: &ResolvedRange) -> Self {
        Self {
            interval: range.interval(),
            start_time: range.start_time(),
            end_time: range.end_time(),
        }
    }
}

impl From<ResolvedRange> for HistoryQuery {
    fn from(range: ResolvedRange) -> Self {
        Self::from(&range)
    }
}

/// Body of a historical-data response: either the records or an error
/// message.
#[derive(PartialEq, Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Prices { prices: Vec<Candle> },
    Error { error: String },
}

impl HistoryPayload {
    /// # Errors
    ///
    /// [`UpstreamError::Rejected`] carrying the endpoint's message.
    pub fn into_candles(self) -> Result<Vec<Candle>, UpstreamError> {
        match self {
            Self::Prices { prices } => Ok(prices),
            Self::Error { error } => Err(UpstreamError::Rejected(error)),
        }
    }
}

/// Body of a live-price response.
///
/// The price may arrive as a JSON number, a numeric string (exchange ticker
/// format) or a human-readable failure message.
#[derive(PartialEq, Clone, Debug, Deserialize)]
pub struct PricePayload {
    price: NumberOrString,
}

impl PricePayload {
    /// # Errors
    ///
    /// [`UpstreamError::PriceUnavailable`] if the value is not a finite number.
    pub fn into_price(self) -> Result<Price, UpstreamError> {
        match self.price {
            NumberOrString::Number(price) if price.is_finite() => Ok(price),
            NumberOrString::Number(price) => Err(UpstreamError::PriceUnavailable(price.to_string())),
            NumberOrString::Text(text) => match text.trim().parse::<Price>() {
                Ok(price) if price.is_finite() => Ok(price),
                _ => Err(UpstreamError::PriceUnavailable(text)),
            },
        }
    }
}

#[derive(PartialEq, Clone, Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// One exchange kline row:
/// `[openTime, "open", "high", "low", "close", ...]`.
///
/// Prices may be strings or numbers. Volume, close time and the other
/// trailing fields are ignored.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Kline {
    pub open_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Ohlcv for Kline {
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
        self.open_time
    }
}

impl<'de> Deserialize<'de> for Kline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(KlineVisitor)
    }
}

struct KlineVisitor;

impl<'de> Visitor<'de> for KlineVisitor {
    type Value = Kline;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a kline row [openTime, open, high, low, close, ...]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Kline, A::Error> {
        let Some(open_time) = seq.next_element()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let open = next_number(&mut seq, 1, &self)?;
        let high = next_number(&mut seq, 2, &self)?;
        let low = next_number(&mut seq, 3, &self)?;
        let close = next_number(&mut seq, 4, &self)?;

        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(Kline {
            open_time,
            open,
            high,
            low,
            close,
        })
    }
}

fn next_number<'de, A: SeqAccess<'de>>(
    seq: &mut A,
    index: usize,
    expected: &dyn Expected,
) -> Result<f64, A::Error> {
    match seq.next_element()? {
        Some(NumberOrString::Number(value)) => Ok(value),
        Some(NumberOrString::Text(text)) => text
            .parse()
            .map_err(|_| de::Error::custom(format!("field {index}: `{text}` is not a number"))),
        None => Err(de::Error::invalid_length(index, expected)),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Range, resolve_range};

    mod history_query {
        use super::*;

        #[test]
        fn built_from_resolved_range() {
            let resolved = resolve_range(Range::OneDay, 86_400_000 * 2, None, None).unwrap();
            let query = HistoryQuery::from(&resolved);
            assert_eq!(query.interval, Interval::Minutes3);
            assert_eq!(query.start_time, 86_400_000);
            assert_eq!(query.end_time, 86_400_000 * 2);
        }

        #[test]
        fn query_pairs_use_endpoint_names() {
            let query = HistoryQuery {
                interval: Interval::Hours12,
                start_time: 10,
                end_time: 20,
            };
            assert_eq!(
                query.query_pairs(),
                [
                    ("interval", "12h".to_owned()),
                    ("startTime", "10".to_owned()),
                    ("endTime", "20".to_owned()),
                ]
            );
        }

        #[test]
        fn serializes_camel_case() {
            let query = HistoryQuery {
                interval: Interval::Week1,
                start_time: 1,
                end_time: 2,
            };
            assert_eq!(
                serde_json::to_value(query).unwrap(),
                serde_json::json!({"interval": "1w", "startTime": 1, "endTime": 2})
            );
        }
    }

    mod history_payload {
        use super::*;

        #[test]
        fn parses_prices() {
            let payload: HistoryPayload = serde_json::from_str(
                r#"{"prices":[{"x":1,"o":10.0,"h":12.0,"l":9.0,"c":11.0}]}"#,
            )
            .unwrap();
            assert_eq!(
                payload.into_candles(),
                Ok(vec![Candle::new(1, 10.0, 12.0, 9.0, 11.0)])
            );
        }

        #[test]
        fn parses_empty_prices() {
            let payload: HistoryPayload = serde_json::from_str(r#"{"prices":[]}"#).unwrap();
            assert_eq!(payload.into_candles(), Ok(vec![]));
        }

        #[test]
        fn parses_error() {
            let payload: HistoryPayload =
                serde_json::from_str(r#"{"error":"Unable to fetch data"}"#).unwrap();
            assert_eq!(
                payload.into_candles(),
                Err(UpstreamError::Rejected("Unable to fetch data".into()))
            );
        }

        #[test]
        fn rejects_unrelated_body() {
            assert!(serde_json::from_str::<HistoryPayload>(r#"{"status":"ok"}"#).is_err());
        }
    }

    mod price_payload {
        use super::*;

        fn price(json: &str) -> Result<Price, UpstreamError> {
            serde_json::from_str::<PricePayload>(json).unwrap().into_price()
        }

        #[test]
        fn number() {
            assert_eq!(price(r#"{"price": 64321.5}"#), Ok(64321.5));
        }

        #[test]
        fn numeric_string() {
            assert_eq!(
                price(r#"{"symbol":"BTCUSDT","price":"64321.50000000"}"#),
                Ok(64321.5)
            );
        }

        #[test]
        fn failure_message() {
            assert_eq!(
                price(r#"{"price": "Unable to retrieve price"}"#),
                Err(UpstreamError::PriceUnavailable(
                    "Unable to retrieve price".into()
                ))
            );
        }

        #[test]
        fn non_finite_string() {
            assert!(price(r#"{"price": "NaN"}"#).is_err());
            assert!(price(r#"{"price": "inf"}"#).is_err());
        }
    }

    mod kline {
        use super::*;

        #[test]
        fn parses_full_exchange_row() {
            let kline: Kline = serde_json::from_str(
                r#"[1499040000000,"0.01634790","0.80000000","0.01575800","0.01577100",
                    "148976.11427815",1499644799999,"2434.19055334",308,"1756.87402397",
                    "28.46694368","0"]"#,
            )
            .unwrap();
            assert_eq!(kline.open_time, 1_499_040_000_000);
            assert_eq!(kline.open, 0.016_347_9);
            assert_eq!(kline.high, 0.8);
            assert_eq!(kline.low, 0.015_758);
            assert_eq!(kline.close, 0.015_771);
        }

        #[test]
        fn accepts_numbers_and_short_rows() {
            let kline: Kline = serde_json::from_str("[5, 1, 2, 0.5, 1.5]").unwrap();
            assert_eq!(kline.open_time, 5);
            assert_eq!(kline.low, 0.5);
            assert_eq!(kline.close, 1.5);
        }

        #[test]
        fn rejects_truncated_row() {
            let err = serde_json::from_str::<Kline>(r#"[5, "1", "2"]"#).unwrap_err();
            assert!(err.to_string().contains("invalid length 3"), "{err}");
        }

        #[test]
        fn rejects_non_numeric_price() {
            let err =
                serde_json::from_str::<Kline>(r#"[5, "1", "abc", "0.5", "1.5", "10"]"#).unwrap_err();
            assert!(err.to_string().contains("`abc` is not a number"), "{err}");
        }

        #[test]
        fn normalizes_like_any_ohlcv() {
            let klines: Vec<Kline> = serde_json::from_str(
                r#"[[2000,"11","13","10","12","1"],[1000,"10","12","9","11","1"]]"#,
            )
            .unwrap();
            let result = crate::normalize_series(&klines);
            assert_eq!(
                result.series(),
                [
                    Candle::new(1000, 10.0, 12.0, 9.0, 11.0),
                    Candle::new(2000, 11.0, 13.0, 10.0, 12.0),
                ]
            );
        }
    }
}
