//! Async client for the dashboard's historical-data and live-price endpoints.
//!
//! One request per call. Nothing is retried, deduplicated or cancelled: when
//! several requests are in flight the caller decides which response to apply.

use crate::{
    Candle, ClientConfig, DcaPlan, DcaReport, HistoryPayload, HistoryQuery, NormalizedSeries,
    Price, PricePayload, ResolvedRange, UpstreamError, normalize_series,
};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Transport and response failures of [`DashboardClient`].
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("server error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Async client for the dashboard's historical-data and live-price
/// endpoints, configured by a [`ClientConfig`].
pub struct DashboardClient {
    config: ClientConfig,
    http: Client,
}

impl DashboardClient {
    /// # Errors
    ///
    /// [`HttpError::Reqwest`] if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and normalizes the candles for `range`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Upstream`] when the endpoint answers with an error
    ///   payload, whatever the status code.
    /// - [`HttpError::Status`] for other non-success responses.
    /// - [`HttpError::Reqwest`] / [`HttpError::Serde`] for transport and
    ///   decoding failures.
    pub async fn fetch_history(&self, range: &ResolvedRange) -> Result<NormalizedSeries, HttpError> {
        let expected = range.estimated_candles();
        if expected > self.config.candle_limit() {
            warn!(
                %range,
                expected,
                limit = self.config.candle_limit(),
                "range exceeds the candle limit, series will be truncated"
            );
        }

        let candles = self.fetch_candles(&HistoryQuery::from(range)).await?;
        Ok(normalize_series(&candles))
    }

    /// Fetches the daily closes covering `plan` and the current price, then
    /// evaluates the plan.
    ///
    /// # Errors
    ///
    /// As [`fetch_history`](Self::fetch_history) and
    /// [`fetch_price`](Self::fetch_price).
    pub async fn fetch_dca(&self, plan: &DcaPlan) -> Result<DcaReport, HttpError> {
        let query = plan.history_query();
        let days = (query.end_time - query.start_time).div_ceil(query.interval.millis());
        if days > self.config.candle_limit() {
            warn!(
                range = %plan.range(),
                days,
                limit = self.config.candle_limit(),
                "plan exceeds the candle limit, late installments will miss prices"
            );
        }

        let candles = self.fetch_candles(&query).await?;
        let price = self.fetch_price().await?;
        Ok(plan.evaluate(&candles, price))
    }

    /// Fetches the current price.
    ///
    /// # Errors
    ///
    /// [`HttpError::Upstream`] if the endpoint reports no usable price,
    /// otherwise as [`fetch_history`](Self::fetch_history).
    pub async fn fetch_price(&self) -> Result<Price, HttpError> {
        let payload: PricePayload = self.get(&self.config.price_url(), &[] as &[(&str, String)]).await?;
        Ok(payload.into_price()?)
    }

    async fn fetch_candles(&self, query: &HistoryQuery) -> Result<Vec<Candle>, HttpError> {
        let payload: HistoryPayload = self
            .get(&self.config.history_url(), &query.query_pairs())
            .await?;

        Ok(payload.into_candles().inspect_err(|e| {
            warn!(?query, error = %e, "historical data request rejected");
        })?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        debug!(url, ?query, "GET");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode_body(status, body)
    }
}

// Error payloads arrive with non-success statuses, so the body is decoded
// before the status is checked.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T, HttpError> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(HttpError::Status {
            status: status.as_u16(),
            body,
        }),
        Err(e) => Err(e.into()),
    }
}
