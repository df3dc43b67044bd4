use std::{fmt::Display, num::NonZero, time::Duration};

/// Configuration for the dashboard client.
///
/// # Example
///
/// ```rust
/// use kline_range::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("https://charts.example.com/")
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.history_url(), "https://charts.example.com/api/bitcoin-historical-data");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    history_path: String,
    price_path: String,
    timeout: Duration,
    candle_limit: u64,
}

impl ClientConfig {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Most candles the historical endpoint returns for one request.
    #[must_use]
    pub fn candle_limit(&self) -> u64 {
        self.candle_limit
    }

    #[must_use]
    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, self.history_path)
    }

    #[must_use]
    pub fn price_url(&self) -> String {
        format!("{}{}", self.base_url, self.price_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClientConfig({}, {:?}, limit {})",
            self.base_url, self.timeout, self.candle_limit
        )
    }
}

/// Builder for [`ClientConfig`].
///
/// Defaults: base URL `http://127.0.0.1:5000`, history path
/// `/api/bitcoin-historical-data`, price path `/api/bitcoin-price`,
/// 10 second timeout, 1000 candle limit.
pub struct ClientConfigBuilder {
    base_url: String,
    history_path: String,
    price_path: String,
    timeout: Duration,
    candle_limit: u64,
}

impl ClientConfigBuilder {
    fn new() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            history_path: "/api/bitcoin-historical-data".to_owned(),
            price_path: "/api/bitcoin-price".to_owned(),
            timeout: Duration::from_secs(10),
            candle_limit: 1000,
        }
    }

    /// Trailing slashes are dropped.
    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        base_url.trim_end_matches('/').clone_into(&mut self.base_url);
        self
    }

    /// A leading slash is added when missing.
    #[must_use]
    pub fn history_path(mut self, path: &str) -> Self {
        self.history_path = with_leading_slash(path);
        self
    }

    /// A leading slash is added when missing.
    #[must_use]
    pub fn price_path(mut self, path: &str) -> Self {
        self.price_path = with_leading_slash(path);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn candle_limit(mut self, limit: NonZero<u64>) -> Self {
        self.candle_limit = limit.get();
        self
    }

    /// Builds the config.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is blank.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        assert!(!self.base_url.is_empty(), "base_url must not be blank");
        ClientConfig {
            base_url: self.base_url,
            history_path: self.history_path,
            price_path: self.price_path,
            timeout: self.timeout,
            candle_limit: self.candle_limit,
        }
    }
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
