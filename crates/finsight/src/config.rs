//! Configuration for the dashboard client

use crate::error::{DashboardError, Result};
use std::time::Duration;
use url::Url;

/// Default backend origin, matching the development server
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Tickers shown on the live-prices panel when no watchlist is configured
const DEFAULT_WATCHLIST: &[&str] = &["INFY", "TCS", "RELIANCE", "SBIN", "HDFCBANK", "ICICIBANK"];

/// Configuration for the dashboard client
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base origin of the analytics backend
    pub backend_url: Url,

    /// Tickers polled by the live-prices loop
    pub watchlist: Vec<String>,

    /// Delay between live-price refresh cycles
    pub refresh_interval: Duration,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEFAULT_BACKEND_URL)
                .expect("default backend URL is valid"),
            watchlist: DEFAULT_WATCHLIST.iter().map(ToString::to_string).collect(),
            refresh_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Override backend URL and watchlist from the environment
    ///
    /// Reads `FINSIGHT_BACKEND_URL` and `FINSIGHT_WATCHLIST` (comma-separated
    /// tickers); unset variables leave the current values in place.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var("FINSIGHT_BACKEND_URL") {
            self.backend_url = Url::parse(&raw)
                .map_err(|e| DashboardError::Config(format!("FINSIGHT_BACKEND_URL: {e}")))?;
        }
        if let Ok(raw) = std::env::var("FINSIGHT_WATCHLIST") {
            self.watchlist = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.watchlist.is_empty() {
            return Err(DashboardError::Config(
                "watchlist must contain at least one ticker".to_string(),
            ));
        }

        if self.refresh_interval.is_zero() {
            return Err(DashboardError::Config(
                "refresh_interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Backend origin without a trailing slash, ready for path concatenation
    pub fn base_url(&self) -> String {
        self.backend_url.as_str().trim_end_matches('/').to_string()
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    backend_url: Option<Url>,
    watchlist: Option<Vec<String>>,
    refresh_interval: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl DashboardConfigBuilder {
    /// Set the backend origin
    pub fn backend_url(mut self, url: Url) -> Self {
        self.backend_url = Some(url);
        self
    }

    /// Set the live-prices watchlist
    pub fn watchlist(mut self, tickers: Vec<String>) -> Self {
        self.watchlist = Some(tickers);
        self
    }

    /// Set the delay between refresh cycles
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            backend_url: self.backend_url.unwrap_or(defaults.backend_url),
            watchlist: self.watchlist.unwrap_or(defaults.watchlist),
            refresh_interval: self.refresh_interval.unwrap_or(defaults.refresh_interval),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
