//! Reqwest-backed implementation of the backend trait

use crate::api::types::{
    AnomalyReport, CourseCatalog, LivePricesResponse, PcaAnalysis, PortfolioValueResponse,
    PricePrediction, RiskMetrics, RiskPrediction, SharpeRatio, StockPrice,
};
use crate::api::Backend;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::portfolio::Holding;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the analytics backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client from the dashboard configuration
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Issue one GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Repeated `tickers` parameters for a batch quote request
fn tickers_query(tickers: &[String]) -> String {
    tickers
        .iter()
        .map(|t| format!("tickers={t}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Repeated `tickers` plus repeated `quantities` parameters, in input order
///
/// Quantities are forwarded exactly as parsed; a NaN quantity stays NaN in
/// the query string.
fn portfolio_query(holdings: &[Holding]) -> String {
    let tickers = holdings
        .iter()
        .map(|h| format!("tickers={}", h.symbol))
        .collect::<Vec<_>>()
        .join("&");
    let quantities = holdings
        .iter()
        .map(|h| format!("quantities={}", h.quantity))
        .collect::<Vec<_>>()
        .join("&");
    format!("{tickers}&{quantities}")
}

#[async_trait]
impl Backend for BackendClient {
    async fn live_prices(&self, tickers: &[String]) -> Result<LivePricesResponse> {
        let url = format!(
            "{}/analytics/live-prices/?{}",
            self.base_url,
            tickers_query(tickers)
        );
        self.get_json(url).await
    }

    async fn stock_price(&self, ticker: &str) -> Result<StockPrice> {
        let url = format!("{}/analytics/stock-price/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn portfolio_value(&self, holdings: &[Holding]) -> Result<PortfolioValueResponse> {
        let url = format!(
            "{}/analytics/portfolio-value/?{}",
            self.base_url,
            portfolio_query(holdings)
        );
        self.get_json(url).await
    }

    async fn predict_price(&self, ticker: &str) -> Result<PricePrediction> {
        let url = format!(
            "{}/analytics/predict-price/?ticker={}",
            self.base_url, ticker
        );
        self.get_json(url).await
    }

    async fn sharpe_ratio(&self, ticker: &str) -> Result<SharpeRatio> {
        let url = format!("{}/analytics/sharpe-ratio/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn predict_risk(&self, ticker: &str) -> Result<RiskPrediction> {
        let url = format!("{}/analytics/predict-risk/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn risk_metrics(&self, ticker: &str) -> Result<RiskMetrics> {
        let url = format!("{}/analytics/risk-metrics/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn anomalies(&self, ticker: &str) -> Result<AnomalyReport> {
        let url = format!("{}/analytics/anomalies/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn pca_analysis(&self, ticker: &str) -> Result<PcaAnalysis> {
        let url = format!("{}/analytics/pca-analysis/?ticker={}", self.base_url, ticker);
        self.get_json(url).await
    }

    async fn courses(&self) -> Result<CourseCatalog> {
        let url = format!("{}/finlearn/courses", self.base_url);
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: &str, quantity: f64) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_client_creation() {
        let config = DashboardConfig::default();
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_tickers_query_repeats_parameter() {
        let tickers = vec!["INFY".to_string(), "TCS".to_string(), "SBIN".to_string()];
        assert_eq!(
            tickers_query(&tickers),
            "tickers=INFY&tickers=TCS&tickers=SBIN"
        );
    }

    #[test]
    fn test_portfolio_query_parallel_arrays() {
        let holdings = vec![holding("AAA", 10.0), holding("CCC", 3.0)];
        assert_eq!(
            portfolio_query(&holdings),
            "tickers=AAA&tickers=CCC&quantities=10&quantities=3"
        );
    }

    #[test]
    fn test_portfolio_query_forwards_nan() {
        let holdings = vec![holding("BBB", f64::NAN)];
        assert_eq!(portfolio_query(&holdings), "tickers=BBB&quantities=NaN");
    }
}
