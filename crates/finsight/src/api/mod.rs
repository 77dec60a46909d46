//! HTTP client for the analytics backend

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{
    AnomalyReport, Course, CourseCatalog, LivePrice, LivePricesResponse, PcaAnalysis,
    PortfolioLine, PortfolioValueResponse, PricePrediction, RiskMetrics, RiskPrediction,
    SharpeRatio, StockPrice,
};

use crate::error::Result;
use crate::portfolio::Holding;
use async_trait::async_trait;

/// Operations the analytics backend exposes to the dashboard
///
/// All endpoints are plain GET requests returning JSON; the dashboard,
/// poller and joins are written against this trait so they can be driven
/// by a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Live quotes for a set of tickers, in backend order
    async fn live_prices(&self, tickers: &[String]) -> Result<LivePricesResponse>;

    /// Live quote for a single ticker
    async fn stock_price(&self, ticker: &str) -> Result<StockPrice>;

    /// Valuation of a batch of holdings
    async fn portfolio_value(&self, holdings: &[Holding]) -> Result<PortfolioValueResponse>;

    /// Next-close price prediction for one ticker
    async fn predict_price(&self, ticker: &str) -> Result<PricePrediction>;

    /// Annualized Sharpe ratio for one ticker
    async fn sharpe_ratio(&self, ticker: &str) -> Result<SharpeRatio>;

    /// Volatility-based risk level for one ticker
    async fn predict_risk(&self, ticker: &str) -> Result<RiskPrediction>;

    /// Standard deviation and VaR(95) for one ticker
    async fn risk_metrics(&self, ticker: &str) -> Result<RiskMetrics>;

    /// Count of return anomalies for one ticker
    async fn anomalies(&self, ticker: &str) -> Result<AnomalyReport>;

    /// Explained-variance plot location for one ticker
    async fn pca_analysis(&self, ticker: &str) -> Result<PcaAnalysis>;

    /// Course catalog of the learning module
    async fn courses(&self) -> Result<CourseCatalog>;
}
