//! Wire types for the analytics backend responses

use serde::{Deserialize, Serialize};

/// One ticker's live quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivePrice {
    pub ticker: String,
    pub price: f64,
}

/// Response of `/analytics/live-prices/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivePricesResponse {
    pub live_prices: Vec<LivePrice>,
}

/// Response of `/analytics/stock-price/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPrice {
    pub ticker: String,
    pub price: f64,
}

/// One valued line of `/analytics/portfolio-value/`
///
/// Unit price and line value are omitted by the backend when the price
/// lookup failed, so both stay optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioLine {
    pub ticker: String,
    pub qty: f64,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Response of `/analytics/portfolio-value/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioValueResponse {
    pub total_portfolio_value: f64,
    pub details: Vec<PortfolioLine>,
}

/// Response of `/analytics/predict-price/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePrediction {
    pub last_close: f64,
    pub predicted_next_close: f64,
    pub confidence_percentage: f64,
}

/// Response of `/analytics/sharpe-ratio/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharpeRatio {
    pub sharpe_ratio: f64,
}

/// Response of `/analytics/predict-risk/`
///
/// `predicted_risk_level` is a free string (the backend sends Low, Medium
/// or High) and is displayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub predicted_risk_level: String,
    pub recent_volatility: f64,
}

/// Response of `/analytics/risk-metrics/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub standard_deviation: f64,
    #[serde(rename = "VaR_95")]
    pub var_95: f64,
}

/// Response of `/analytics/anomalies/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies_detected: u64,
}

/// Response of `/analytics/pca-analysis/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaAnalysis {
    #[serde(default)]
    pub plot_path: Option<String>,
}

/// One course entry of `/finlearn/courses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub level: String,
}

/// Response of `/finlearn/courses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCatalog {
    pub available_courses: Vec<Course>,
}
