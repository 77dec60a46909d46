//! Multi-endpoint joins
//!
//! The prediction and risk panels each combine several independent backend
//! calls into one view. The calls are issued concurrently and every leg is
//! kept as its own result, so the caller decides what to do with partial
//! outcomes; both panels apply an all-or-nothing policy and only render
//! when every leg succeeded.

use crate::api::{AnomalyReport, Backend, PricePrediction, RiskMetrics, RiskPrediction, SharpeRatio};
use crate::error::Result;

/// Outcome of the prediction panel's two concurrent calls
#[derive(Debug)]
pub struct PredictionFanout {
    pub symbol: String,
    pub prediction: Result<PricePrediction>,
    pub sharpe: Result<SharpeRatio>,
}

/// Merged prediction panel content
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub symbol: String,
    pub last_close: f64,
    pub predicted_next_close: f64,
    pub confidence_percentage: f64,
    pub sharpe_ratio: f64,
}

/// Fetch the prediction panel's two endpoints concurrently
pub async fn fetch_prediction(api: &dyn Backend, symbol: &str) -> PredictionFanout {
    let (prediction, sharpe) = tokio::join!(api.predict_price(symbol), api.sharpe_ratio(symbol));

    PredictionFanout {
        symbol: symbol.to_string(),
        prediction,
        sharpe,
    }
}

impl PredictionFanout {
    /// Merge both legs into one view; any failed leg fails the whole join
    pub fn merged(self) -> Result<PredictionView> {
        let prediction = self.prediction?;
        let sharpe = self.sharpe?;

        Ok(PredictionView {
            symbol: self.symbol,
            last_close: prediction.last_close,
            predicted_next_close: prediction.predicted_next_close,
            confidence_percentage: prediction.confidence_percentage,
            sharpe_ratio: sharpe.sharpe_ratio,
        })
    }
}

/// Outcome of the risk panel's three concurrent calls
#[derive(Debug)]
pub struct RiskFanout {
    pub symbol: String,
    pub risk: Result<RiskPrediction>,
    pub metrics: Result<RiskMetrics>,
    pub anomalies: Result<AnomalyReport>,
}

/// Merged risk panel content
#[derive(Debug, Clone, PartialEq)]
pub struct RiskView {
    pub symbol: String,
    pub risk_level: String,
    pub recent_volatility: f64,
    pub standard_deviation: f64,
    pub var_95: f64,
    pub anomalies_detected: u64,
}

/// Fetch the risk panel's three endpoints concurrently
pub async fn fetch_risk(api: &dyn Backend, symbol: &str) -> RiskFanout {
    let (risk, metrics, anomalies) = tokio::join!(
        api.predict_risk(symbol),
        api.risk_metrics(symbol),
        api.anomalies(symbol),
    );

    RiskFanout {
        symbol: symbol.to_string(),
        risk,
        metrics,
        anomalies,
    }
}

impl RiskFanout {
    /// Merge all three legs into one view; any failed leg fails the join
    pub fn merged(self) -> Result<RiskView> {
        let risk = self.risk?;
        let metrics = self.metrics?;
        let anomalies = self.anomalies?;

        Ok(RiskView {
            symbol: self.symbol,
            risk_level: risk.predicted_risk_level,
            recent_volatility: risk.recent_volatility,
            standard_deviation: metrics.standard_deviation,
            var_95: metrics.var_95,
            anomalies_detected: anomalies.anomalies_detected,
        })
    }
}
