//! Dashboard operations
//!
//! One operation per panel. Every operation follows the same shape: claim
//! the panel (installs the loading text), await the fetch or join, render
//! on success or fall back to the panel's fixed failure message, then
//! commit under the claim. Errors never escape an operation; the returned
//! string is whatever the panel now shows.

use crate::api::Backend;
use crate::config::DashboardConfig;
use crate::fanout::{fetch_prediction, fetch_risk};
use crate::panel::{PanelBoard, PanelKind};
use crate::portfolio::parse_holdings;
use crate::render::{Formatter, TextFormatter};
use chrono::Utc;
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Toast-style notification sink
///
/// The original page surfaced short success messages in a toast; the core
/// only keeps the seam.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that routes toasts into the log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{message}");
    }
}

/// The dashboard core: panels plus the operations that fill them
pub struct Dashboard {
    api: Arc<dyn Backend>,
    panels: Arc<PanelBoard>,
    formatter: Box<dyn Formatter>,
    notifier: Box<dyn Notifier>,
    base_url: String,
    watchlist: RwLock<Vec<String>>,
}

impl Dashboard {
    /// Create a dashboard with the default text formatter and log notifier
    pub fn new(api: Arc<dyn Backend>, config: &DashboardConfig) -> Self {
        Self {
            api,
            panels: Arc::new(PanelBoard::new()),
            formatter: Box::new(TextFormatter),
            notifier: Box::new(LogNotifier),
            base_url: config.base_url(),
            watchlist: RwLock::new(config.watchlist.clone()),
        }
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the notifier
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shared panel board
    pub fn panels(&self) -> Arc<PanelBoard> {
        Arc::clone(&self.panels)
    }

    /// Tickers currently polled by the live-prices loop
    pub async fn watchlist(&self) -> Vec<String> {
        self.watchlist.read().await.clone()
    }

    /// Add a ticker to the watchlist; duplicates are ignored
    pub async fn watch(&self, symbol: &str) {
        let symbol = symbol.trim().to_string();
        if symbol.is_empty() {
            return;
        }
        let mut watchlist = self.watchlist.write().await;
        if !watchlist.contains(&symbol) {
            watchlist.push(symbol);
        }
    }

    /// Remove a ticker from the watchlist; returns whether it was present
    pub async fn unwatch(&self, symbol: &str) -> bool {
        let mut watchlist = self.watchlist.write().await;
        if let Some(pos) = watchlist.iter().position(|s| s == symbol) {
            watchlist.remove(pos);
            true
        } else {
            false
        }
    }

    /// Fetch the watchlist's live prices and replace the panel content
    ///
    /// The displayed set is replaced wholesale, in response order; a failed
    /// cycle replaces it with the static message instead.
    pub async fn refresh_live_prices(&self) -> String {
        let kind = PanelKind::LivePrices;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let tickers = self.watchlist.read().await.clone();
        let content = match self.api.live_prices(&tickers).await {
            Ok(response) => self
                .formatter
                .format_live_prices(&response.live_prices, Utc::now()),
            Err(e) => {
                warn!("live-prices refresh failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Parse holdings input and ask the backend for the valuation
    pub async fn calculate_portfolio(&self, input: &str) -> String {
        let kind = PanelKind::Portfolio;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let holdings = parse_holdings(input);
        let content = match self.api.portfolio_value(&holdings).await {
            Ok(valuation) => {
                self.notifier.notify("Portfolio Calculated!");
                self.formatter.format_portfolio(&valuation)
            }
            Err(e) => {
                warn!("portfolio valuation failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Join prediction and Sharpe ratio for one symbol
    pub async fn predict(&self, symbol: &str) -> String {
        let kind = PanelKind::Prediction;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let symbol = symbol.trim();
        let content = match fetch_prediction(self.api.as_ref(), symbol).await.merged() {
            Ok(view) => {
                self.notifier.notify("Prediction ready!");
                self.formatter.format_prediction(&view)
            }
            Err(e) => {
                warn!("prediction join for {symbol} failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Join risk level, risk metrics and anomaly count for one symbol
    pub async fn analyze_risk(&self, symbol: &str) -> String {
        let kind = PanelKind::Risk;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let symbol = symbol.trim();
        let content = match fetch_risk(self.api.as_ref(), symbol).await.merged() {
            Ok(view) => {
                self.notifier.notify("Risk Analyzed");
                self.formatter.format_risk(&view)
            }
            Err(e) => {
                warn!("risk join for {symbol} failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Ask for the explained-variance plot of one symbol
    pub async fn run_pca(&self, symbol: &str) -> String {
        let kind = PanelKind::Pca;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let symbol = symbol.trim();
        let content = match self.api.pca_analysis(symbol).await {
            Ok(analysis) => {
                if analysis.plot_path.is_some() {
                    // The plot image is served from a fixed location derived
                    // from the ticker, not from the returned path
                    let plot_url =
                        format!("{}/plots/{}_pca_variance.png", self.base_url, symbol);
                    self.notifier.notify("PCA Ready");
                    self.formatter.format_pca(symbol, Some(&plot_url))
                } else {
                    self.formatter.format_pca(symbol, None)
                }
            }
            Err(e) => {
                warn!("pca analysis for {symbol} failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Load the course catalog
    pub async fn load_courses(&self) -> String {
        let kind = PanelKind::Learn;
        let panel = self.panels.panel(kind);
        let ticket = panel.begin(&self.formatter.loading_text(kind)).await;

        let content = match self.api.courses().await {
            Ok(catalog) => {
                self.notifier.notify("Courses Loaded");
                self.formatter.format_courses(&catalog.available_courses)
            }
            Err(e) => {
                warn!("course catalog load failed: {e}");
                self.formatter.failure_text(kind)
            }
        };

        panel.commit(&ticket, content.clone()).await;
        content
    }

    /// Quote a single symbol without touching any panel
    pub async fn quote(&self, symbol: &str) -> String {
        let symbol = symbol.trim();
        match self.api.stock_price(symbol).await {
            Ok(quote) => self.formatter.format_quote(&quote),
            Err(e) => {
                warn!("quote for {symbol} failed: {e}");
                self.formatter.failure_text(PanelKind::LivePrices)
            }
        }
    }

    /// Fill the always-on panels concurrently at startup
    pub async fn warm_up(&self) {
        futures::future::join_all(vec![
            self.refresh_live_prices().boxed(),
            self.load_courses().boxed(),
        ])
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AnomalyReport, CourseCatalog, LivePrice, LivePricesResponse, MockBackend, PcaAnalysis,
        PortfolioLine, PortfolioValueResponse, PricePrediction, RiskMetrics, RiskPrediction,
        SharpeRatio, StockPrice,
    };
    use crate::error::{DashboardError, Result};
    use crate::portfolio::Holding;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn api_error() -> DashboardError {
        DashboardError::Api {
            status: 500,
            body: "internal error".to_string(),
        }
    }

    fn dashboard(api: MockBackend) -> Dashboard {
        Dashboard::new(Arc::new(api), &DashboardConfig::default())
    }

    fn quotes(symbols: &[&str]) -> LivePricesResponse {
        LivePricesResponse {
            live_prices: symbols
                .iter()
                .map(|s| LivePrice {
                    ticker: (*s).to_string(),
                    price: 100.0,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_display_in_response_order() {
        let mut api = MockBackend::new();
        let mut responses = vec![quotes(&["INFY", "TCS"]), quotes(&["SBIN", "TCS"])].into_iter();
        api.expect_live_prices()
            .returning(move |_| Ok(responses.next().expect("two refreshes")));

        let dash = dashboard(api);

        let first = dash.refresh_live_prices().await;
        let infy = first.find("INFY").unwrap();
        assert!(infy < first.find("TCS").unwrap());

        let second = dash.refresh_live_prices().await;
        assert!(!second.contains("INFY"));
        assert!(second.find("SBIN").unwrap() < second.find("TCS").unwrap());
        assert_eq!(
            dash.panels().panel(PanelKind::LivePrices).content().await,
            second
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_replaces_display_with_static_message() {
        let mut api = MockBackend::new();
        api.expect_live_prices().returning(|_| Err(api_error()));

        let dash = dashboard(api);
        let rendered = dash.refresh_live_prices().await;
        assert_eq!(rendered, "Could not fetch live prices");
    }

    #[tokio::test]
    async fn test_portfolio_forwards_parsed_holdings() {
        let mut api = MockBackend::new();
        api.expect_portfolio_value()
            .withf(|holdings: &[Holding]| {
                holdings.len() == 3
                    && holdings[0].symbol == "AAA"
                    && holdings[1].quantity.is_nan()
                    && holdings[2].symbol == "CCC"
            })
            .returning(|_| {
                Ok(PortfolioValueResponse {
                    total_portfolio_value: 1300.0,
                    details: vec![PortfolioLine {
                        ticker: "AAA".to_string(),
                        qty: 10.0,
                        price: Some(100.0),
                        value: Some(1000.0),
                    }],
                })
            });

        let dash = dashboard(api);
        let rendered = dash.calculate_portfolio("AAA,10\nBBB,xyz\n,5\nCCC,3").await;
        assert!(rendered.contains("Total Value: ₹1300.00"));
    }

    #[tokio::test]
    async fn test_portfolio_missing_fields_render_fallback() {
        let mut api = MockBackend::new();
        api.expect_portfolio_value().returning(|_| {
            Ok(PortfolioValueResponse {
                total_portfolio_value: 0.0,
                details: vec![PortfolioLine {
                    ticker: "SBIN".to_string(),
                    qty: 10.0,
                    price: None,
                    value: None,
                }],
            })
        });

        let dash = dashboard(api);
        let rendered = dash.calculate_portfolio("SBIN,10").await;
        assert!(rendered.contains("₹N/A = ₹N/A"));
    }

    #[tokio::test]
    async fn test_prediction_failure_shows_message_and_no_fields() {
        let mut api = MockBackend::new();
        api.expect_predict_price().returning(|_| Err(api_error()));
        api.expect_sharpe_ratio()
            .returning(|_| Ok(SharpeRatio { sharpe_ratio: 1.42 }));

        let dash = dashboard(api);
        let rendered = dash.predict("INFY").await;
        assert_eq!(rendered, "Prediction failed.");
        assert!(!rendered.contains("1.42"));
    }

    #[tokio::test]
    async fn test_risk_single_leg_failure_discards_other_results() {
        let mut api = MockBackend::new();
        api.expect_predict_risk().returning(|_| {
            Ok(RiskPrediction {
                predicted_risk_level: "High".to_string(),
                recent_volatility: 0.031,
            })
        });
        api.expect_risk_metrics().returning(|_| Err(api_error()));
        api.expect_anomalies()
            .returning(|_| Ok(AnomalyReport { anomalies_detected: 2 }));

        let dash = dashboard(api);
        let rendered = dash.analyze_risk("TCS").await;
        assert_eq!(rendered, "Error analyzing risk.");
        assert!(!rendered.contains("High"));
    }

    #[tokio::test]
    async fn test_risk_success_merges_three_endpoints() {
        let mut api = MockBackend::new();
        api.expect_predict_risk().returning(|_| {
            Ok(RiskPrediction {
                predicted_risk_level: "Low".to_string(),
                recent_volatility: 0.008,
            })
        });
        api.expect_risk_metrics().returning(|_| {
            Ok(RiskMetrics {
                standard_deviation: 0.0123,
                var_95: -0.0241,
            })
        });
        api.expect_anomalies()
            .returning(|_| Ok(AnomalyReport { anomalies_detected: 4 }));

        let dash = dashboard(api);
        let rendered = dash.analyze_risk("TCS").await;
        assert!(rendered.contains("Risk Level: Low"));
        assert!(rendered.contains("Anomalies: 4"));
    }

    #[tokio::test]
    async fn test_pca_renders_ticker_derived_plot_url() {
        let mut api = MockBackend::new();
        api.expect_pca_analysis().returning(|_| {
            Ok(PcaAnalysis {
                plot_path: Some("plots/INFY_pca_variance.png".to_string()),
            })
        });

        let dash = dashboard(api);
        let rendered = dash.run_pca("INFY").await;
        assert!(rendered.contains("http://127.0.0.1:8000/plots/INFY_pca_variance.png"));
    }

    #[tokio::test]
    async fn test_pca_without_plot_path() {
        let mut api = MockBackend::new();
        api.expect_pca_analysis()
            .returning(|_| Ok(PcaAnalysis { plot_path: None }));

        let dash = dashboard(api);
        assert_eq!(dash.run_pca("INFY").await, "No plot.");
    }

    #[tokio::test]
    async fn test_courses_failure_message() {
        let mut api = MockBackend::new();
        api.expect_courses().returning(|| Err(api_error()));

        let dash = dashboard(api);
        assert_eq!(dash.load_courses().await, "Failed to load courses.");
    }

    #[tokio::test]
    async fn test_quote_formats_single_symbol() {
        let mut api = MockBackend::new();
        api.expect_stock_price().returning(|_| {
            Ok(StockPrice {
                ticker: "INFY".to_string(),
                price: 1520.5,
            })
        });

        let dash = dashboard(api);
        assert_eq!(dash.quote("INFY").await, "INFY: ₹1520.50\n");
    }

    #[tokio::test]
    async fn test_watchlist_edits_feed_next_refresh() {
        let mut api = MockBackend::new();
        api.expect_live_prices()
            .withf(|tickers: &[String]| tickers.contains(&"AAPL".to_string()))
            .returning(|_| Ok(quotes(&["AAPL"])));

        let dash = dashboard(api);
        dash.watch("AAPL").await;
        assert!(dash.watchlist().await.contains(&"AAPL".to_string()));

        let rendered = dash.refresh_live_prices().await;
        assert!(rendered.contains("AAPL"));

        assert!(dash.unwatch("AAPL").await);
        assert!(!dash.watchlist().await.contains(&"AAPL".to_string()));
    }

    /// Backend stub whose first prediction resolves slower than the second
    struct SlowFirstPrediction {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Backend for SlowFirstPrediction {
        async fn live_prices(&self, _tickers: &[String]) -> Result<LivePricesResponse> {
            panic!("not used in this test")
        }

        async fn stock_price(&self, _ticker: &str) -> Result<StockPrice> {
            panic!("not used in this test")
        }

        async fn portfolio_value(&self, _holdings: &[Holding]) -> Result<PortfolioValueResponse> {
            panic!("not used in this test")
        }

        async fn predict_price(&self, _ticker: &str) -> Result<PricePrediction> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(PricePrediction {
                last_close: 100.0,
                predicted_next_close: 100.0 + call as f64,
                confidence_percentage: 90.0,
            })
        }

        async fn sharpe_ratio(&self, _ticker: &str) -> Result<SharpeRatio> {
            Ok(SharpeRatio { sharpe_ratio: 1.0 })
        }

        async fn predict_risk(&self, _ticker: &str) -> Result<RiskPrediction> {
            panic!("not used in this test")
        }

        async fn risk_metrics(&self, _ticker: &str) -> Result<RiskMetrics> {
            panic!("not used in this test")
        }

        async fn anomalies(&self, _ticker: &str) -> Result<AnomalyReport> {
            panic!("not used in this test")
        }

        async fn pca_analysis(&self, _ticker: &str) -> Result<PcaAnalysis> {
            panic!("not used in this test")
        }

        async fn courses(&self) -> Result<CourseCatalog> {
            panic!("not used in this test")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_predictions_keep_latest_issue() {
        let api = Arc::new(SlowFirstPrediction {
            calls: AtomicUsize::new(0),
        });
        let dash = Arc::new(Dashboard::new(
            api as Arc<dyn Backend>,
            &DashboardConfig::default(),
        ));

        let slow = tokio::spawn({
            let dash = Arc::clone(&dash);
            async move { dash.predict("INFY").await }
        });
        tokio::task::yield_now().await;

        let fast = tokio::spawn({
            let dash = Arc::clone(&dash);
            async move { dash.predict("INFY").await }
        });

        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        let fast = fast.unwrap();

        // The second (latest-issued) call owns the panel even though the
        // first one resolved afterwards
        assert!(fast.contains("Predicted Next Close: ₹101"));
        assert_eq!(
            dash.panels().panel(PanelKind::Prediction).content().await,
            fast
        );
    }
}
