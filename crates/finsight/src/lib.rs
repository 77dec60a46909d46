//! Client polling and aggregation core for a stock-analytics backend
//!
//! This crate renders a dashboard out of precomputed analytics fetched
//! from a remote backend over HTTP. Nothing is computed locally; the crate
//! assembles query strings, awaits responses and formats the results.
//! It provides:
//!
//! - A typed HTTP client over the backend's analytics and learning
//!   endpoints (live prices, portfolio valuation, prediction, risk,
//!   PCA plots, courses)
//! - A self-perpetuating live-price refresh loop with an owned,
//!   cancellable handle
//! - Concurrent multi-endpoint joins with all-or-nothing merge semantics
//!   for the prediction and risk panels
//! - Per-panel output slots guarded by issue counters, so overlapping
//!   invocations of one panel cannot let a stale response overwrite a
//!   newer one
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight::{BackendClient, Dashboard, DashboardConfig, PricePoller};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::default().with_env()?;
//!     let client = Arc::new(BackendClient::new(&config)?);
//!     let dashboard = Arc::new(Dashboard::new(client, &config));
//!
//!     // Keep the live-prices panel fresh in the background
//!     let poller = PricePoller::new(Arc::clone(&dashboard), config.refresh_interval).spawn();
//!
//!     println!("{}", dashboard.predict("INFY").await);
//!
//!     poller.shutdown();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fanout;
pub mod panel;
pub mod poller;
pub mod portfolio;
pub mod render;

// Re-export main types for convenience
pub use api::{Backend, BackendClient};
pub use commands::Command;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, LogNotifier, Notifier};
pub use error::{DashboardError, Result};
pub use fanout::{fetch_prediction, fetch_risk, PredictionView, RiskView};
pub use panel::{Panel, PanelBoard, PanelKind, PanelTicket};
pub use poller::{PollerHandle, PricePoller};
pub use portfolio::{parse_holdings, Holding};
pub use render::{Formatter, HtmlFormatter, TextFormatter};
