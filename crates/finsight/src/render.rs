//! Panel rendering
//!
//! Formatting is kept behind a trait so the same dashboard core can feed a
//! terminal or an embedding host that injects HTML fragments. Formatters
//! only shape data that already arrived; they never fetch.

use crate::api::{Course, LivePrice, PortfolioValueResponse, StockPrice};
use crate::fanout::{PredictionView, RiskView};
use crate::panel::PanelKind;
use chrono::{DateTime, Utc};

/// Literal shown in place of a missing unit price or line value
const MISSING_VALUE: &str = "N/A";

/// Renders panel content as display strings
pub trait Formatter: Send + Sync {
    /// Placeholder shown while a panel's operation is in flight
    fn loading_text(&self, kind: PanelKind) -> String;

    /// Static message shown when a panel's operation failed
    fn failure_text(&self, kind: PanelKind) -> String;

    /// Watchlist quotes, preserving response order
    fn format_live_prices(&self, prices: &[LivePrice], refreshed_at: DateTime<Utc>) -> String;

    /// Backend-computed portfolio total plus per-line breakdown
    fn format_portfolio(&self, valuation: &PortfolioValueResponse) -> String;

    /// Merged prediction view
    fn format_prediction(&self, view: &PredictionView) -> String;

    /// Merged risk view
    fn format_risk(&self, view: &RiskView) -> String;

    /// Explained-variance plot location, or the no-plot notice
    fn format_pca(&self, symbol: &str, plot_url: Option<&str>) -> String;

    /// Course catalog listing
    fn format_courses(&self, courses: &[Course]) -> String;

    /// Single-symbol quote
    fn format_quote(&self, quote: &StockPrice) -> String;
}

/// Plain-text formatter for the terminal dashboard
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn loading_text(&self, kind: PanelKind) -> String {
        match kind {
            PanelKind::LivePrices => "Fetching Real-Time Prices...",
            PanelKind::Portfolio => "Calculating...",
            PanelKind::Prediction => "Predicting...",
            PanelKind::Risk => "Analyzing...",
            PanelKind::Pca => "Running PCA...",
            PanelKind::Learn => "Loading courses...",
        }
        .to_string()
    }

    fn failure_text(&self, kind: PanelKind) -> String {
        match kind {
            PanelKind::LivePrices => "Could not fetch live prices",
            PanelKind::Portfolio => "Error.",
            PanelKind::Prediction => "Prediction failed.",
            PanelKind::Risk => "Error analyzing risk.",
            PanelKind::Pca => "PCA error.",
            PanelKind::Learn => "Failed to load courses.",
        }
        .to_string()
    }

    fn format_live_prices(&self, prices: &[LivePrice], refreshed_at: DateTime<Utc>) -> String {
        let mut output = format!(
            "Live Prices (updated {})\n",
            refreshed_at.format("%H:%M:%S UTC")
        );
        for quote in prices {
            output.push_str(&format!("{}  ₹{:.2}\n", quote.ticker, quote.price));
        }
        output
    }

    fn format_portfolio(&self, valuation: &PortfolioValueResponse) -> String {
        let mut output = format!("Total Value: ₹{:.2}\n", valuation.total_portfolio_value);
        for line in &valuation.details {
            let price = line
                .price
                .map_or(MISSING_VALUE.to_string(), |p| format!("{p:.2}"));
            let value = line
                .value
                .map_or(MISSING_VALUE.to_string(), |v| format!("{v:.2}"));
            output.push_str(&format!(
                "{}: {} × ₹{} = ₹{}\n",
                line.ticker, line.qty, price, value
            ));
        }
        output
    }

    fn format_prediction(&self, view: &PredictionView) -> String {
        format!(
            "{}\nLast Close: ₹{}\nPredicted Next Close: ₹{}\nConfidence: {}%\nSharpe Ratio: {}\n",
            view.symbol,
            view.last_close,
            view.predicted_next_close,
            view.confidence_percentage,
            view.sharpe_ratio
        )
    }

    fn format_risk(&self, view: &RiskView) -> String {
        format!(
            "Risk Level: {}\nVolatility: {}\nStd Dev: {}\nVaR 95%: {}\nAnomalies: {}\n",
            view.risk_level,
            view.recent_volatility,
            view.standard_deviation,
            view.var_95,
            view.anomalies_detected
        )
    }

    fn format_pca(&self, symbol: &str, plot_url: Option<&str>) -> String {
        match plot_url {
            Some(url) => format!("{symbol} explained-variance plot: {url}\n"),
            None => "No plot.".to_string(),
        }
    }

    fn format_courses(&self, courses: &[Course]) -> String {
        let mut output = String::new();
        for course in courses {
            output.push_str(&format!(
                "{}\n  {}\n  {} | {}\n",
                course.title, course.description, course.duration, course.level
            ));
        }
        output
    }

    fn format_quote(&self, quote: &StockPrice) -> String {
        format!("{}: ₹{:.2}\n", quote.ticker, quote.price)
    }
}

/// HTML-fragment formatter for embedding hosts
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn loading_text(&self, kind: PanelKind) -> String {
        format!("<p class='loader'>{}</p>", TextFormatter.loading_text(kind))
    }

    fn failure_text(&self, kind: PanelKind) -> String {
        format!("<p>⚠️ {}</p>", TextFormatter.failure_text(kind))
    }

    fn format_live_prices(&self, prices: &[LivePrice], _refreshed_at: DateTime<Utc>) -> String {
        prices
            .iter()
            .map(|q| {
                format!(
                    "<div class=\"stock-item\"><b>{}</b><br>₹{}</div>",
                    q.ticker, q.price
                )
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn format_portfolio(&self, valuation: &PortfolioValueResponse) -> String {
        let mut output = format!(
            "<h3>Total Value: ₹{}</h3>",
            valuation.total_portfolio_value
        );
        for line in &valuation.details {
            let price = line
                .price
                .map_or(MISSING_VALUE.to_string(), |p| format!("{p:.2}"));
            let value = line
                .value
                .map_or(MISSING_VALUE.to_string(), |v| format!("{v:.2}"));
            output.push_str(&format!(
                "<p>{}: {} × ₹{} = ₹{}</p>",
                line.ticker, line.qty, price, value
            ));
        }
        output
    }

    fn format_prediction(&self, view: &PredictionView) -> String {
        format!(
            "<h3>{}</h3><p><b>Last Close:</b> ₹{}</p><p><b>Predicted Next Close:</b> ₹{}</p><p><b>Confidence:</b> {}%</p><p><b>Sharpe Ratio:</b> {}</p>",
            view.symbol,
            view.last_close,
            view.predicted_next_close,
            view.confidence_percentage,
            view.sharpe_ratio
        )
    }

    fn format_risk(&self, view: &RiskView) -> String {
        format!(
            "<p><b>Risk Level:</b> {}</p><p><b>Volatility:</b> {}</p><p><b>Std Dev:</b> {}</p><p><b>VaR 95%:</b> {}</p><h4>Anomalies: {}</h4>",
            view.risk_level,
            view.recent_volatility,
            view.standard_deviation,
            view.var_95,
            view.anomalies_detected
        )
    }

    fn format_pca(&self, _symbol: &str, plot_url: Option<&str>) -> String {
        match plot_url {
            Some(url) => format!("<img src='{url}' style='width:100%'>"),
            None => "<p>No plot.</p>".to_string(),
        }
    }

    fn format_courses(&self, courses: &[Course]) -> String {
        courses
            .iter()
            .map(|c| {
                format!(
                    "<div class='card'><h4>{}</h4><p>{}</p><p><i>{} | {}</i></p></div>",
                    c.title, c.description, c.duration, c.level
                )
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn format_quote(&self, quote: &StockPrice) -> String {
        format!(
            "<div class=\"stock-item\"><b>{}</b><br>₹{}</div>",
            quote.ticker, quote.price
        )
    }
}
