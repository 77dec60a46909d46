//! Per-panel output state
//!
//! Each dashboard region owns one output slot. Operations may overlap (a
//! panel can be re-invoked before its previous call resolves), so every
//! slot carries an issue counter: a response commits only if its issuing
//! call is still the latest one for that panel. Stale responses are
//! discarded instead of overwriting newer content.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// The dashboard regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Auto-refreshing watchlist quotes
    LivePrices,
    /// Batch portfolio valuation
    Portfolio,
    /// Price prediction joined with the Sharpe ratio
    Prediction,
    /// Risk level, risk metrics and anomaly count
    Risk,
    /// Explained-variance plot
    Pca,
    /// Course catalog
    Learn,
}

impl PanelKind {
    /// All panels, in display order
    pub fn all() -> [PanelKind; 6] {
        [
            Self::LivePrices,
            Self::Portfolio,
            Self::Prediction,
            Self::Risk,
            Self::Pca,
            Self::Learn,
        ]
    }

    /// Stable name used in logs and the REPL
    pub fn name(&self) -> &'static str {
        match self {
            Self::LivePrices => "live-prices",
            Self::Portfolio => "portfolio",
            Self::Prediction => "prediction",
            Self::Risk => "risk",
            Self::Pca => "pca",
            Self::Learn => "learn",
        }
    }
}

/// Claim on a panel's output slot for one in-flight operation
#[derive(Debug)]
pub struct PanelTicket {
    seq: u64,
}

/// One panel's output slot
#[derive(Debug, Default)]
pub struct Panel {
    issued: AtomicU64,
    content: RwLock<String>,
}

impl Panel {
    /// Start a new operation on this panel
    ///
    /// Stamps the next issue number and installs the loading placeholder,
    /// unless an even newer operation already started.
    pub async fn begin(&self, placeholder: &str) -> PanelTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let mut content = self.content.write().await;
        if self.issued.load(Ordering::SeqCst) == seq {
            *content = placeholder.to_string();
        }

        PanelTicket { seq }
    }

    /// Install `content` if the ticket's operation is still the latest
    ///
    /// Returns whether the content was accepted.
    pub async fn commit(&self, ticket: &PanelTicket, content: String) -> bool {
        let mut slot = self.content.write().await;
        if self.issued.load(Ordering::SeqCst) != ticket.seq {
            return false;
        }
        *slot = content;
        true
    }

    /// Current display string
    pub async fn content(&self) -> String {
        self.content.read().await.clone()
    }
}

/// The set of panels shared between the dashboard, the poller and the host
#[derive(Debug, Default)]
pub struct PanelBoard {
    live_prices: Panel,
    portfolio: Panel,
    prediction: Panel,
    risk: Panel,
    pca: Panel,
    learn: Panel,
}

impl PanelBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Access one panel's slot
    pub fn panel(&self, kind: PanelKind) -> &Panel {
        match kind {
            PanelKind::LivePrices => &self.live_prices,
            PanelKind::Portfolio => &self.portfolio,
            PanelKind::Prediction => &self.prediction,
            PanelKind::Risk => &self.risk,
            PanelKind::Pca => &self.pca,
            PanelKind::Learn => &self.learn,
        }
    }
}
