//! Completed round trips.

use serde::{Deserialize, Serialize};

/// Which side a round trip was entered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// A matched entry/exit pair, the atomic unit of realized performance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    /// Sequential id, starting at 0
    pub id: u64,
    pub side: Side,

    /// Entry timestamp, unix milliseconds
    pub entry_at: i64,
    pub entry_price: f64,
    pub entry_balance: f64,

    /// Exit timestamp, unix milliseconds
    pub exit_at: i64,
    pub exit_price: f64,
    pub exit_balance: f64,

    /// Time the position was held, milliseconds
    pub duration_ms: i64,

    /// Worst unrealized price excursion while open, <= 0
    pub drawdown: f64,

    /// Realized balance delta
    pub pnl: f64,
    /// Realized return in percent
    pub profit: f64,
}

impl RoundTrip {
    /// Whether the round trip closed at or above its entry balance.
    #[inline]
    pub fn is_profitable(&self) -> bool {
        self.exit_balance >= self.entry_balance
    }
}
