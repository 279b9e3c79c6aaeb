//! Executed paper trades.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Portfolio;

/// The action an executed trade performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Long,
    Short,
    Close,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Long => write!(f, "long"),
            TradeAction::Short => write!(f, "short"),
            TradeAction::Close => write!(f, "close"),
        }
    }
}

/// A trade executed by the paper trader.
///
/// `portfolio` is an owned copy of the trader's state taken after the
/// position update; handlers may keep the trade around indefinitely
/// without it changing underneath them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub action: TradeAction,
    pub price: f64,
    pub portfolio: Portfolio,
    pub balance: f64,
    /// Execution timestamp, unix milliseconds
    pub date: i64,
}

impl Trade {
    /// Get the trade timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.date)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}
