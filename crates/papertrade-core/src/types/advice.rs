//! Trading advice emitted by the advisor layer.

use serde::{Deserialize, Serialize};

use super::{Candle, TradeAction};

/// What the advisor recommends doing at a given candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Open (or flip to) a long position
    Long,
    /// Open (or flip to) a short position
    Short,
    /// Close any open position
    Close,
    /// No actionable change; the simulator ignores it
    Soft,
}

impl Recommendation {
    /// The trade action this recommendation maps to, if any.
    pub fn action(&self) -> Option<TradeAction> {
        match self {
            Recommendation::Long => Some(TradeAction::Long),
            Recommendation::Short => Some(TradeAction::Short),
            Recommendation::Close => Some(TradeAction::Close),
            Recommendation::Soft => None,
        }
    }
}

/// A recommendation paired with the candle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub recommendation: Recommendation,
    pub candle: Candle,
}

impl Advice {
    /// Create a new advice for a candle.
    pub fn new(recommendation: Recommendation, candle: Candle) -> Self {
        Self {
            recommendation,
            candle,
        }
    }
}
