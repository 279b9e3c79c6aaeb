//! Virtual portfolio state.

use serde::{Deserialize, Serialize};

/// The simulated portfolio owned by the paper trader.
///
/// `balance` stays `None` until the first candle is processed; it is then
/// set once to the asset amount and serves as the profit baseline for the
/// rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Amount of the traded asset
    pub asset: f64,
    /// Amount of the quote currency
    pub currency: f64,
    /// Asset amount snapshotted at initialization
    pub balance: Option<f64>,
}

impl Portfolio {
    /// Create an uninitialized portfolio from the simulation balances.
    pub fn new(asset: f64, currency: f64) -> Self {
        Self {
            asset,
            currency,
            balance: None,
        }
    }

    /// Whether the start balance has been snapshotted yet.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.balance.is_some()
    }
}
