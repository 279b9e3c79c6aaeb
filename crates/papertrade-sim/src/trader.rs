//! The paper trader: turns advice into fee-adjusted portfolio transitions.

use papertrade_core::{Advice, Candle, ConfigError, Portfolio, Recommendation, Trade};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fee::{FeeModel, FeeSchedule, FeeTier};

/// How realized gains and entry fees are accounted for.
///
/// Both models are first-class; the configuration must pick one. `Spot`
/// compounds the whole asset balance through every position, `Margin`
/// trades a fixed one-unit notional and books the per-trip P&L against
/// the asset balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingModel {
    Spot,
    Margin,
}

/// Fixed notional traded per position in the margin model.
const MARGIN: f64 = 1.0;

/// Configuration for the paper trader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperTraderConfig {
    /// Fee rates per tier, percent
    pub fees: FeeSchedule,
    /// Which tier this simulation trades at
    pub fee_using: FeeTier,
    /// Static slippage, percent
    pub slippage_pct: f64,
    /// Starting asset amount
    pub asset: f64,
    /// Starting currency amount
    pub currency: f64,
    pub accounting: AccountingModel,
}

impl Default for PaperTraderConfig {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            fee_using: FeeTier::Maker,
            slippage_pct: 0.05,
            asset: 1.0,
            currency: 100.0,
            accounting: AccountingModel::Spot,
        }
    }
}

impl PaperTraderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fees.maker_pct < 0.0 || self.fees.taker_pct < 0.0 {
            return Err(ConfigError::Invalid("fee rates must not be negative".into()));
        }
        if self.slippage_pct < 0.0 {
            return Err(ConfigError::Invalid("slippage must not be negative".into()));
        }
        if self.fees.rate_pct(self.fee_using) + self.slippage_pct >= 100.0 {
            return Err(ConfigError::Invalid(
                "fee plus slippage must stay below 100%".into(),
            ));
        }
        if self.asset <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation asset balance must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// The currently open position, if any, with its entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    None,
    Long { price: f64 },
    Short { price: f64 },
}

/// Simulates a virtual portfolio following long/short/close advice.
pub struct PaperTrader {
    fee: FeeModel,
    accounting: AccountingModel,
    portfolio: Portfolio,
    position: Position,
    price: f64,
    trades: u64,
}

impl PaperTrader {
    pub fn new(config: &PaperTraderConfig) -> Self {
        Self {
            fee: FeeModel::new(&config.fees, config.fee_using, config.slippage_pct),
            accounting: config.accounting,
            portfolio: Portfolio::new(config.asset, config.currency),
            position: Position::None,
            price: 0.0,
            trades: 0,
        }
    }

    /// Record the candle. On the first call the portfolio balance is
    /// snapshotted and a defensive copy is returned so the caller can
    /// relay the portfolio-update notification; later calls are no-ops.
    pub fn process_candle(&mut self, candle: &Candle) -> Option<Portfolio> {
        self.price = candle.close;

        if self.portfolio.is_initialized() {
            return None;
        }
        self.portfolio.balance = Some(self.portfolio.asset);
        debug!(balance = self.portfolio.asset, "start balance set");
        Some(self.portfolio)
    }

    /// Process one advice. `Soft` advice is ignored; anything actionable
    /// updates the position and yields the executed trade, built from the
    /// post-update portfolio.
    pub fn process_advice(&mut self, advice: &Advice) -> Option<Trade> {
        let action = advice.recommendation.action()?;
        self.update_position(advice);

        debug!(%action, price = advice.candle.close, "paper trade executed");
        Some(Trade {
            action,
            price: advice.candle.close,
            portfolio: self.portfolio,
            balance: self.portfolio.asset,
            date: advice.candle.start,
        })
    }

    /// A defensive copy of the current portfolio.
    pub fn portfolio(&self) -> Portfolio {
        self.portfolio
    }

    /// Close of the most recently processed candle.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Number of positions opened so far.
    pub fn trades(&self) -> u64 {
        self.trades
    }

    fn update_position(&mut self, advice: &Advice) {
        let what = advice.recommendation;
        let price = advice.candle.close;

        match self.accounting {
            AccountingModel::Spot => self.settle_spot(what, price),
            AccountingModel::Margin => self.settle_margin(what, price),
        }

        self.position = match what {
            Recommendation::Long => Position::Long { price },
            Recommendation::Short => Position::Short { price },
            Recommendation::Close => Position::None,
            // filtered out before update_position is reached
            Recommendation::Soft => self.position,
        };
    }

    /// Spot accounting: the whole asset balance rides every position, so
    /// realized gains compound and each position entry costs one fee
    /// application over the full balance.
    fn settle_spot(&mut self, what: Recommendation, price: f64) {
        let asset = self.portfolio.asset;

        match (self.position, what) {
            (Position::Short { price: last }, Recommendation::Close | Recommendation::Long) => {
                self.portfolio.asset = self.fee.apply(asset + (asset * last - asset * price) / price);
            }
            (Position::Long { price: last }, Recommendation::Close | Recommendation::Short) => {
                self.portfolio.asset = self.fee.apply(asset + (asset * price - asset * last) / price);
            }
            _ => {}
        }

        if matches!(what, Recommendation::Long | Recommendation::Short) {
            self.trades += 1;
            self.portfolio.asset = self.fee.apply(self.portfolio.asset);
        }
    }

    /// Margin accounting: every position is a fixed one-unit notional;
    /// closing books its P&L against the asset balance and opening costs
    /// a flat fee on the notional.
    fn settle_margin(&mut self, what: Recommendation, price: f64) {
        match (self.position, what) {
            (Position::Short { price: last }, Recommendation::Close | Recommendation::Long) => {
                self.portfolio.asset +=
                    self.fee.apply(MARGIN + (1.0 / price - 1.0 / last) * MARGIN * last) - MARGIN;
            }
            (Position::Long { price: last }, Recommendation::Close | Recommendation::Short) => {
                self.portfolio.asset +=
                    self.fee.apply(MARGIN + (1.0 / last - 1.0 / price) * MARGIN * last) - MARGIN;
            }
            _ => {}
        }

        if matches!(what, Recommendation::Long | Recommendation::Short) {
            self.trades += 1;
            self.portfolio.asset += self.fee.apply(MARGIN) - MARGIN;
        }
    }
}
