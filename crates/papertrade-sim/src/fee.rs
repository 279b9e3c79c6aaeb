//! Fee and slippage model.

use serde::{Deserialize, Serialize};

/// Which fee tier the simulation trades at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Maker,
    Taker,
}

/// The exchange's fee rates per tier, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub maker_pct: f64,
    pub taker_pct: f64,
}

impl FeeSchedule {
    /// Rate for the given tier, in percent.
    pub fn rate_pct(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Maker => self.maker_pct,
            FeeTier::Taker => self.taker_pct,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            maker_pct: 0.15,
            taker_pct: 0.25,
        }
    }
}

/// Converts a gross amount into a fee-and-slippage-adjusted amount.
///
/// The result is truncated (never rounded) to 8 fractional digits, so the
/// model can understate the remaining balance but never overstate it.
#[derive(Debug, Clone, Copy)]
pub struct FeeModel {
    multiplier: f64,
}

const SCALE: f64 = 1e8;

impl FeeModel {
    /// Select a tier from the schedule, adding the static slippage percentage.
    pub fn new(schedule: &FeeSchedule, tier: FeeTier, slippage_pct: f64) -> Self {
        Self {
            multiplier: 1.0 - (schedule.rate_pct(tier) + slippage_pct) / 100.0,
        }
    }

    /// Apply fee and slippage to a gross amount.
    pub fn apply(&self, amount: f64) -> f64 {
        let mut amount = amount * SCALE;
        amount *= self.multiplier;
        amount = amount.floor();
        amount / SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(fee_pct: f64, slippage_pct: f64) -> FeeModel {
        let schedule = FeeSchedule {
            maker_pct: fee_pct,
            taker_pct: fee_pct * 2.0,
        };
        FeeModel::new(&schedule, FeeTier::Maker, slippage_pct)
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        // 1.0 * (1 - 0.001) lands just below 0.999 in binary floating
        // point; flooring at 8 digits must keep the short side.
        let fee = model(0.05, 0.05);
        assert_eq!(fee.apply(1.0), 0.99899999);
    }

    #[test]
    fn test_never_overstates_balance() {
        let fee = model(0.15, 0.05);
        let exact_multiplier = 1.0 - 0.2 / 100.0;
        for i in 1..1000 {
            let amount = i as f64 * 0.737;
            assert!(fee.apply(amount) <= amount * exact_multiplier);
        }
    }

    #[test]
    fn test_selects_tier_by_name() {
        let schedule = FeeSchedule {
            maker_pct: 0.1,
            taker_pct: 0.3,
        };
        let maker = FeeModel::new(&schedule, FeeTier::Maker, 0.0);
        let taker = FeeModel::new(&schedule, FeeTier::Taker, 0.0);
        assert!(taker.apply(100.0) < maker.apply(100.0));
    }

    #[test]
    fn test_zero_rates_floor_only() {
        let fee = model(0.0, 0.0);
        assert_eq!(fee.apply(1.5), 1.5);
        // digits beyond the eighth are dropped
        assert_eq!(fee.apply(0.123456789), 0.12345678);
    }
}
