//! Configuration structures.

use papertrade_sim::{BacktestConfig, PaperTraderConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub paper_trader: PaperTraderConfig,
    #[serde(default)]
    pub performance: PerformanceSettings,
    #[serde(default)]
    pub advisor: AdvisorSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Assemble the backtest configuration the engine consumes.
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            currency: self.market.currency.clone(),
            asset: self.market.asset.clone(),
            risk_free_return: self.performance.risk_free_return,
            trader: self.paper_trader.clone(),
        }
    }
}

/// What market the simulation is labeled with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSettings {
    pub currency: String,
    pub asset: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            asset: "BTC".to_string(),
        }
    }
}

/// Performance analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSettings {
    /// Risk-free return used by the sharpe ratio, percent
    pub risk_free_return: f64,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            risk_free_return: 2.0,
        }
    }
}

/// Settings for the built-in SMA-crossover demo advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSettings {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_sim::{AccountingModel, FeeTier};

    #[test]
    fn test_defaults_deserialize_from_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.market.asset, "BTC");
        assert_eq!(config.paper_trader.accounting, AccountingModel::Spot);
        assert_eq!(config.performance.risk_free_return, 2.0);
    }

    #[test]
    fn test_full_toml_round() {
        let toml_src = r#"
            [market]
            currency = "EUR"
            asset = "ETH"

            [paper_trader]
            fee_using = "taker"
            slippage_pct = 0.1
            asset = 2.0
            currency = 50.0
            accounting = "margin"

            [paper_trader.fees]
            maker_pct = 0.1
            taker_pct = 0.2

            [performance]
            risk_free_return = 1.5
        "#;

        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.paper_trader.fee_using, FeeTier::Taker);
        assert_eq!(config.paper_trader.accounting, AccountingModel::Margin);

        let backtest = config.backtest_config();
        assert_eq!(backtest.currency, "EUR");
        assert_eq!(backtest.risk_free_return, 1.5);
        assert!(backtest.trader.validate().is_ok());
    }
}
