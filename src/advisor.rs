//! SMA-crossover demo advisor.
//!
//! The simulation core treats the signal layer as an external
//! collaborator; this advisor exists so the CLI can run end-to-end
//! without one. It goes long when the fast SMA crosses above the slow
//! SMA and short on the opposite cross.

use papertrade_core::{Advice, Advisor, Candle, ConfigError, Recommendation};

pub struct SmaCrossAdvisor {
    fast_period: usize,
    slow_period: usize,
    closes: Vec<f64>,
    prev_diff: Option<f64>,
}

impl SmaCrossAdvisor {
    pub fn new(fast_period: usize, slow_period: usize) -> Result<Self, ConfigError> {
        if fast_period == 0 {
            return Err(ConfigError::Invalid("fast period must be positive".into()));
        }
        if fast_period >= slow_period {
            return Err(ConfigError::Invalid(
                "fast period must be less than slow period".into(),
            ));
        }
        Ok(Self {
            fast_period,
            slow_period,
            closes: Vec::new(),
            prev_diff: None,
        })
    }

    fn sma(&self, period: usize) -> f64 {
        let window = &self.closes[self.closes.len() - period..];
        window.iter().sum::<f64>() / period as f64
    }
}

impl Advisor for SmaCrossAdvisor {
    fn name(&self) -> &str {
        "sma-cross"
    }

    fn update(&mut self, candle: &Candle) -> Option<Advice> {
        self.closes.push(candle.close);
        if self.closes.len() < self.slow_period {
            return None;
        }

        let diff = self.sma(self.fast_period) - self.sma(self.slow_period);
        let recommendation = match self.prev_diff {
            Some(prev) if prev <= 0.0 && diff > 0.0 => Recommendation::Long,
            Some(prev) if prev >= 0.0 && diff < 0.0 => Recommendation::Short,
            _ => Recommendation::Soft,
        };
        self.prev_diff = Some(diff);

        Some(Advice::new(recommendation, *candle))
    }

    fn reset(&mut self) {
        self.closes.clear();
        self.prev_diff = None;
    }

    fn warmup_period(&self) -> usize {
        self.slow_period
    }
}
