//! Performance report.

use serde::{Deserialize, Serialize};

/// Snapshot of backtest performance, derived from the round-trip list and
/// the portfolio. Recomputed on demand; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Quote currency label
    pub currency: String,
    /// Traded asset label
    pub asset: String,

    /// First processed candle, RFC 3339
    pub start_time: String,
    /// Last processed candle, RFC 3339
    pub end_time: String,
    /// Elapsed simulated time, milliseconds
    pub timespan_ms: i64,

    pub start_price: f64,
    pub end_price: f64,
    /// Buy-and-hold benchmark return in percent
    pub market: f64,

    pub start_balance: f64,
    pub balance: f64,
    pub profit: f64,
    pub relative_profit: f64,
    pub yearly_profit: f64,
    pub relative_yearly_profit: f64,

    /// Excess return over the buy-and-hold benchmark
    pub alpha: f64,
    pub sharpe: f64,
    /// Worst round-trip drawdown, 0 when no round trips completed
    pub drawdown: f64,

    /// Number of completed round trips
    pub trades: usize,
    /// Round trips that closed at or above their entry balance
    pub ptrades: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub avg_win_trade: f64,
    pub avg_losing_trade: f64,
    pub pay_off_ratio: f64,
    pub win_rate: f64,
}

impl Report {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Period:              {} .. {}\n", self.start_time, self.end_time));
        s.push_str(&format!("  Start Balance:       {:.8} {}\n", self.start_balance, self.asset));
        s.push_str(&format!("  Final Balance:       {:.8} {}\n", self.balance, self.asset));
        s.push_str(&format!("  Profit:              {:.8} ({:.2}%)\n", self.profit, self.relative_profit));
        s.push_str(&format!("  Yearly Profit:       {:.8} ({:.2}%)\n", self.yearly_profit, self.relative_yearly_profit));
        s.push_str(&format!("  Market (hold):       {:.2}%\n", self.market));
        s.push_str(&format!("  Alpha:               {:.8}\n", self.alpha));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Sharpe Ratio:        {:.2}\n", self.sharpe));
        s.push_str(&format!("  Worst Drawdown:      {:.8}\n", self.drawdown));
        s.push_str(&format!("  Profit Factor:       {:.2}\n", self.profit_factor));
        s.push('\n');

        s.push_str("ROUND TRIPS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Completed:           {}\n", self.trades));
        s.push_str(&format!("  Profitable:          {}\n", self.ptrades));
        s.push_str(&format!("  Win Rate:            {:.2}%\n", self.win_rate * 100.0));
        s.push_str(&format!("  Avg Win:             {:.8}\n", self.avg_win_trade));
        s.push_str(&format!("  Avg Loss:            {:.8}\n", self.avg_losing_trade));
        s.push_str(&format!("  Payoff Ratio:        {:.2}\n", self.pay_off_ratio));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
