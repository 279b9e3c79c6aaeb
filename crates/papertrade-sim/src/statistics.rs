//! Performance statistics.
//!
//! `calculate_report` is a pure function of its inputs; every ratio with a
//! possibly-zero denominator falls back to 0 instead of leaking NaN or
//! infinity into the report.

use chrono::DateTime;
use papertrade_core::{Report, RoundTrip};

const MS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0 * 1000.0;

/// Everything a report is derived from.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub round_trips: &'a [RoundTrip],
    /// First and last processed candle, unix milliseconds
    pub dates: (i64, i64),
    /// Close of the first and last processed candle
    pub prices: (f64, f64),
    pub start_balance: f64,
    pub balance: f64,
    /// Cached sharpe ratio over the round-trip return series
    pub sharpe: f64,
    pub currency: &'a str,
    pub asset: &'a str,
}

/// Sharpe ratio of a return series against a risk-free rate: mean excess
/// return over the population standard deviation. 0 when the series is
/// empty or has no deviation.
pub fn sharpe(returns: &[f64], risk_free_return: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        0.0
    } else {
        (mean - risk_free_return) / std_dev
    }
}

fn format_time(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Derive the performance report.
pub fn calculate_report(input: &ReportInput) -> Report {
    let (start_at, end_at) = input.dates;
    let (start_price, end_price) = input.prices;

    let profit = input.balance - input.start_balance;
    let relative_profit = if input.start_balance != 0.0 {
        input.balance / input.start_balance * 100.0 - 100.0
    } else {
        0.0
    };

    let timespan_ms = end_at - start_at;
    let years = timespan_ms as f64 / MS_PER_YEAR;
    let (yearly_profit, relative_yearly_profit) = if years > 0.0 {
        (profit / years, relative_profit / years)
    } else {
        (0.0, 0.0)
    };

    let market = if start_price != 0.0 {
        end_price * 100.0 / start_price - 100.0
    } else {
        0.0
    };

    let trades = input.round_trips.len();
    let ptrades = input
        .round_trips
        .iter()
        .filter(|rt| rt.is_profitable())
        .count();

    // the worst observed excursion; the reduction over an empty list is
    // undefined, so no round trips means no drawdown
    let drawdown = input
        .round_trips
        .iter()
        .map(|rt| rt.drawdown)
        .fold(f64::INFINITY, f64::min);
    let drawdown = if trades == 0 { 0.0 } else { drawdown };

    let gross_profit: f64 = input
        .round_trips
        .iter()
        .filter(|rt| rt.exit_balance > rt.entry_balance)
        .map(|rt| rt.exit_balance - rt.entry_balance)
        .sum();
    let gross_loss: f64 = input
        .round_trips
        .iter()
        .filter(|rt| rt.exit_balance < rt.entry_balance)
        .map(|rt| rt.exit_balance - rt.entry_balance)
        .sum();

    let profit_factor = if gross_loss != 0.0 {
        (gross_profit / gross_loss).abs()
    } else {
        0.0
    };

    let avg_win_trade = if ptrades > 0 {
        gross_profit / ptrades as f64
    } else {
        0.0
    };
    let avg_losing_trade = if trades > ptrades {
        gross_loss.abs() / (trades - ptrades) as f64
    } else {
        0.0
    };
    let pay_off_ratio = if avg_losing_trade != 0.0 {
        avg_win_trade / avg_losing_trade
    } else {
        0.0
    };

    let win_rate = if profit_factor + pay_off_ratio != 0.0 {
        profit_factor / (profit_factor + pay_off_ratio)
    } else {
        0.0
    };

    Report {
        currency: input.currency.to_string(),
        asset: input.asset.to_string(),
        start_time: format_time(start_at),
        end_time: format_time(end_at),
        timespan_ms,
        start_price,
        end_price,
        market,
        start_balance: input.start_balance,
        balance: input.balance,
        profit,
        relative_profit,
        yearly_profit,
        relative_yearly_profit,
        alpha: profit - market,
        sharpe: input.sharpe,
        drawdown,
        trades,
        ptrades,
        gross_profit,
        gross_loss,
        profit_factor,
        avg_win_trade,
        avg_losing_trade,
        pay_off_ratio,
        win_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_core::Side;

    const DAY: i64 = 86_400_000;

    fn round_trip(id: u64, entry_balance: f64, exit_balance: f64, drawdown: f64) -> RoundTrip {
        RoundTrip {
            id,
            side: Side::Long,
            entry_at: id as i64 * DAY,
            entry_price: 100.0,
            entry_balance,
            exit_at: (id as i64 + 1) * DAY,
            exit_price: 110.0,
            exit_balance,
            duration_ms: DAY,
            drawdown,
            pnl: exit_balance - entry_balance,
            profit: 100.0 * exit_balance / entry_balance - 100.0,
        }
    }

    fn input<'a>(round_trips: &'a [RoundTrip]) -> ReportInput<'a> {
        ReportInput {
            round_trips,
            dates: (0, 10 * DAY),
            prices: (100.0, 110.0),
            start_balance: 1.0,
            balance: 1.2,
            sharpe: 0.5,
            currency: "USD",
            asset: "BTC",
        }
    }

    #[test]
    fn test_empty_round_trips_yield_defined_sentinels() {
        let report = calculate_report(&input(&[]));

        assert_eq!(report.trades, 0);
        assert_eq!(report.drawdown, 0.0);
        assert_eq!(report.profit_factor, 0.0);
        assert_eq!(report.pay_off_ratio, 0.0);
        assert_eq!(report.win_rate, 0.0);
        assert!(report.drawdown.is_finite());
        assert!(!report.sharpe.is_nan());
    }

    #[test]
    fn test_profit_and_market() {
        let report = calculate_report(&input(&[]));

        assert!((report.profit - 0.2).abs() < 1e-12);
        assert!((report.relative_profit - 20.0).abs() < 1e-9);
        assert!((report.market - 10.0).abs() < 1e-9);
        assert!((report.alpha - (report.profit - report.market)).abs() < 1e-12);
    }

    #[test]
    fn test_yearly_profit_scaling() {
        let report = calculate_report(&input(&[]));
        let years = (10 * DAY) as f64 / MS_PER_YEAR;
        assert!((report.yearly_profit - report.profit / years).abs() < 1e-9);
    }

    #[test]
    fn test_zero_timespan_does_not_divide() {
        let mut i = input(&[]);
        i.dates = (DAY, DAY);
        let report = calculate_report(&i);
        assert_eq!(report.yearly_profit, 0.0);
        assert_eq!(report.relative_yearly_profit, 0.0);
    }

    #[test]
    fn test_gross_profit_and_loss_split() {
        let rts = [
            round_trip(0, 1.0, 1.2, -1.0),
            round_trip(1, 1.2, 1.1, -4.0),
            round_trip(2, 1.1, 1.1, -2.0),
        ];
        let report = calculate_report(&input(&rts));

        assert!((report.gross_profit - 0.2).abs() < 1e-12);
        assert!((report.gross_loss - (-0.1)).abs() < 1e-12);
        assert_eq!(report.trades, 3);
        // break-even counts as profitable
        assert_eq!(report.ptrades, 2);
        assert!((report.profit_factor - 2.0).abs() < 1e-9);
        assert_eq!(report.drawdown, -4.0);
    }

    #[test]
    fn test_all_winners_keeps_ratios_finite() {
        let rts = [round_trip(0, 1.0, 1.2, -1.0), round_trip(1, 1.2, 1.5, 0.0)];
        let report = calculate_report(&input(&rts));

        assert_eq!(report.gross_loss, 0.0);
        assert_eq!(report.profit_factor, 0.0);
        assert_eq!(report.avg_losing_trade, 0.0);
        assert_eq!(report.pay_off_ratio, 0.0);
        assert_eq!(report.win_rate, 0.0);
    }

    #[test]
    fn test_report_is_idempotent() {
        let rts = [round_trip(0, 1.0, 1.2, -1.0), round_trip(1, 1.2, 1.1, -3.0)];
        let i = input(&rts);
        assert_eq!(calculate_report(&i), calculate_report(&i));
    }

    #[test]
    fn test_sharpe_against_direct_computation() {
        let returns = [2.0, -1.0, 3.0, 0.5];
        let mean: f64 = returns.iter().sum::<f64>() / 4.0;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 4.0;
        let expected = (mean - 0.5) / variance.sqrt();

        assert!((sharpe(&returns, 0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_edge_cases() {
        assert_eq!(sharpe(&[], 2.0), 0.0);
        // one return has zero deviation
        assert_eq!(sharpe(&[5.0], 2.0), 0.0);
        assert_eq!(sharpe(&[3.0, 3.0, 3.0], 1.0), 0.0);
    }
}
