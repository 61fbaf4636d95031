use std::collections::BTreeMap;
use std::fmt;

use common::{Grade, Outcome};

use crate::result::BacktestResult;

/// Console report for one symbol's run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub symbol: String,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub opens: usize,
    pub win_rate: f64,
    /// Mean R over closed trades: a win earns its risk/reward, a loss costs 1.
    pub avg_r: f64,
    pub grades: BTreeMap<Grade, usize>,
}

impl Summary {
    pub fn from_result(result: &BacktestResult) -> Self {
        let mut grades = BTreeMap::new();
        let mut total_r = 0.0;

        for trade in result.trades() {
            *grades.entry(trade.signal.health.grade).or_insert(0) += 1;
            match trade.outcome {
                Outcome::Win => total_r += trade.signal.risk_reward_ratio,
                Outcome::Loss => total_r -= 1.0,
                Outcome::Open => {}
            }
        }

        let stats = result.stats;
        let closed = stats.wins + stats.losses;
        Self {
            symbol: result.symbol.clone(),
            total: stats.total,
            wins: stats.wins,
            losses: stats.losses,
            opens: stats.opens,
            win_rate: stats.win_rate,
            avg_r: if closed > 0 { total_r / closed as f64 } else { 0.0 },
            grades,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backtest summary: {}", self.symbol)?;
        writeln!(f, "--------------------")?;
        writeln!(f, "Total signals: {}", self.total)?;
        writeln!(
            f,
            "Wins: {} | Losses: {} | Open: {}",
            self.wins, self.losses, self.opens
        )?;
        writeln!(f, "Win rate: {:.1}% | Avg R: {:.2}", self.win_rate, self.avg_r)?;

        if !self.grades.is_empty() {
            writeln!(f, "Grade distribution:")?;
            for (grade, count) in &self.grades {
                let percent = *count as f64 / self.total as f64 * 100.0;
                writeln!(f, "  {grade}: {count} ({percent:.1}%)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{BacktestStats, ScanRecord, TradeRecord};
    use common::{HealthComponents, HealthScore, Signal, SignalType};

    fn trade(outcome: Outcome, grade: Grade, rr: f64) -> ScanRecord<TradeRecord> {
        ScanRecord::Signal(TradeRecord {
            symbol: "BTC-USDT".into(),
            index: 20,
            timestamp: 0,
            signal: Signal {
                signal_type: SignalType::Bullish,
                strength: 0.5,
                entry: 100.0,
                stop_loss: 98.0,
                take_profit: 100.0 + 2.0 * rr,
                current_price: 100.0,
                risk_reward_ratio: rr,
                order_block: 2,
                support: None,
                resistance: None,
                health: HealthScore {
                    score: 0,
                    grade,
                    components: HealthComponents::default(),
                },
            },
            outcome,
            trade_duration_hours: None,
        })
    }

    fn result(records: Vec<ScanRecord<TradeRecord>>) -> BacktestResult {
        let mut result = BacktestResult::empty("BTC-USDT", "4h", 150);
        result.stats = BacktestStats::from_records(&records);
        result.records = records;
        result
    }

    #[test]
    fn average_r_over_closed_trades() {
        let summary = Summary::from_result(&result(vec![
            trade(Outcome::Win, Grade::A, 3.0),
            trade(Outcome::Win, Grade::B, 2.0),
            trade(Outcome::Loss, Grade::B, 2.0),
            trade(Outcome::Open, Grade::F, 2.0),
        ]));
        // (3 + 2 - 1) / 3
        assert!((summary.avg_r - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.win_rate, 50.0);
        assert_eq!(summary.grades.get(&Grade::B), Some(&2));
        assert_eq!(summary.grades.get(&Grade::APlus), None);
    }

    #[test]
    fn display_lists_grades_best_first() {
        let summary = Summary::from_result(&result(vec![
            trade(Outcome::Win, Grade::D, 2.0),
            trade(Outcome::Win, Grade::APlus, 2.0),
        ]));
        let text = summary.to_string();
        assert!(text.contains("Total signals: 2"));
        assert!(text.contains("Win rate: 100.0% | Avg R: 2.00"));
        let a_plus = text.find("A+: 1 (50.0%)").unwrap();
        let d = text.find("D: 1 (50.0%)").unwrap();
        assert!(a_plus < d);
    }

    #[test]
    fn empty_run_has_zero_average() {
        let summary = Summary::from_result(&BacktestResult::empty("ETH-USDT", "4h", 0));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_r, 0.0);
        assert!(!summary.to_string().contains("Grade distribution"));
    }
}
