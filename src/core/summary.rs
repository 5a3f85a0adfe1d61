//! Pick performance over a date window
//!
//! Settled picks are graded in units:
//!     win  -> units * (decimal - 1)
//!     loss -> -units
//!     push -> 0
//!
//! Picks without a price can still be counted but contribute no profit.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::kelly::{StakeSizer, StakingConfig};
use super::odds::american_to_decimal;
use crate::data::picks::{Pick, PickResult};

/// Aggregate record for picks in a date window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub pending: usize,
    pub units_risked: f64,
    pub units_won: f64,
    pub hit_rate: f64,
    pub roi: f64,
}

/// Profit in units for a settled pick, `None` while pending
pub fn pick_profit(pick: &Pick) -> Option<f64> {
    match pick.result {
        PickResult::Win => {
            let decimal = pick
                .american_odds
                .and_then(|a| american_to_decimal(a).ok())?;
            Some(pick.units * (decimal - 1.0))
        }
        PickResult::Loss => Some(-pick.units),
        PickResult::Push => Some(0.0),
        PickResult::Pending => None,
    }
}

/// Summarize picks dated within `[from, to]` (inclusive)
pub fn summarize_window(picks: &[Pick], from: NaiveDate, to: NaiveDate) -> WindowSummary {
    let in_window: Vec<&Pick> = picks
        .iter()
        .filter(|p| p.date >= from && p.date <= to)
        .collect();

    let mut summary = WindowSummary {
        from: Some(from),
        to: Some(to),
        total: in_window.len(),
        ..WindowSummary::default()
    };

    for pick in in_window {
        match pick.result {
            PickResult::Win => summary.wins += 1,
            PickResult::Loss => summary.losses += 1,
            PickResult::Push => summary.pushes += 1,
            PickResult::Pending => {
                summary.pending += 1;
                continue;
            }
        }

        summary.units_risked += pick.units;
        summary.units_won += pick_profit(pick).unwrap_or(0.0);
    }

    let decided = summary.wins + summary.losses;
    summary.hit_rate = if decided > 0 {
        summary.wins as f64 / decided as f64
    } else {
        0.0
    };
    summary.roi = if summary.units_risked > 0.0 {
        summary.units_won / summary.units_risked
    } else {
        0.0
    };

    summary
}

/// Summarize the `days` most recent days ending on `today` (inclusive)
pub fn recent_window(picks: &[Pick], today: NaiveDate, days: u32) -> WindowSummary {
    let span = i64::from(days.max(1)) - 1;
    summarize_window(picks, today - Duration::days(span), today)
}

/// Pick joined with price-derived metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickEvaluation {
    pub selection: String,
    pub american_odds: f64,
    pub probability: f64,
    pub break_even_prob: f64,
    pub ev_percent: f64,
    pub stake: f64,
}

/// Evaluate a pick that carries both a price and a model probability
pub fn evaluate_pick(pick: &Pick, config: &StakingConfig) -> Option<PickEvaluation> {
    let american = pick.american_odds?;
    let probability = pick.probability?;
    let sizing = StakeSizer::new(*config, 1.0)
        .size(probability, american)
        .ok()?;

    Some(PickEvaluation {
        selection: pick.selection.clone(),
        american_odds: american,
        probability,
        break_even_prob: sizing.break_even_prob,
        ev_percent: sizing.ev_percent,
        stake: sizing.stake,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn pick(day: u32, odds: Option<f64>, result: PickResult, units: f64) -> Pick {
        Pick {
            date: date(day),
            sport: None,
            selection: format!("pick-{}", day),
            american_odds: odds,
            probability: Some(0.55),
            result,
            units,
        }
    }

    fn sample() -> Vec<Pick> {
        vec![
            pick(1, Some(150.0), PickResult::Win, 1.0),   // +1.5
            pick(2, Some(-110.0), PickResult::Loss, 2.0), // -2.0
            pick(3, Some(-120.0), PickResult::Push, 1.0), // 0
            pick(4, Some(-110.0), PickResult::Win, 1.1),  // +1.0
            pick(5, Some(200.0), PickResult::Pending, 1.0),
            pick(20, Some(100.0), PickResult::Win, 1.0),
        ]
    }

    #[test]
    fn test_summarize_window_counts() {
        let summary = summarize_window(&sample(), date(1), date(5));

        assert_eq!(summary.total, 5);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.pushes, 1);
        assert_eq!(summary.pending, 1);
        assert!((summary.units_risked - 5.1).abs() < 1e-9);
        assert!((summary.units_won - 0.5).abs() < 1e-9);
        assert!((summary.hit_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.roi - 0.5 / 5.1).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_window_inclusive_bounds() {
        let summary = summarize_window(&sample(), date(20), date(20));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.wins, 1);
        assert!((summary.units_won - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_window() {
        let summary = summarize_window(&sample(), date(10), date(15));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.hit_rate, 0.0);
        assert_eq!(summary.roi, 0.0);
    }

    #[test]
    fn test_recent_window() {
        let summary = recent_window(&sample(), date(5), 3);
        assert_eq!(summary.from, Some(date(3)));
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_pick_profit_without_price() {
        assert_eq!(pick_profit(&pick(1, None, PickResult::Win, 1.0)), None);
        assert_eq!(pick_profit(&pick(1, None, PickResult::Loss, 1.0)), Some(-1.0));
    }

    #[test]
    fn test_evaluate_pick() {
        let config = StakingConfig::default();
        let eval = evaluate_pick(&pick(1, Some(100.0), PickResult::Pending, 1.0), &config).unwrap();

        assert!((eval.ev_percent - 10.0).abs() < 1e-9);
        assert!((eval.break_even_prob - 0.5).abs() < 1e-9);
        assert_eq!(eval.stake, 20.0);

        assert!(evaluate_pick(&pick(1, None, PickResult::Pending, 1.0), &config).is_none());
    }
}
