// Pythagorean win expectancy and run-differential trend.
//
// Expected winning percentage = RS^x / (RS^x + RA^x). The gap between actual
// and expected wins is reported as the team's "luck".

use dynasty_core::config::PythagRules;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Win percentage used when a team has neither scored nor allowed a run.
pub const NO_RUNS_WIN_PCT: f64 = 0.5;

// ---------------------------------------------------------------------------
// Expected record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PythagRecord {
    pub win_pct: f64,
    pub expected_wins: u32,
    pub expected_losses: u32,
}

/// Expected winning percentage for the given run totals.
///
/// RS = RA = 0 has no defined ratio; it returns `NO_RUNS_WIN_PCT`.
///
/// Evaluated as `1 / (1 + (RA/RS)^x)` so large exponents saturate toward
/// 0 or 1 instead of overflowing both powers to infinity.
pub fn pythag_win_pct(runs_scored: u32, runs_allowed: u32, exponent: f64) -> f64 {
    match (runs_scored, runs_allowed) {
        (0, 0) => {
            debug!("no runs scored or allowed, using {NO_RUNS_WIN_PCT} win pct");
            NO_RUNS_WIN_PCT
        }
        (0, _) => 0.0,
        (rs, ra) => {
            let ratio = (f64::from(ra) / f64::from(rs)).powf(exponent);
            1.0 / (1.0 + ratio)
        }
    }
}

/// Expected wins and losses over `games` games.
///
/// Expected wins are rounded to the nearest game; losses are the remainder,
/// so the two always sum to `games`.
pub fn calc_pythag(
    runs_scored: u32,
    runs_allowed: u32,
    games: u32,
    rules: &PythagRules,
) -> PythagRecord {
    let win_pct = pythag_win_pct(runs_scored, runs_allowed, rules.exponent);
    let expected_wins = ((win_pct * f64::from(games)).round() as u32).min(games);
    PythagRecord {
        win_pct,
        expected_wins,
        expected_losses: games - expected_wins,
    }
}

/// Actual wins minus expected wins. Positive means the team has won more
/// than its run differential suggests.
pub fn luck_factor(actual_wins: u32, record: &PythagRecord) -> i64 {
    i64::from(actual_wins) - i64::from(record.expected_wins)
}

// ---------------------------------------------------------------------------
// Trend over recent games
// ---------------------------------------------------------------------------

/// Runs for and against in a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl GameResult {
    pub fn differential(&self) -> i64 {
        i64::from(self.runs_scored) - i64::from(self.runs_allowed)
    }
}

/// Sum of run differential over the last `window` games (all games when the
/// season is shorter than the window). `results` is in chronological order.
pub fn rolling_run_differential(results: &[GameResult], window: usize) -> i64 {
    let start = results.len().saturating_sub(window);
    results[start..].iter().map(GameResult::differential).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Surging,
    Hot,
    Steady,
    Cold,
    Slumping,
}

/// Lower bound (inclusive) of each band, best first. Anything below the last
/// bound is `Slumping`.
pub const TREND_BANDS: &[(i64, Trend)] = &[
    (15, Trend::Surging),
    (5, Trend::Hot),
    (-4, Trend::Steady),
    (-14, Trend::Cold),
];

impl Trend {
    pub fn from_run_differential(differential: i64) -> Self {
        TREND_BANDS
            .iter()
            .find(|(min, _)| differential >= *min)
            .map(|(_, trend)| *trend)
            .unwrap_or(Trend::Slumping)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Surging => "Surging",
            Trend::Hot => "Hot",
            Trend::Steady => "Steady",
            Trend::Cold => "Cold",
            Trend::Slumping => "Slumping",
        }
    }
}

/// Classify a team's recent form from its game log.
pub fn recent_trend(results: &[GameResult], rules: &PythagRules) -> Trend {
    Trend::from_run_differential(rolling_run_differential(results, rules.trend_window))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
