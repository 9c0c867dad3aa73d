// Contract incentive evaluation.
//
// Each incentive pays a bonus once a season stat reaches its threshold.
// Counting stats must reach the threshold from below; ERA must stay at or
// under it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{capped_pct, ensure_non_negative, ensure_positive, MetricsError};

// ---------------------------------------------------------------------------
// Stats and comparison direction
// ---------------------------------------------------------------------------

/// Serialized by scorebook abbreviation. Parsing is case-insensitive and
/// accepts the aliases `from_str_stat` knows (`SO`, `BA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum IncentiveStat {
    #[serde(rename = "ERA")]
    Era,
    #[serde(rename = "W")]
    Wins,
    #[serde(rename = "K")]
    Strikeouts,
    #[serde(rename = "SV")]
    Saves,
    #[serde(rename = "IP")]
    InningsPitched,
    #[serde(rename = "GS")]
    GamesStarted,
    #[serde(rename = "HR")]
    HomeRuns,
    #[serde(rename = "RBI")]
    RunsBattedIn,
    #[serde(rename = "AVG")]
    BattingAverage,
    #[serde(rename = "PA")]
    PlateAppearances,
    #[serde(rename = "G")]
    GamesPlayed,
}

/// Which side of the threshold earns the bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
}

impl IncentiveStat {
    pub fn from_str_stat(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ERA" => Some(IncentiveStat::Era),
            "W" => Some(IncentiveStat::Wins),
            "K" | "SO" => Some(IncentiveStat::Strikeouts),
            "SV" => Some(IncentiveStat::Saves),
            "IP" => Some(IncentiveStat::InningsPitched),
            "GS" => Some(IncentiveStat::GamesStarted),
            "HR" => Some(IncentiveStat::HomeRuns),
            "RBI" => Some(IncentiveStat::RunsBattedIn),
            "AVG" | "BA" => Some(IncentiveStat::BattingAverage),
            "PA" => Some(IncentiveStat::PlateAppearances),
            "G" => Some(IncentiveStat::GamesPlayed),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            IncentiveStat::Era => "ERA",
            IncentiveStat::Wins => "W",
            IncentiveStat::Strikeouts => "K",
            IncentiveStat::Saves => "SV",
            IncentiveStat::InningsPitched => "IP",
            IncentiveStat::GamesStarted => "GS",
            IncentiveStat::HomeRuns => "HR",
            IncentiveStat::RunsBattedIn => "RBI",
            IncentiveStat::BattingAverage => "AVG",
            IncentiveStat::PlateAppearances => "PA",
            IncentiveStat::GamesPlayed => "G",
        }
    }

    /// Lower is better only for ERA.
    pub fn comparison(&self) -> Comparison {
        match self {
            IncentiveStat::Era => Comparison::AtMost,
            _ => Comparison::AtLeast,
        }
    }
}

impl TryFrom<String> for IncentiveStat {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        IncentiveStat::from_str_stat(&s).ok_or_else(|| format!("unknown incentive stat '{s}'"))
    }
}

impl fmt::Display for IncentiveStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

impl Comparison {
    /// Whether `current` earns the bonus. A zero in an at-most stat means
    /// the stat was never recorded, which does not count.
    pub fn is_met(&self, current: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => current >= threshold,
            Comparison::AtMost => current > 0.0 && current <= threshold,
        }
    }

    /// Progress toward the threshold, 0-100. For at-most stats the ratio is
    /// inverted so that beating the target reads as 100.
    pub fn pct_complete(&self, current: f64, threshold: f64) -> u32 {
        match self {
            Comparison::AtLeast => capped_pct(current, threshold),
            Comparison::AtMost if current > 0.0 => capped_pct(threshold, current),
            Comparison::AtMost => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    pub stat: IncentiveStat,
    pub threshold: f64,
    /// Bonus in whole dollars.
    pub bonus: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveProgress {
    pub incentive: Incentive,
    pub current: f64,
    pub hit: bool,
    pub pct_complete: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncentiveReport {
    pub hit: Vec<IncentiveProgress>,
    pub missed: Vec<IncentiveProgress>,
    /// Bonus dollars earned so far.
    pub earned: u64,
    /// Sum of every bonus, earned or not.
    pub total_potential: u64,
}

pub fn evaluate_incentive(
    incentive: &Incentive,
    stats: &HashMap<IncentiveStat, f64>,
) -> Result<IncentiveProgress, MetricsError> {
    let threshold = ensure_positive("threshold", incentive.threshold)?;
    let current = ensure_non_negative(
        incentive.stat.display_str(),
        stats.get(&incentive.stat).copied().unwrap_or(0.0),
    )?;
    let comparison = incentive.stat.comparison();

    Ok(IncentiveProgress {
        incentive: incentive.clone(),
        current,
        hit: comparison.is_met(current, threshold),
        pct_complete: comparison.pct_complete(current, threshold),
    })
}

fn add_bonus(total: u64, bonus: u64) -> Result<u64, MetricsError> {
    total.checked_add(bonus).ok_or_else(|| {
        MetricsError::invalid("bonus", format!("total of {total} + {bonus} overflows u64"))
    })
}

/// Split incentives into hit and missed (input order kept within each),
/// totalling earned and potential bonus money. Stats missing from the map
/// count as zero.
pub fn check_incentives(
    incentives: &[Incentive],
    stats: &HashMap<IncentiveStat, f64>,
) -> Result<IncentiveReport, MetricsError> {
    let mut report = IncentiveReport::default();
    for incentive in incentives {
        let progress = evaluate_incentive(incentive, stats)?;
        report.total_potential = add_bonus(report.total_potential, incentive.bonus)?;
        if progress.hit {
            report.earned = add_bonus(report.earned, incentive.bonus)?;
            report.hit.push(progress);
        } else {
            report.missed.push(progress);
        }
    }
    Ok(report)
}
