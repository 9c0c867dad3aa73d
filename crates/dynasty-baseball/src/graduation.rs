// Prospect graduation (loss of rookie status).
//
// A prospect graduates on reaching ANY of: the at-bat threshold (hitters),
// the innings threshold (pitchers), or the active-roster day threshold
// (everyone). Progress is the best of the applicable percentages, not a sum.

use dynasty_core::config::GraduationRules;
use serde::{Deserialize, Serialize};

use crate::error::{capped_pct, ensure_non_negative, MetricsError};
use crate::position::Position;

/// Big-league playing time accrued by a prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectLine {
    pub position: Position,
    #[serde(default)]
    pub at_bats: u32,
    #[serde(default)]
    pub innings_pitched: f64,
    #[serde(default)]
    pub active_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraduationTrigger {
    #[serde(rename = "ab")]
    AtBats,
    #[serde(rename = "ip")]
    InningsPitched,
    #[serde(rename = "days")]
    ActiveDays,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraduationStatus {
    pub graduated_via: Option<GraduationTrigger>,
    pub pct_to_graduation: u32,
    /// At-bats (hitters) or innings (pitchers) still needed; zero once met.
    pub playing_time_remaining: f64,
    pub days_remaining: u32,
}

impl GraduationStatus {
    pub fn is_graduated(&self) -> bool {
        self.graduated_via.is_some()
    }
}

fn validated_innings(line: &ProspectLine) -> Result<f64, MetricsError> {
    ensure_non_negative("innings_pitched", line.innings_pitched)
}

/// Percent of the way to graduation: the largest applicable percentage,
/// capped at 100.
pub fn graduation_pct(line: &ProspectLine, rules: &GraduationRules) -> Result<u32, MetricsError> {
    let innings = validated_innings(line)?;
    let playing_time_pct = if line.position.is_pitcher() {
        capped_pct(innings, rules.innings_pitched)
    } else {
        capped_pct(f64::from(line.at_bats), f64::from(rules.at_bats))
    };
    let days_pct = capped_pct(f64::from(line.active_days), f64::from(rules.active_days));
    Ok(playing_time_pct.max(days_pct))
}

/// Which threshold (if any) the prospect has crossed.
///
/// Checked in order at-bats, innings, days; first match wins.
pub fn check_graduation(
    line: &ProspectLine,
    rules: &GraduationRules,
) -> Result<GraduationStatus, MetricsError> {
    let innings = validated_innings(line)?;
    let pitcher = line.position.is_pitcher();

    let graduated_via = if !pitcher && line.at_bats >= rules.at_bats {
        Some(GraduationTrigger::AtBats)
    } else if pitcher && innings >= rules.innings_pitched {
        Some(GraduationTrigger::InningsPitched)
    } else if line.active_days >= rules.active_days {
        Some(GraduationTrigger::ActiveDays)
    } else {
        None
    };

    let playing_time_remaining = if pitcher {
        (rules.innings_pitched - innings).max(0.0)
    } else {
        f64::from(rules.at_bats.saturating_sub(line.at_bats))
    };

    Ok(GraduationStatus {
        graduated_via,
        pct_to_graduation: graduation_pct(line, rules)?,
        playing_time_remaining,
        days_remaining: rules.active_days.saturating_sub(line.active_days),
    })
}
