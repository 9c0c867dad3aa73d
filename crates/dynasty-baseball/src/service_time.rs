// Service-time accrual, arbitration status and free-agency countdown.

use dynasty_core::config::ServiceTimeRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accrued service split into full seasons and leftover days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceTime {
    pub years: u32,
    pub days: u32,
}

impl ServiceTime {
    /// Recombined day count, or `None` if it does not fit a `u32`.
    pub fn total_days(&self, rules: &ServiceTimeRules) -> Option<u32> {
        self.years
            .checked_mul(rules.days_per_season)?
            .checked_add(self.days)
    }
}

/// Conventional `Y.DDD` notation, e.g. `3.045`.
impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.years, self.days)
    }
}

pub fn calc_service_time(total_days: u32, rules: &ServiceTimeRules) -> ServiceTime {
    ServiceTime {
        years: total_days / rules.days_per_season,
        days: total_days % rules.days_per_season,
    }
}

/// Days remaining until free agency, zero once eligible.
pub fn days_to_free_agency(total_days: u32, rules: &ServiceTimeRules) -> u32 {
    rules.free_agency_days().saturating_sub(total_days)
}

// ---------------------------------------------------------------------------
// Contract status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    PreArb,
    SuperTwo,
    Arb1,
    Arb2,
    Arb3,
    FreeAgent,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::PreArb => "Pre-Arb",
            ServiceStatus::SuperTwo => "Super Two",
            ServiceStatus::Arb1 => "Arb 1",
            ServiceStatus::Arb2 => "Arb 2",
            ServiceStatus::Arb3 => "Arb 3",
            ServiceStatus::FreeAgent => "Free Agent",
        }
    }

    /// Whether the player's salary is set through arbitration.
    pub fn is_arbitration(&self) -> bool {
        matches!(
            self,
            ServiceStatus::SuperTwo | ServiceStatus::Arb1 | ServiceStatus::Arb2 | ServiceStatus::Arb3
        )
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a player's contract status from full years of service.
///
/// The arbitration years are the last three before free agency, and Super
/// Two applies only in the year just before them; all of it counts back
/// from `free_agency_years`.
pub fn service_status(total_days: u32, super_two: bool, rules: &ServiceTimeRules) -> ServiceStatus {
    let years = calc_service_time(total_days, rules).years;
    if years >= rules.free_agency_years {
        return ServiceStatus::FreeAgent;
    }
    match rules.free_agency_years - years {
        1 => ServiceStatus::Arb3,
        2 => ServiceStatus::Arb2,
        3 => ServiceStatus::Arb1,
        4 if super_two => ServiceStatus::SuperTwo,
        _ => ServiceStatus::PreArb,
    }
}

/// Flag a young player whose season accrual sits just under a full year,
/// the pattern left by a club holding him down to delay free agency.
pub fn manipulation_risk(season_days: u32, total_days: u32, rules: &ServiceTimeRules) -> bool {
    let window = rules.manipulation_min_days..=rules.manipulation_max_days;
    window.contains(&season_days)
        && calc_service_time(total_days, rules).years < rules.manipulation_max_years
}
