// Season report: runs every calculator over a snapshot.
//
// Entries a calculator rejects are left out of their section and listed
// under `rejected`; one bad row never sinks the whole report.

use std::fmt;

use chrono::{DateTime, Utc};
use dynasty_baseball::comp_picks::{calculate_comp_picks, max_comp_picks, CompPick};
use dynasty_baseball::fatigue::{
    effectiveness, fatigue_zone, velocity_drop, FatigueZone, PitchLimits,
};
use dynasty_baseball::graduation::{check_graduation, GraduationStatus};
use dynasty_baseball::incentives::{check_incentives, IncentiveReport};
use dynasty_baseball::pythag::{
    calc_pythag, luck_factor, rolling_run_differential, PythagRecord, Trend,
};
use dynasty_baseball::service_time::{
    calc_service_time, days_to_free_agency, manipulation_risk, service_status, ServiceStatus,
};
use dynasty_baseball::unlocks::{check_unlocks, unlock_progress, UnlockProgress};
use dynasty_baseball::{MetricsError, Position};
use dynasty_core::config::Config;
use serde::Serialize;
use tracing::{info, warn};

use crate::snapshot::{PitcherOuting, Snapshot, TeamSeason};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// `None` when the team row itself was rejected.
    pub team: Option<TeamReport>,
    pub service: Vec<ServiceReport>,
    pub comp_pick_slots: usize,
    pub comp_picks: Vec<CompPick>,
    pub prospects: Vec<ProspectReport>,
    pub contracts: Vec<ContractReport>,
    pub outings: Vec<OutingReport>,
    pub unlocks: UnlocksReport,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub expected: PythagRecord,
    pub luck: i64,
    pub recent_run_differential: i64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    pub name: String,
    /// `Y.DDD` notation.
    pub service_time: String,
    pub status: ServiceStatus,
    pub arbitration_eligible: bool,
    pub days_to_free_agency: u32,
    pub manipulation_risk: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProspectReport {
    pub name: String,
    pub position: Position,
    pub graduated: bool,
    #[serde(flatten)]
    pub status: GraduationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractReport {
    pub player: String,
    #[serde(flatten)]
    pub incentives: IncentiveReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutingReport {
    pub pitcher: String,
    pub pitch_count: u32,
    pub soft_limit: u32,
    pub hard_limit: u32,
    pub zone: FatigueZone,
    pub velocity_drop_mph: u8,
    pub effectiveness: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnlocksReport {
    pub newly_unlocked: Vec<&'static str>,
    pub recent_unlock: Option<&'static str>,
    pub progress: Vec<UnlockProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub section: &'static str,
    pub name: String,
    pub reason: String,
}

fn reject(
    rejected: &mut Vec<Rejection>,
    section: &'static str,
    name: &str,
    reason: impl fmt::Display,
) {
    warn!("skipping {section} entry '{name}': {reason}");
    rejected.push(Rejection {
        section,
        name: name.to_string(),
        reason: reason.to_string(),
    });
}

fn team_report(team: &TeamSeason, config: &Config) -> Result<TeamReport, String> {
    let games = team.games().ok_or_else(|| {
        format!(
            "wins ({}) + losses ({}) overflows the games count",
            team.wins, team.losses
        )
    })?;
    let expected = calc_pythag(team.runs_scored, team.runs_allowed, games, &config.pythag);
    let recent_run_differential =
        rolling_run_differential(&team.recent_games, config.pythag.trend_window);
    Ok(TeamReport {
        name: team.name.clone(),
        wins: team.wins,
        losses: team.losses,
        expected,
        luck: luck_factor(team.wins, &expected),
        recent_run_differential,
        trend: Trend::from_run_differential(recent_run_differential),
    })
}

fn outing_limits(outing: &PitcherOuting, config: &Config) -> Result<PitchLimits, MetricsError> {
    PitchLimits::new(
        outing.soft_limit.unwrap_or(config.fatigue.soft_limit),
        outing.hard_limit.unwrap_or(config.fatigue.hard_limit),
    )
}

/// Compute the full report. `generated_at` is passed in so reports are
/// reproducible.
pub fn build_report(snapshot: &Snapshot, config: &Config, generated_at: DateTime<Utc>) -> Report {
    let mut rejected = Vec::new();

    // --- Team ---
    let team = &snapshot.team;
    let team_report = match team_report(team, config) {
        Ok(report) => Some(report),
        Err(reason) => {
            reject(&mut rejected, "team", &team.name, reason);
            None
        }
    };

    // --- Service time ---
    let st = &config.service_time;
    let service = snapshot
        .roster
        .iter()
        .map(|p| {
            let status = service_status(p.service_days, p.super_two, st);
            ServiceReport {
                name: p.name.clone(),
                service_time: calc_service_time(p.service_days, st).to_string(),
                status,
                arbitration_eligible: status.is_arbitration(),
                days_to_free_agency: days_to_free_agency(p.service_days, st),
                manipulation_risk: manipulation_risk(p.season_days, p.service_days, st),
            }
        })
        .collect();

    // --- Compensatory picks ---
    let comp_pick_slots = max_comp_picks(&snapshot.gained_free_agents, &config.comp_picks);
    let comp_picks = calculate_comp_picks(
        &snapshot.departed_free_agents,
        &snapshot.gained_free_agents,
        &config.comp_picks,
    );

    // --- Prospects ---
    let mut prospects = Vec::new();
    for prospect in &snapshot.prospects {
        match check_graduation(&prospect.line, &config.graduation) {
            Ok(status) => prospects.push(ProspectReport {
                name: prospect.name.clone(),
                position: prospect.line.position,
                graduated: status.is_graduated(),
                status,
            }),
            Err(e) => reject(&mut rejected, "prospects", &prospect.name, e),
        }
    }

    // --- Incentives ---
    let mut contracts = Vec::new();
    for contract in &snapshot.contracts {
        match check_incentives(&contract.incentives, &contract.stats) {
            Ok(incentives) => contracts.push(ContractReport {
                player: contract.player.clone(),
                incentives,
            }),
            Err(e) => reject(&mut rejected, "contracts", &contract.player, e),
        }
    }

    // --- Pitch counts ---
    let mut outings = Vec::new();
    for outing in &snapshot.outings {
        match outing_limits(outing, config) {
            Ok(limits) => outings.push(OutingReport {
                pitcher: outing.pitcher.clone(),
                pitch_count: outing.pitch_count,
                soft_limit: limits.soft(),
                hard_limit: limits.hard(),
                zone: fatigue_zone(outing.pitch_count, &limits),
                velocity_drop_mph: velocity_drop(outing.pitch_count, &limits),
                effectiveness: effectiveness(
                    outing.pitch_count,
                    &limits,
                    outing.times_through_order,
                ),
            }),
            Err(e) => reject(&mut rejected, "outings", &outing.pitcher, e),
        }
    }

    // --- Unlocks ---
    let check = check_unlocks(&snapshot.dynasty, &snapshot.unlocked);
    let unlocks = UnlocksReport {
        newly_unlocked: check.newly_unlocked.iter().map(|d| d.id).collect(),
        recent_unlock: check.recent_unlock().map(|d| d.id),
        progress: unlock_progress(&snapshot.dynasty, &check.unlocked),
    };

    info!(
        "Report for {}: {} players, {} comp picks, {} prospects, {} contracts, {} outings, {} new unlocks, {} rejected",
        team.name,
        snapshot.roster.len(),
        comp_picks.len(),
        prospects.len(),
        contracts.len(),
        outings.len(),
        unlocks.newly_unlocked.len(),
        rejected.len()
    );

    Report {
        generated_at,
        team: team_report,
        service,
        comp_pick_slots,
        comp_picks,
        prospects,
        contracts,
        outings,
        unlocks,
        rejected,
    }
}
