// Integration tests for the report pipeline, driven by tests/fixtures.

use chrono::{TimeZone, Utc};
use dynasty_app::report::{build_report, Report};
use dynasty_app::snapshot::{load_snapshot, parse_snapshot};
use dynasty_baseball::comp_picks::CompTier;
use dynasty_baseball::fatigue::FatigueZone;
use dynasty_baseball::graduation::GraduationTrigger;
use dynasty_baseball::pythag::Trend;
use dynasty_baseball::service_time::ServiceStatus;
use dynasty_core::config::Config;
use std::path::Path;

const FIXTURES: &str = "tests/fixtures";

fn fixture_report() -> Report {
    let snapshot = load_snapshot(&Path::new(FIXTURES).join("snapshot.json"))
        .expect("fixture snapshot should load");
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    build_report(&snapshot, &Config::default(), at)
}

#[test]
fn team_section() {
    let report = fixture_report();
    let team = report.team.as_ref().expect("fixture team should be reported");
    assert_eq!(team.expected.expected_wins, 86);
    assert_eq!(team.expected.expected_losses, 54);
    assert_eq!(team.luck, 2);
    // The oldest game (-8) falls outside the 10-game window.
    assert_eq!(team.recent_run_differential, 23);
    assert_eq!(team.trend, Trend::Surging);
}

#[test]
fn overflowing_team_record_is_rejected_not_fatal() {
    let snapshot = parse_snapshot(
        r#"{
            "team": {"name": "Broken", "wins": 4294967295, "losses": 1, "runs_scored": 10, "runs_allowed": 5},
            "roster": [{"name": "Eli Marsh", "service_days": 160}]
        }"#,
    )
    .unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    let report = build_report(&snapshot, &Config::default(), at);

    assert!(report.team.is_none());
    assert_eq!(report.service.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].section, "team");
    assert_eq!(report.rejected[0].name, "Broken");
    assert!(report.rejected[0].reason.contains("overflows"));
}

#[test]
fn service_section() {
    let report = fixture_report();
    let rows: Vec<(&str, &str, ServiceStatus, u32, bool)> = report
        .service
        .iter()
        .map(|s| {
            (
                s.name.as_str(),
                s.service_time.as_str(),
                s.status,
                s.days_to_free_agency,
                s.manipulation_risk,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Eli Marsh", "0.160", ServiceStatus::PreArb, 872, true),
            ("Rob Kane", "2.130", ServiceStatus::SuperTwo, 558, false),
            ("Vic Ortega", "6.068", ServiceStatus::FreeAgent, 0, false),
        ]
    );
    let eligible: Vec<bool> = report.service.iter().map(|s| s.arbitration_eligible).collect();
    assert_eq!(eligible, vec![false, true, false]);
}

#[test]
fn comp_pick_section() {
    let report = fixture_report();
    assert_eq!(report.comp_pick_slots, 1);
    assert_eq!(report.comp_picks.len(), 1);
    assert_eq!(report.comp_picks[0].player, "Marcus Vell");
    assert_eq!(report.comp_picks[0].tier, CompTier::A);
}

#[test]
fn prospect_section_rejects_bad_rows() {
    let report = fixture_report();
    assert_eq!(report.prospects.len(), 2);
    assert_eq!(
        report.prospects[0].status.graduated_via,
        Some(GraduationTrigger::ActiveDays)
    );
    assert_eq!(report.prospects[1].status.graduated_via, None);
    assert_eq!(report.prospects[1].status.pct_to_graduation, 62);
    assert!(report.prospects[0].graduated);
    assert!(!report.prospects[1].graduated);

    let rejected: Vec<(&str, &str)> = report
        .rejected
        .iter()
        .map(|r| (r.section, r.name.as_str()))
        .collect();
    assert_eq!(
        rejected,
        vec![("prospects", "Bad Data"), ("outings", "Misconfigured")]
    );
}

#[test]
fn contract_section() {
    let report = fixture_report();
    let contract = &report.contracts[0];
    assert_eq!(contract.player, "Vic Ortega");
    assert_eq!(contract.incentives.earned, 500_000);
    assert_eq!(contract.incentives.total_potential, 1_500_000);
}

#[test]
fn outing_section_honours_overrides() {
    let report = fixture_report();
    assert_eq!(report.outings.len(), 2);

    let starter = &report.outings[0];
    assert_eq!((starter.soft_limit, starter.hard_limit), (100, 115));
    assert_eq!(starter.zone, FatigueZone::Orange);
    assert_eq!(starter.velocity_drop_mph, 2);
    assert_eq!(starter.effectiveness, 59);

    let opener = &report.outings[1];
    assert_eq!((opener.soft_limit, opener.hard_limit), (25, 35));
    assert_eq!(opener.zone, FatigueZone::Red);
    assert_eq!(opener.velocity_drop_mph, 3);
}

#[test]
fn unlock_section() {
    let report = fixture_report();
    assert_eq!(
        report.unlocks.newly_unlocked,
        vec!["extension_desk", "postseason_analytics"]
    );
    assert_eq!(report.unlocks.recent_unlock, Some("postseason_analytics"));
    let trade = report
        .unlocks
        .progress
        .iter()
        .find(|p| p.def.id == "trade_analyzer")
        .unwrap();
    assert_eq!(trade.pct, 80);
    assert!(!trade.unlocked);
}

#[test]
fn report_serializes_to_json() {
    let report = fixture_report();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["generated_at"], "2026-10-01T12:00:00Z");
    assert_eq!(value["team"]["trend"], "surging");
    assert_eq!(value["prospects"][0]["graduated_via"], "days");
    assert_eq!(value["contracts"][0]["earned"], 500_000);
    assert_eq!(value["outings"][0]["zone"], "orange");
    assert_eq!(value["service"][1]["status"], "super_two");
    assert_eq!(value["service"][1]["arbitration_eligible"], true);
    assert_eq!(value["prospects"][0]["graduated"], true);
    assert_eq!(value["outings"][1]["soft_limit"], 25);
}

#[test]
fn contract_stats_accept_lowercase_and_alias_keys() {
    let snapshot = parse_snapshot(
        r#"{
            "team": {"name": "Mets", "wins": 0, "losses": 0, "runs_scored": 0, "runs_allowed": 0},
            "contracts": [{
                "player": "Closer",
                "incentives": [
                    {"stat": "era", "threshold": 3.0, "bonus": 100},
                    {"stat": "SO", "threshold": 50.0, "bonus": 200}
                ],
                "stats": {"era": 2.5, "so": 60.0}
            }]
        }"#,
    )
    .unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    let report = build_report(&snapshot, &Config::default(), at);
    let contract = &report.contracts[0];
    assert_eq!(contract.incentives.earned, 300);
    assert!(contract.incentives.missed.is_empty());
}
