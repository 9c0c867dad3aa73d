// Deterministic sample data for integration tests.

#![allow(dead_code)]

use dynasty_baseball::comp_picks::{DepartedFreeAgent, GainedFreeAgent, QualifyingOffer};
use dynasty_baseball::graduation::ProspectLine;
use dynasty_baseball::pythag::GameResult;
use dynasty_baseball::Position;

/// One row of a standings table.
pub struct TeamSeason {
    pub name: &'static str,
    pub wins: u32,
    pub losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl TeamSeason {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}

pub fn standings() -> Vec<TeamSeason> {
    vec![
        TeamSeason { name: "Dodgers", wins: 88, losses: 52, runs_scored: 680, runs_allowed: 530 },
        TeamSeason { name: "Padres", wins: 76, losses: 64, runs_scored: 612, runs_allowed: 598 },
        TeamSeason { name: "Giants", wins: 70, losses: 70, runs_scored: 575, runs_allowed: 590 },
        TeamSeason { name: "Diamondbacks", wins: 66, losses: 74, runs_scored: 640, runs_allowed: 655 },
        TeamSeason { name: "Rockies", wins: 48, losses: 92, runs_scored: 540, runs_allowed: 790 },
    ]
}

/// A game log whose last `n` games each finish `rs`-`ra`, preceded by
/// twenty one-run losses.
pub fn game_log(n: usize, rs: u32, ra: u32) -> Vec<GameResult> {
    let mut log = vec![
        GameResult {
            runs_scored: 2,
            runs_allowed: 3,
        };
        20
    ];
    log.extend(std::iter::repeat(GameResult {
        runs_scored: rs,
        runs_allowed: ra,
    })
    .take(n));
    log
}

pub fn departed(name: &str, overall: u8, offer: QualifyingOffer, signed_with: Option<&str>) -> DepartedFreeAgent {
    DepartedFreeAgent {
        name: name.into(),
        overall,
        qualifying_offer: offer,
        signed_with: signed_with.map(String::from),
    }
}

pub fn offseason_departures() -> Vec<DepartedFreeAgent> {
    vec![
        departed("Marcus Vell", 82, QualifyingOffer::Rejected, Some("BOS")),
        departed("Tony Ruiz", 71, QualifyingOffer::Rejected, Some("SEA")),
        departed("Cal Brandt", 77, QualifyingOffer::Accepted, None),
        departed("Dee Okafor", 68, QualifyingOffer::NotMade, Some("MIL")),
        departed("Sam Hollis", 76, QualifyingOffer::Rejected, Some("ATL")),
        departed("Jo Park", 61, QualifyingOffer::Rejected, Some("KC")),
    ]
}

pub fn signing(name: &str, overall: u8) -> GainedFreeAgent {
    GainedFreeAgent {
        name: name.into(),
        overall,
    }
}

pub fn prospect(position: &str, at_bats: u32, innings_pitched: f64, active_days: u32) -> ProspectLine {
    ProspectLine {
        position: Position::from_str_pos(position).expect("fixture position"),
        at_bats,
        innings_pitched,
        active_days,
    }
}
