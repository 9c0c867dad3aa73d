// Season snapshot: the JSON input the report is computed from.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use dynasty_baseball::comp_picks::{DepartedFreeAgent, GainedFreeAgent};
use dynasty_baseball::graduation::ProspectLine;
use dynasty_baseball::incentives::{Incentive, IncentiveStat};
use dynasty_baseball::pythag::GameResult;
use dynasty_baseball::unlocks::DynastyProgress;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub team: TeamSeason,
    #[serde(default)]
    pub roster: Vec<RosterPlayer>,
    #[serde(default)]
    pub departed_free_agents: Vec<DepartedFreeAgent>,
    #[serde(default)]
    pub gained_free_agents: Vec<GainedFreeAgent>,
    #[serde(default)]
    pub prospects: Vec<Prospect>,
    #[serde(default)]
    pub contracts: Vec<IncentiveContract>,
    #[serde(default)]
    pub outings: Vec<PitcherOuting>,
    #[serde(default)]
    pub dynasty: DynastyProgress,
    /// Unlock ids earned in earlier sessions.
    #[serde(default)]
    pub unlocked: BTreeSet<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSeason {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    /// Chronological game log, oldest first.
    #[serde(default)]
    pub recent_games: Vec<GameResult>,
}

impl TeamSeason {
    /// Games played, or `None` when wins + losses does not fit a `u32`.
    pub fn games(&self) -> Option<u32> {
        self.wins.checked_add(self.losses)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterPlayer {
    pub name: String,
    /// Career service days.
    pub service_days: u32,
    /// Service days accrued in the current season.
    #[serde(default)]
    pub season_days: u32,
    #[serde(default)]
    pub super_two: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prospect {
    pub name: String,
    #[serde(flatten)]
    pub line: ProspectLine,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncentiveContract {
    pub player: String,
    pub incentives: Vec<Incentive>,
    #[serde(default)]
    pub stats: HashMap<IncentiveStat, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PitcherOuting {
    pub pitcher: String,
    pub pitch_count: u32,
    #[serde(default = "first_time_through")]
    pub times_through_order: u8,
    /// Per-outing override of the configured soft limit.
    #[serde(default)]
    pub soft_limit: Option<u32>,
    #[serde(default)]
    pub hard_limit: Option<u32>,
}

fn first_time_through() -> u8 {
    1
}

pub fn parse_snapshot(text: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: display.clone(),
        source: e,
    })?;
    parse_snapshot(&text).map_err(|e| SnapshotError::Json {
        path: display,
        source: e,
    })
}
