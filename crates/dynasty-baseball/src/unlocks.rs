// Progressive unlocks earned over the life of a dynasty.
//
// A static catalogue of milestones, each keyed by one career counter and a
// target. Evaluation reports every milestone newly reached since the last
// check, in catalogue order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use crate::error::capped_pct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockTrigger {
    Seasons,
    PlayoffAppearances,
    Championships,
    TotalWins,
    AllStars,
    TradesCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnlockDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger: UnlockTrigger,
    /// Counter value at which the unlock fires. Always > 0.
    pub target: u32,
}

/// Every unlock, in evaluation order.
pub const UNLOCKS: &[UnlockDef] = &[
    UnlockDef {
        id: "advanced_scouting",
        name: "Advanced Scouting",
        description: "Full scouting grades on amateur and international prospects",
        trigger: UnlockTrigger::Seasons,
        target: 1,
    },
    UnlockDef {
        id: "trade_analyzer",
        name: "Trade Analyzer",
        description: "Side-by-side surplus value for proposed trades",
        trigger: UnlockTrigger::TradesCompleted,
        target: 5,
    },
    UnlockDef {
        id: "extension_desk",
        name: "Extension Desk",
        description: "Negotiate pre-arbitration extensions",
        trigger: UnlockTrigger::Seasons,
        target: 3,
    },
    UnlockDef {
        id: "postseason_analytics",
        name: "Postseason Analytics",
        description: "Series-level matchup projections",
        trigger: UnlockTrigger::PlayoffAppearances,
        target: 1,
    },
    UnlockDef {
        id: "all_star_scouts",
        name: "All-Star Scouts",
        description: "Hidden potential ratings for your own roster",
        trigger: UnlockTrigger::AllStars,
        target: 5,
    },
    UnlockDef {
        id: "ring_ceremony",
        name: "Ring Ceremony",
        description: "Championship banner and ring for the home ballpark",
        trigger: UnlockTrigger::Championships,
        target: 1,
    },
    UnlockDef {
        id: "five_hundred_wins",
        name: "500 Club",
        description: "Franchise history room in the front office",
        trigger: UnlockTrigger::TotalWins,
        target: 500,
    },
    UnlockDef {
        id: "perennial_contender",
        name: "Perennial Contender",
        description: "Free agents weigh your club's contention window",
        trigger: UnlockTrigger::PlayoffAppearances,
        target: 5,
    },
    UnlockDef {
        id: "trade_market_maker",
        name: "Market Maker",
        description: "Three-team trade proposals",
        trigger: UnlockTrigger::TradesCompleted,
        target: 25,
    },
    UnlockDef {
        id: "decade_in_charge",
        name: "Decade in Charge",
        description: "Custom alternate uniforms",
        trigger: UnlockTrigger::Seasons,
        target: 10,
    },
    UnlockDef {
        id: "star_factory",
        name: "Star Factory",
        description: "Player development staff upgrades",
        trigger: UnlockTrigger::AllStars,
        target: 20,
    },
    UnlockDef {
        id: "dynasty",
        name: "Dynasty",
        description: "Retired-number ceremonies and a statue plaza",
        trigger: UnlockTrigger::Championships,
        target: 3,
    },
    UnlockDef {
        id: "thousand_wins",
        name: "1000 Wins",
        description: "Hall of Fame executive ballot eligibility",
        trigger: UnlockTrigger::TotalWins,
        target: 1000,
    },
];

/// Career counters for a dynasty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynastyProgress {
    pub seasons: u32,
    pub playoff_appearances: u32,
    pub championships: u32,
    pub total_wins: u32,
    pub all_stars: u32,
    pub trades_completed: u32,
}

impl DynastyProgress {
    pub fn value(&self, trigger: UnlockTrigger) -> u32 {
        match trigger {
            UnlockTrigger::Seasons => self.seasons,
            UnlockTrigger::PlayoffAppearances => self.playoff_appearances,
            UnlockTrigger::Championships => self.championships,
            UnlockTrigger::TotalWins => self.total_wins,
            UnlockTrigger::AllStars => self.all_stars,
            UnlockTrigger::TradesCompleted => self.trades_completed,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UnlockCheck {
    /// Ids unlocked before or during this check.
    pub unlocked: BTreeSet<String>,
    /// Definitions reached in this check, catalogue order.
    pub newly_unlocked: Vec<&'static UnlockDef>,
}

impl UnlockCheck {
    /// The last unlock reached in this check, for single-banner displays.
    pub fn recent_unlock(&self) -> Option<&'static UnlockDef> {
        self.newly_unlocked.last().copied()
    }
}

/// Unlock every catalogue entry not already in `already_unlocked` whose
/// counter has reached its target.
pub fn check_unlocks(progress: &DynastyProgress, already_unlocked: &BTreeSet<String>) -> UnlockCheck {
    let mut unlocked = already_unlocked.clone();
    let mut newly_unlocked = Vec::new();

    for def in UNLOCKS {
        if unlocked.contains(def.id) {
            continue;
        }
        if progress.value(def.trigger) >= def.target {
            info!("Unlocked {} ({})", def.name, def.id);
            unlocked.insert(def.id.to_string());
            newly_unlocked.push(def);
        }
    }

    UnlockCheck {
        unlocked,
        newly_unlocked,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockProgress {
    pub def: &'static UnlockDef,
    pub current: u32,
    pub pct: u32,
    pub unlocked: bool,
}

/// Progress for every catalogue entry, unlocked or not.
pub fn unlock_progress(
    progress: &DynastyProgress,
    unlocked: &BTreeSet<String>,
) -> Vec<UnlockProgress> {
    UNLOCKS
        .iter()
        .map(|def| {
            let current = progress.value(def.trigger);
            UnlockProgress {
                def,
                current,
                pct: capped_pct(f64::from(current), f64::from(def.target)),
                unlocked: unlocked.contains(def.id),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn ids(check: &UnlockCheck) -> Vec<&'static str> {
        check.newly_unlocked.iter().map(|d| d.id).collect()
    }

    #[test]
    fn catalogue_ids_unique_and_targets_positive() {
        let mut seen = BTreeSet::new();
        for def in UNLOCKS {
            assert!(seen.insert(def.id), "duplicate id {}", def.id);
            assert!(def.target > 0, "{} has zero target", def.id);
        }
    }

    #[test]
    fn targets_non_decreasing_per_trigger() {
        let mut last: HashMap<UnlockTrigger, u32> = HashMap::new();
        for def in UNLOCKS {
            if let Some(prev) = last.insert(def.trigger, def.target) {
                assert!(def.target >= prev, "{} target below earlier entry", def.id);
            }
        }
    }

    #[test]
    fn fresh_dynasty_unlocks_nothing() {
        let check = check_unlocks(&DynastyProgress::default(), &BTreeSet::new());
        assert!(check.newly_unlocked.is_empty());
        assert!(check.recent_unlock().is_none());
    }

    #[test]
    fn simultaneous_unlocks_all_reported() {
        let progress = DynastyProgress {
            seasons: 3,
            playoff_appearances: 1,
            ..Default::default()
        };
        let check = check_unlocks(&progress, &BTreeSet::new());
        assert_eq!(
            ids(&check),
            vec!["advanced_scouting", "extension_desk", "postseason_analytics"]
        );
        assert_eq!(check.recent_unlock().map(|d| d.id), Some("postseason_analytics"));
        assert_eq!(check.unlocked.len(), 3);
    }

    #[test]
    fn already_unlocked_not_reported_again() {
        let progress = DynastyProgress {
            seasons: 3,
            ..Default::default()
        };
        let first = check_unlocks(&progress, &BTreeSet::new());
        let second = check_unlocks(&progress, &first.unlocked);
        assert!(second.newly_unlocked.is_empty());
        assert_eq!(second.unlocked, first.unlocked);
    }

    #[test]
    fn progress_for_every_definition() {
        let progress = DynastyProgress {
            total_wins: 250,
            trades_completed: 30,
            ..Default::default()
        };
        let unlocked: BTreeSet<String> = ["trade_analyzer".to_string()].into_iter().collect();
        let rows = unlock_progress(&progress, &unlocked);
        assert_eq!(rows.len(), UNLOCKS.len());

        let by_id = |id: &str| rows.iter().find(|r| r.def.id == id).unwrap();
        assert_eq!(by_id("five_hundred_wins").pct, 50);
        assert_eq!(by_id("thousand_wins").pct, 25);
        assert_eq!(by_id("trade_market_maker").pct, 100);
        assert!(!by_id("trade_market_maker").unlocked);
        assert!(by_id("trade_analyzer").unlocked);
        assert_eq!(by_id("dynasty").pct, 0);
    }

    proptest! {
        #[test]
        fn prop_unlock_matches_progress(
            seasons in 0u32..15,
            playoffs in 0u32..8,
            titles in 0u32..5,
            wins in 0u32..1500,
            all_stars in 0u32..30,
            trades in 0u32..40,
        ) {
            let progress = DynastyProgress {
                seasons,
                playoff_appearances: playoffs,
                championships: titles,
                total_wins: wins,
                all_stars,
                trades_completed: trades,
            };
            let check = check_unlocks(&progress, &BTreeSet::new());
            let rows = unlock_progress(&progress, &check.unlocked);
            for row in rows {
                if row.unlocked {
                    prop_assert_eq!(row.pct, 100);
                } else {
                    prop_assert!(row.current < row.def.target);
                }
            }
        }
    }
}
