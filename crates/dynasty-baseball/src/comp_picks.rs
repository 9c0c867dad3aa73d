// Compensatory draft picks for free agents lost to other clubs.
//
// A departed player returns a pick only when the club made a qualifying
// offer, the player turned it down and signed elsewhere, and his overall
// rating clears the floor. Signing top free agents of your own costs slots.

use dynasty_core::config::CompPickRules;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifyingOffer {
    NotMade,
    Accepted,
    Rejected,
}

/// A free agent who left the club this offseason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartedFreeAgent {
    pub name: String,
    pub overall: u8,
    pub qualifying_offer: QualifyingOffer,
    /// Club the player signed with, `None` while unsigned.
    #[serde(default)]
    pub signed_with: Option<String>,
}

/// A free agent the club signed from elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainedFreeAgent {
    pub name: String,
    pub overall: u8,
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompTier {
    A,
    B,
    C,
    D,
}

impl CompTier {
    /// Where in the draft a pick of this tier lands.
    pub fn pick_label(&self) -> &'static str {
        match self {
            CompTier::A => "Round 1 Supplemental",
            CompTier::B => "Round 2 Supplemental",
            CompTier::C => "Round 3 Supplemental",
            CompTier::D => "After Round 4",
        }
    }
}

impl fmt::Display for CompTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompTier::A => "A",
            CompTier::B => "B",
            CompTier::C => "C",
            CompTier::D => "D",
        };
        f.write_str(s)
    }
}

pub fn comp_tier(overall: u8, rules: &CompPickRules) -> CompTier {
    let bands = [
        (rules.tier_a, CompTier::A),
        (rules.tier_b, CompTier::B),
        (rules.tier_c, CompTier::C),
    ];
    bands
        .iter()
        .find(|(min, _)| overall >= *min)
        .map(|(_, tier)| *tier)
        .unwrap_or(CompTier::D)
}

pub fn qualifies(player: &DepartedFreeAgent, rules: &CompPickRules) -> bool {
    player.qualifying_offer == QualifyingOffer::Rejected
        && player.signed_with.is_some()
        && player.overall >= rules.min_overall
}

/// Comp pick slots left after signing penalties.
pub fn max_comp_picks(gained: &[GainedFreeAgent], rules: &CompPickRules) -> usize {
    let costly = gained
        .iter()
        .filter(|p| p.overall >= rules.costly_signing_overall)
        .count();
    rules.max_picks.saturating_sub(costly)
}

// ---------------------------------------------------------------------------
// Awarded picks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompPick {
    pub tier: CompTier,
    pub reason: String,
    pub player: String,
    pub overall: u8,
    pub pick_label: &'static str,
}

/// Award comp picks, best departed player first, up to the adjusted slot
/// limit. Ties in rating keep input order.
pub fn calculate_comp_picks(
    departed: &[DepartedFreeAgent],
    gained: &[GainedFreeAgent],
    rules: &CompPickRules,
) -> Vec<CompPick> {
    let limit = max_comp_picks(gained, rules);
    if limit < rules.max_picks {
        debug!(
            "comp pick slots reduced from {} to {} by free agent signings",
            rules.max_picks, limit
        );
    }

    let mut qualifying: Vec<&DepartedFreeAgent> =
        departed.iter().filter(|p| qualifies(p, rules)).collect();
    qualifying.sort_by(|a, b| b.overall.cmp(&a.overall));

    qualifying
        .into_iter()
        .take(limit)
        .map(|p| {
            let tier = comp_tier(p.overall, rules);
            let club = p.signed_with.as_deref().unwrap_or_default();
            CompPick {
                tier,
                reason: format!(
                    "{} ({} OVR) declined qualifying offer, signed with {}",
                    p.name, p.overall, club
                ),
                player: p.name.clone(),
                overall: p.overall,
                pick_label: tier.pick_label(),
            }
        })
        .collect()
}
