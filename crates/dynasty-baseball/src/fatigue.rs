// Pitch-count fatigue: zone, effectiveness and velocity loss.

use dynasty_core::config::FatigueRules;
use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// Effectiveness of a fresh pitcher.
pub const BASE_EFFECTIVENESS: f64 = 100.0;
/// Most effectiveness fatigue alone can remove (reached at the soft limit).
pub const MAX_FATIGUE_PENALTY: f64 = 30.0;
pub const MIN_EFFECTIVENESS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueZone {
    Green,
    Yellow,
    Orange,
    Red,
    Danger,
}

impl FatigueZone {
    pub fn label(&self) -> &'static str {
        match self {
            FatigueZone::Green => "green",
            FatigueZone::Yellow => "yellow",
            FatigueZone::Orange => "orange",
            FatigueZone::Red => "red",
            FatigueZone::Danger => "danger",
        }
    }
}

struct Breakpoint {
    min_pct: f64,
    zone: FatigueZone,
    velocity_drop_mph: u8,
}

/// Fraction-of-soft-limit breakpoints, highest first. Shared by the zone
/// and velocity lookups so they cannot drift apart.
const BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint {
        min_pct: 1.0,
        zone: FatigueZone::Red,
        velocity_drop_mph: 3,
    },
    Breakpoint {
        min_pct: 0.85,
        zone: FatigueZone::Orange,
        velocity_drop_mph: 2,
    },
    Breakpoint {
        min_pct: 0.65,
        zone: FatigueZone::Yellow,
        velocity_drop_mph: 1,
    },
];

fn breakpoint_for(pct: f64) -> Option<&'static Breakpoint> {
    BREAKPOINTS.iter().find(|b| pct >= b.min_pct)
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Soft and hard pitch limits for one outing. The soft limit is always
/// positive and never above the hard limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchLimits {
    soft: u32,
    hard: u32,
}

impl PitchLimits {
    pub fn new(soft: u32, hard: u32) -> Result<Self, MetricsError> {
        if soft == 0 {
            return Err(MetricsError::invalid("soft_limit", "must be > 0"));
        }
        if hard < soft {
            return Err(MetricsError::invalid(
                "hard_limit",
                format!("must be >= soft limit ({soft}), got {hard}"),
            ));
        }
        Ok(PitchLimits { soft, hard })
    }

    pub fn from_rules(rules: &FatigueRules) -> Result<Self, MetricsError> {
        PitchLimits::new(rules.soft_limit, rules.hard_limit)
    }

    pub fn soft(&self) -> u32 {
        self.soft
    }

    pub fn hard(&self) -> u32 {
        self.hard
    }

    /// Pitch count as a fraction of the soft limit.
    pub fn pct_of_soft(&self, pitch_count: u32) -> f64 {
        f64::from(pitch_count) / f64::from(self.soft)
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn fatigue_zone(pitch_count: u32, limits: &PitchLimits) -> FatigueZone {
    if pitch_count >= limits.hard {
        return FatigueZone::Danger;
    }
    breakpoint_for(limits.pct_of_soft(pitch_count))
        .map(|b| b.zone)
        .unwrap_or(FatigueZone::Green)
}

/// Expected fastball velocity loss in whole mph.
pub fn velocity_drop(pitch_count: u32, limits: &PitchLimits) -> u8 {
    breakpoint_for(limits.pct_of_soft(pitch_count))
        .map(|b| b.velocity_drop_mph)
        .unwrap_or(0)
}

/// Penalty for facing the lineup again (`times_through` is 1-based).
pub fn times_through_order_penalty(times_through: u8) -> f64 {
    match times_through {
        0 | 1 => 0.0,
        2 => 5.0,
        _ => 15.0,
    }
}

/// Effectiveness score, `MIN_EFFECTIVENESS`..=100.
pub fn effectiveness(pitch_count: u32, limits: &PitchLimits, times_through: u8) -> u32 {
    let fatigue = limits.pct_of_soft(pitch_count).min(1.0) * MAX_FATIGUE_PENALTY;
    let score = BASE_EFFECTIVENESS - fatigue - times_through_order_penalty(times_through);
    (score.round().max(0.0) as u32).max(MIN_EFFECTIVENESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn limits() -> PitchLimits {
        PitchLimits::new(100, 115).unwrap()
    }

    #[test]
    fn zone_scenarios() {
        assert_eq!(fatigue_zone(100, &limits()), FatigueZone::Red);
        assert_eq!(fatigue_zone(115, &limits()), FatigueZone::Danger);
        assert_eq!(fatigue_zone(50, &limits()), FatigueZone::Green);
    }

    #[test]
    fn zone_breakpoints() {
        assert_eq!(fatigue_zone(64, &limits()), FatigueZone::Green);
        assert_eq!(fatigue_zone(65, &limits()), FatigueZone::Yellow);
        assert_eq!(fatigue_zone(84, &limits()), FatigueZone::Yellow);
        assert_eq!(fatigue_zone(85, &limits()), FatigueZone::Orange);
        assert_eq!(fatigue_zone(99, &limits()), FatigueZone::Orange);
        assert_eq!(fatigue_zone(114, &limits()), FatigueZone::Red);
    }

    #[test]
    fn velocity_follows_zone_breakpoints() {
        assert_eq!(velocity_drop(40, &limits()), 0);
        assert_eq!(velocity_drop(65, &limits()), 1);
        assert_eq!(velocity_drop(85, &limits()), 2);
        assert_eq!(velocity_drop(100, &limits()), 3);
        assert_eq!(velocity_drop(130, &limits()), 3);
    }

    #[test]
    fn effectiveness_components() {
        assert_eq!(effectiveness(0, &limits(), 1), 100);
        assert_eq!(effectiveness(50, &limits(), 1), 85);
        assert_eq!(effectiveness(50, &limits(), 2), 80);
        assert_eq!(effectiveness(100, &limits(), 3), 55);
        // fatigue stops growing past the soft limit
        assert_eq!(effectiveness(140, &limits(), 3), 55);
    }

    #[test]
    fn effectiveness_floor() {
        let tiny = PitchLimits::new(1, 1).unwrap();
        assert!(effectiveness(500, &tiny, 4) >= MIN_EFFECTIVENESS);
    }

    #[test]
    fn limits_validation() {
        assert!(PitchLimits::new(0, 10).is_err());
        assert!(PitchLimits::new(100, 90).is_err());
        assert!(PitchLimits::new(100, 100).is_ok());
        assert_eq!(
            PitchLimits::from_rules(&FatigueRules::default()).unwrap(),
            limits()
        );
    }

    #[test]
    fn breakpoints_strictly_descending() {
        for pair in BREAKPOINTS.windows(2) {
            assert!(pair[0].min_pct > pair[1].min_pct);
            assert!(pair[0].zone > pair[1].zone);
            assert!(pair[0].velocity_drop_mph > pair[1].velocity_drop_mph);
        }
    }

    proptest! {
        #[test]
        fn prop_zone_and_velocity_never_improve(pitches in 0u32..200) {
            let l = limits();
            prop_assert!(fatigue_zone(pitches + 1, &l) >= fatigue_zone(pitches, &l));
            prop_assert!(velocity_drop(pitches + 1, &l) >= velocity_drop(pitches, &l));
            prop_assert!(effectiveness(pitches + 1, &l, 1) <= effectiveness(pitches, &l, 1));
        }

        #[test]
        fn prop_effectiveness_in_range(pitches in 0u32..300, tto in 0u8..6) {
            let e = effectiveness(pitches, &limits(), tto);
            prop_assert!((MIN_EFFECTIVENESS..=100).contains(&e));
        }
    }
}
