// Derived baseball metrics and eligibility rules for dynasty mode.
//
// Each module is an independent family of pure calculators. Rule thresholds
// come from `dynasty_core::config`.

pub mod comp_picks;
pub mod error;
pub mod fatigue;
pub mod graduation;
pub mod incentives;
pub mod position;
pub mod pythag;
pub mod service_time;
pub mod unlocks;

pub use error::MetricsError;
pub use position::Position;
