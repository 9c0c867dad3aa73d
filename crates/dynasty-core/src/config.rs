// Configuration loading and parsing (rules.toml).
//
// Every rule the calculators compare against lives here so that thresholds
// are data, not literals scattered through the calculators.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

/// All rule tables, one section per calculator family. Every section is
/// optional in the TOML file and falls back to the league defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pythag: PythagRules,
    pub service_time: ServiceTimeRules,
    pub comp_picks: CompPickRules,
    pub graduation: GraduationRules,
    pub fatigue: FatigueRules,
}

// ---------------------------------------------------------------------------
// Rule sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PythagRules {
    pub exponent: f64,
    /// Number of most recent games in the rolling run differential.
    pub trend_window: usize,
}

impl Default for PythagRules {
    fn default() -> Self {
        PythagRules {
            exponent: 1.83,
            trend_window: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceTimeRules {
    pub days_per_season: u32,
    pub free_agency_years: u32,
    /// Lower bound (inclusive) of the single-season day window that flags
    /// possible service-time manipulation.
    pub manipulation_min_days: u32,
    /// Upper bound (inclusive) of the manipulation window.
    pub manipulation_max_days: u32,
    /// Only players with strictly fewer total years than this are flagged.
    pub manipulation_max_years: u32,
}

impl ServiceTimeRules {
    /// Total service days needed for free agency, saturating at `u32::MAX`.
    /// `validate` rejects tables where the product does not fit.
    pub fn free_agency_days(&self) -> u32 {
        self.days_per_season.saturating_mul(self.free_agency_years)
    }
}

impl Default for ServiceTimeRules {
    fn default() -> Self {
        ServiceTimeRules {
            days_per_season: 172,
            free_agency_years: 6,
            manipulation_min_days: 155,
            manipulation_max_days: 172,
            manipulation_max_years: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompPickRules {
    /// Minimum overall rating for a departed free agent to return a pick.
    pub min_overall: u8,
    pub tier_a: u8,
    pub tier_b: u8,
    pub tier_c: u8,
    /// Comp pick slots before signing penalties.
    pub max_picks: usize,
    /// Signing a free agent at or above this rating costs one slot.
    pub costly_signing_overall: u8,
}

impl Default for CompPickRules {
    fn default() -> Self {
        CompPickRules {
            min_overall: 65,
            tier_a: 80,
            tier_b: 75,
            tier_c: 70,
            max_picks: 2,
            costly_signing_overall: 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraduationRules {
    pub at_bats: u32,
    pub innings_pitched: f64,
    pub active_days: u32,
}

impl Default for GraduationRules {
    fn default() -> Self {
        GraduationRules {
            at_bats: 130,
            innings_pitched: 50.0,
            active_days: 45,
        }
    }
}

/// Default pitch limits applied when an outing does not carry its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FatigueRules {
    pub soft_limit: u32,
    pub hard_limit: u32,
}

impl Default for FatigueRules {
    fn default() -> Self {
        FatigueRules {
            soft_limit: 100,
            hard_limit: 115,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/rules.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let rules_path = base_dir.join("config").join("rules.toml");
    let text = read_file(&rules_path)?;
    let config = parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: rules_path.clone(),
        source: e,
    })?;

    validate(&config)?;
    Ok(config)
}

/// Parse rules TOML text without touching the filesystem or validating.
pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Seed `config/` with any rule file from `defaults/` it does not have yet.
///
/// Only `*.toml` files are seeded; anything else in `defaults/` (notes,
/// `.example` templates) stays put. Existing files in `config/` are never
/// overwritten, so local edits survive. Returns the files written, sorted by
/// name. A checkout with `config/` but no `defaults/` is left alone.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (false, true) => return Ok(Vec::new()),
        (false, false) => {
            return Err(seed_error(format!(
                "no defaults/ or config/ directory under {}",
                base_dir.display()
            )))
        }
        (true, _) => {}
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::new();
    for source in default_rule_files(&defaults_dir)? {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(name);
        if copy_if_missing(&source, &target)? {
            info!("Seeded {} from {}", target.display(), source.display());
            seeded.push(target);
        }
    }
    Ok(seeded)
}

/// `*.toml` files directly under `dir`, sorted by path.
fn default_rule_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let listing = std::fs::read_dir(dir)
        .map_err(|e| seed_error(format!("cannot list {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in listing {
        let path = entry
            .map_err(|e| seed_error(format!("cannot list {}: {e}", dir.display())))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `source` to `target` unless `target` already exists. Creating the
/// target with `create_new` keeps a concurrent writer's file intact.
fn copy_if_missing(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(seed_error(format!("cannot create {}: {e}", target.display()))),
    };
    let mut src = std::fs::File::open(source)
        .map_err(|e| seed_error(format!("cannot open {}: {e}", source.display())))?;
    std::io::copy(&mut src, &mut dest)
        .map_err(|e| seed_error(format!("cannot copy into {}: {e}", target.display())))?;
    Ok(true)
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check every rule section. Threshold tables must be strictly ordered so
/// that first-match classification is well defined.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let pythag = &config.pythag;
    if !pythag.exponent.is_finite() || pythag.exponent <= 0.0 {
        return Err(invalid(
            "pythag.exponent",
            format!("must be a finite number > 0, got {}", pythag.exponent),
        ));
    }
    if pythag.trend_window == 0 {
        return Err(invalid("pythag.trend_window", "must be > 0"));
    }

    let st = &config.service_time;
    if st.days_per_season == 0 {
        return Err(invalid("service_time.days_per_season", "must be > 0"));
    }
    if st.free_agency_years == 0 {
        return Err(invalid("service_time.free_agency_years", "must be > 0"));
    }
    if st.days_per_season.checked_mul(st.free_agency_years).is_none() {
        return Err(invalid(
            "service_time.free_agency_years",
            format!(
                "{} years of {} days overflows the service-day count",
                st.free_agency_years, st.days_per_season
            ),
        ));
    }
    if st.manipulation_min_days > st.manipulation_max_days {
        return Err(invalid(
            "service_time.manipulation_min_days",
            format!(
                "must be <= manipulation_max_days ({}), got {}",
                st.manipulation_max_days, st.manipulation_min_days
            ),
        ));
    }
    if st.manipulation_max_days > st.days_per_season {
        return Err(invalid(
            "service_time.manipulation_max_days",
            format!(
                "must be <= days_per_season ({}), got {}",
                st.days_per_season, st.manipulation_max_days
            ),
        ));
    }

    let cp = &config.comp_picks;
    if !(cp.tier_a > cp.tier_b && cp.tier_b > cp.tier_c) {
        return Err(invalid(
            "comp_picks.tier_a",
            format!(
                "tiers must be strictly descending (a > b > c), got {} / {} / {}",
                cp.tier_a, cp.tier_b, cp.tier_c
            ),
        ));
    }
    if cp.tier_c < cp.min_overall {
        return Err(invalid(
            "comp_picks.tier_c",
            format!("must be >= min_overall ({}), got {}", cp.min_overall, cp.tier_c),
        ));
    }

    let grad = &config.graduation;
    if grad.at_bats == 0 {
        return Err(invalid("graduation.at_bats", "must be > 0"));
    }
    if !grad.innings_pitched.is_finite() || grad.innings_pitched <= 0.0 {
        return Err(invalid(
            "graduation.innings_pitched",
            format!("must be a finite number > 0, got {}", grad.innings_pitched),
        ));
    }
    if grad.active_days == 0 {
        return Err(invalid("graduation.active_days", "must be > 0"));
    }

    let fatigue = &config.fatigue;
    if fatigue.soft_limit == 0 {
        return Err(invalid("fatigue.soft_limit", "must be > 0"));
    }
    if fatigue.hard_limit < fatigue.soft_limit {
        return Err(invalid(
            "fatigue.hard_limit",
            format!(
                "must be >= soft_limit ({}), got {}",
                fatigue.soft_limit, fatigue.hard_limit
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
