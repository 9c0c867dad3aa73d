// Dynasty report entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file; stdout carries the report)
// 2. Load config
// 3. Read the season snapshot named on the command line
// 4. Build the report and print it as JSON

use std::path::PathBuf;

use anyhow::Context;
use dynasty_app::{report, snapshot};
use dynasty_core::config;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Dynasty report starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} days per season, pythag exponent {}",
        config.service_time.days_per_season, config.pythag.exponent
    );

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        anyhow::bail!("usage: dynasty-report <snapshot.json>");
    };
    let snapshot = snapshot::load_snapshot(&path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    info!("Loaded snapshot for {}", snapshot.team.name);

    let report = report::build_report(&snapshot, &config, chrono::Utc::now());
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{json}");

    info!("Dynasty report finished");
    Ok(())
}

/// Initialize tracing to log to a file (stdout is reserved for the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("dynasty-report.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dynasty_app=info,dynasty_baseball=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
