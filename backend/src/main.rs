//! Greenhouse temperature log - session runner
//!
//! Opens the saved log once, reports the rolling figures and refreshes the
//! CSV export.

use greenhouse_temps::services::WeatherJournal;
use greenhouse_temps::storage::JsonFileStore;
use greenhouse_temps::Config;
use shared::{WeatherData, HISTORY_WINDOW_DAYS};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenhouse_temps=debug,ght=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting greenhouse temperature log");
    tracing::info!("Environment: {}", config.environment);

    let store = JsonFileStore::new(config.storage.log_path());
    let mut journal = WeatherJournal::open(store);
    if config.storage.export_csv_on_save {
        journal = journal.with_csv_export(config.storage.csv_path());
    }

    let summary = journal.summary();
    tracing::info!("Observations: {}", summary.total_observations);

    match &summary.last_observation {
        Some(last) => tracing::info!(
            "Last observation {}: greenhouse {:.1} ℃, garden {:.1} ℃, range {} to {} ℃",
            last.date_observed().to_rfc3339(),
            last.greenhouse_temp(),
            last.garden_temp(),
            last.min_temp(),
            last.max_temp()
        ),
        None => tracing::info!("No previous observation"),
    }

    match (summary.rolling_mean, summary.rolling_variation) {
        (Some(mean), Some(variation)) => tracing::info!(
            "{} rolling mean {:.1} ℃, variance from mean {:+.1} ℃",
            summary.rolling_period.label(),
            mean,
            variation
        ),
        _ => tracing::info!("No observations"),
    }

    tracing::info!(
        "Observations in the last {} days: {}",
        HISTORY_WINDOW_DAYS,
        summary.recent_observations.len()
    );
    for ob in &summary.recent_observations {
        tracing::info!("  {}  {:.1} ℃", ob.date_observed().to_rfc3339(), ob.greenhouse_temp());
    }

    if journal.refresh_csv_export()? {
        if let Some(path) = journal.csv_path() {
            tracing::info!("CSV export written to {}", path.display());
        }
    }

    Ok(())
}
