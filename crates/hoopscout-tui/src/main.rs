// Prospect board entry point.
//
// Startup sequence:
// 1. Load config (creates board.toml with defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Load the dataset, derive the column schema, merge players
// 4. Build the view state
// 5. Run the TUI until the user quits

use hoopscout_core::config;
use hoopscout_core::merge::merge_players;
use hoopscout_core::records::load_dataset;
use hoopscout_core::schema::TableSchema;
use hoopscout_tui::tui;

use anyhow::Context;
use chrono::Local;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config; an optional first argument overrides the dataset path.
    let mut config = config::load_config().context("failed to load configuration")?;
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_dataset_path(path);
    }

    // 2. Initialize tracing
    init_tracing(&config.logging.filter)?;
    info!("hoopscout starting up");
    info!(
        "Config loaded: dataset={}, page size {}",
        config.dataset.path.display(),
        config.table.page_size
    );

    // 3. Load and merge
    let (store, report) = load_dataset(&config.dataset.path)
        .with_context(|| format!("failed to load dataset {}", config.dataset.path.display()))?;
    if report.total_skipped() > 0 {
        warn!("{} malformed records skipped while loading", report.total_skipped());
    }

    let schema = TableSchema::derive(&store);
    let outcome = merge_players(&store);
    info!(
        "Merged {} players, {} scout columns, {} orphaned records",
        outcome.len(),
        schema.scout_names().count(),
        outcome.orphans.len()
    );

    // 4. Build the view state
    let state = tui::ViewState::new(&outcome, schema, &config, Local::now().date_naive());

    // 5. Run the TUI (blocks until the user presses 'q' or Ctrl+C)
    if let Err(e) = tui::run(state).await {
        error!("TUI error: {:#}", e);
        return Err(e);
    }

    info!("hoopscout shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match directories::ProjectDirs::from("", "", "hoopscout") {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => std::env::current_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("hoopscout.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
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
