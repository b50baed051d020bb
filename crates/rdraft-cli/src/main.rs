// Draft session entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the catalog client, asset resolver and voice sink
// 4. Create mpsc channels
// 5. Initialize AppState
// 6. Spawn app logic task
// 7. Run the line-oriented front end
// 8. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use rdraft_app::app;
use rdraft_app::assets::AssetResolver;
use rdraft_app::ddragon::DataDragonClient;
use rdraft_app::voice::TracingVoiceSink;
use rdraft_core::config;
use rdraft_core::draft::RngSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("rdraft starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: locale={}, data dragon at {}",
        config.locale, config.catalog.ddragon_base_url
    );

    // 3. Catalog client, asset links and voice output
    let client = DataDragonClient::new(&config.catalog).context("failed to build HTTP client")?;
    let assets = AssetResolver::from_config(&config.catalog);
    let voice = TracingVoiceSink::new(assets.clone());

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (catalog_tx, catalog_rx) = mpsc::channel(8);
    let (reveal_tx, reveal_rx) = mpsc::channel(256);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Create the application state
    let app_state = app::AppState::new(
        config,
        RngSource::from_entropy(),
        Arc::new(client),
        catalog_tx,
        reveal_tx,
        Arc::new(voice),
    );

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, catalog_rx, reveal_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the front end until the user quits
    info!("Application ready");
    if let Err(e) = rdraft_cli::run(ui_rx, cmd_tx, assets).await {
        error!("Front end error: {}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("rdraft shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file so the terminal stays readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("rdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rdraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
