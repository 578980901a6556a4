//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use exam_clock::adapters::clock::SystemClock;
use exam_clock::adapters::lookup::{HttpCourseLookup, MockCourseLookup};
use exam_clock::adapters::persistence::StateJson;
use exam_clock::adapters::ui::tui::TuiInputPort;
use exam_clock::ports::{ClockPort, CourseLookupPort, InputPort, SchedulePersistence};
use exam_clock::shared::config::AppConfig;
use exam_clock::usecases::{ClockService, ImportService, PersistenceListener, ScheduleStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // Logs go to stderr and default to warn so they stay off the clock screen.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable; using defaults");
        AppConfig::default()
    });

    exam_clock::adapters::ui::init_ui();

    // --- Persistence: load once, then save on every schedule write ---
    let state_path = cfg.state_path();
    info!(path = %state_path.display(), "state file");
    let persistence: Arc<dyn SchedulePersistence> = Arc::new(StateJson::new(&state_path));
    let mut store = ScheduleStore::load(persistence.as_ref()).await;
    let listener = PersistenceListener::new(Arc::clone(&persistence), store.subscribe());
    let listener_handle = tokio::spawn(listener.run());

    // --- Course lookup: network or mock ---
    let lookup: Arc<dyn CourseLookupPort> = if cfg.is_offline() {
        warn!("EXAM_CLOCK_OFFLINE set, using mock course lookup");
        Arc::new(MockCourseLookup::with_delay(cfg.mock_delay_ms_or_default()))
    } else {
        let url = cfg.lookup_url_or_default();
        info!(url = %url, "course lookup enabled");
        Arc::new(
            HttpCourseLookup::new(url, cfg.import_timeout())
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    // --- Services ---
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let clock_service = ClockService::new(clock, cfg.countdown_mode_or_default());
    let import_service = ImportService::new(lookup);

    let mut input_port = TuiInputPort::new(store, clock_service, import_service);
    let result = input_port.run().await;

    // Dropping the UI drops the store, which closes the listener after its last save.
    drop(input_port);
    if let Err(e) = listener_handle.await {
        warn!(error = %e, "persistence listener did not finish cleanly");
    }

    result.map_err(|e| anyhow::anyhow!("{}", e))
}
