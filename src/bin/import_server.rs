//! Import endpoint server.
//!
//! Serves `GET /api/import[?code=]` so other clocks (or a browser page) can fetch the
//! default schedule or proxy a course-code lookup.
//!
//! # Environment Variables
//!
//! - `EXAM_CLOCK_HOST`: Server host (default: 127.0.0.1)
//! - `EXAM_CLOCK_PORT`: Server port (default: 3000)
//! - `EXAM_CLOCK_LOOKUP_URL`: Remote course lookup endpoint
//! - `EXAM_CLOCK_OFFLINE`: Answer course codes with the mock lookup
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use exam_clock::adapters::http::{AppState, create_router};
use exam_clock::adapters::lookup::{HttpCourseLookup, MockCourseLookup};
use exam_clock::ports::CourseLookupPort;
use exam_clock::shared::config::AppConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable; using defaults");
        AppConfig::default()
    });

    let lookup: Arc<dyn CourseLookupPort> = if cfg.is_offline() {
        warn!("offline mode: course codes answered by mock lookup");
        Arc::new(MockCourseLookup::with_delay(cfg.mock_delay_ms_or_default()))
    } else {
        Arc::new(
            HttpCourseLookup::new(cfg.lookup_url_or_default(), cfg.import_timeout())
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    let app = create_router(AppState::new(lookup));

    let addr: SocketAddr = format!("{}:{}", cfg.host_or_default(), cfg.port_or_default()).parse()?;
    info!("Import server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
