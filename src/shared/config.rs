//! Application configuration. Data paths, lookup endpoint, countdown mode, server address.

use crate::adapters::lookup::http_lookup::DEFAULT_LOOKUP_URL;
use crate::domain::CountdownMode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Default whole-request timeout for the course lookup.
pub const DEFAULT_IMPORT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding `state.json`. Read from EXAM_CLOCK_DATA_DIR.
    pub data_dir: Option<String>,

    /// Remote course lookup endpoint. Read from EXAM_CLOCK_LOOKUP_URL.
    #[serde(default)]
    pub lookup_url: Option<String>,

    /// Use the mock lookup instead of the network. Read from EXAM_CLOCK_OFFLINE.
    #[serde(default)]
    pub offline: Option<bool>,

    /// `minutes` or `minutes_seconds`. Read from EXAM_CLOCK_COUNTDOWN_MODE.
    #[serde(default)]
    pub countdown_mode: Option<String>,

    /// Lookup request timeout in seconds. Read from EXAM_CLOCK_IMPORT_TIMEOUT_SECS.
    #[serde(default)]
    pub import_timeout_secs: Option<u64>,

    /// Simulated latency of the mock lookup. Read from EXAM_CLOCK_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Import server
    // ─────────────────────────────────────────────────────────────────────────
    /// Bind host. Read from EXAM_CLOCK_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Bind port. Read from EXAM_CLOCK_PORT.
    #[serde(default)]
    pub port: Option<u16>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("EXAM_CLOCK").try_parsing(true));
        if let Ok(path) = std::env::var("EXAM_CLOCK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir_or_default().join("state.json")
    }

    pub fn lookup_url_or_default(&self) -> String {
        self.lookup_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string())
    }

    pub fn is_offline(&self) -> bool {
        self.offline.unwrap_or(false)
    }

    /// Unknown values fall back to the default mode with a warning.
    pub fn countdown_mode_or_default(&self) -> CountdownMode {
        match self.countdown_mode.as_deref().map(str::parse::<CountdownMode>) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                warn!(error = %e, "using default countdown mode");
                CountdownMode::default()
            }
            None => CountdownMode::default(),
        }
    }

    pub fn import_timeout(&self) -> Duration {
        Duration::from_secs(
            self.import_timeout_secs
                .unwrap_or(DEFAULT_IMPORT_TIMEOUT_SECS),
        )
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(200)
    }

    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(3000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.state_path(), PathBuf::from("./data").join("state.json"));
        assert_eq!(cfg.lookup_url_or_default(), DEFAULT_LOOKUP_URL);
        assert!(!cfg.is_offline());
        assert_eq!(cfg.countdown_mode_or_default(), CountdownMode::MinutesSeconds);
        assert_eq!(cfg.import_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.port_or_default(), 3000);
    }

    #[test]
    fn test_countdown_mode_parsing() {
        let cfg = AppConfig {
            countdown_mode: Some("minutes".into()),
            ..Default::default()
        };
        assert_eq!(cfg.countdown_mode_or_default(), CountdownMode::MinutesOnly);

        let bad = AppConfig {
            countdown_mode: Some("fortnights".into()),
            ..Default::default()
        };
        assert_eq!(bad.countdown_mode_or_default(), CountdownMode::MinutesSeconds);
    }
}
