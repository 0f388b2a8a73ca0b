/// Application configuration module
use chrono::Duration;
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub gfz_base_url: String,
    pub swpc_base_url: String,
    pub open_meteo_base_url: String,
    pub http_timeout_seconds: u64,
    pub event_window_days: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let gfz_base_url = env::var("GFZ_BASE_URL")
            .unwrap_or_else(|_| "https://www-app3.gfz-potsdam.de/".to_string());

        let swpc_base_url = env::var("SWPC_BASE_URL")
            .unwrap_or_else(|_| "https://services.swpc.noaa.gov/".to_string());

        let open_meteo_base_url = env::var("OPEN_METEO_BASE_URL")
            .unwrap_or_else(|_| "https://api.open-meteo.com/".to_string());

        Ok(Self {
            bind_addr,
            gfz_base_url,
            swpc_base_url,
            open_meteo_base_url,
            http_timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 30),
            event_window_days: env_u64("EVENT_WINDOW_DAYS", 7),
        })
    }

    /// Recency window for solar events
    pub fn event_window(&self) -> anyhow::Result<Duration> {
        i64::try_from(self.event_window_days)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| {
                anyhow::anyhow!("EVENT_WINDOW_DAYS out of range: {}", self.event_window_days)
            })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
