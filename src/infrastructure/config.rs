use crate::domain::level::LevelCalibration;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub level: Option<LevelSettings>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub latest_path: String,
    pub series_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            latest_path: "/leituras/ultima".to_string(),
            series_path: "/leituras".to_string(),
        }
    }
}

impl ApiSettings {
    pub fn latest_url(&self) -> String {
        endpoint_url(&self.base_url, &self.latest_path)
    }

    pub fn series_url(&self) -> String {
        endpoint_url(&self.base_url, &self.series_path)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
    pub interval_ms: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self { interval_ms: 15_000 }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("invalid server.bind address '{}'", self.bind))
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LevelSettings {
    pub min_distance: f64,
    pub max_distance: f64,
}

impl DashboardConfig {
    pub fn calibration(&self) -> Option<LevelCalibration> {
        self.level
            .map(|l| LevelCalibration::new(l.min_distance, l.max_distance))
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.polling.interval_ms == 0 {
            anyhow::bail!("polling.interval_ms must be greater than zero");
        }
        self.server.socket_addr()?;
        Ok(self)
    }
}

/// Defaults, then `config/dashboard.{toml,...}` if present, then
/// `DASHBOARD__SECTION__KEY` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
