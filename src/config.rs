use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub network: NetworkConfig,
    pub window: WindowConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// URL of the schedule CSV file.
    pub schedule_url: String,
    /// URL of the plain-text "last updated" timestamp file.
    pub timestamp_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Roomboard".to_string(),
            width: 960.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// How long a toast notice stays on screen.
    pub toast_duration_secs: u64,
    /// Delay between scrolling to a row and highlighting it, so the
    /// scroll settles before the highlight appears.
    pub highlight_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_secs: 4,
            highlight_delay_ms: 300,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env if present; production setups use real env vars.
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomboard");

        let builder = Config::builder()
            // 1. Default values
            // Data
            .set_default(
                "data.schedule_url",
                "https://roomboard-data.github.io/schedule/rooms.csv",
            )?
            .set_default(
                "data.timestamp_url",
                "https://roomboard-data.github.io/schedule/last_updated.txt",
            )?
            // Network
            .set_default("network.request_timeout_secs", 30)?
            .set_default("network.connect_timeout_secs", 10)?
            // Window
            .set_default("window.title", "Roomboard")?
            .set_default("window.width", 960.0)?
            .set_default("window.height", 720.0)?
            // UI
            .set_default("ui.toast_duration_secs", 4)?
            .set_default("ui.highlight_delay_ms", 300)?
            // 2. Local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 3. User config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))
            // 4. Environment variables (ROOMBOARD__DATA__SCHEDULE_URL=...)
            .add_source(Environment::with_prefix("ROOMBOARD").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}
