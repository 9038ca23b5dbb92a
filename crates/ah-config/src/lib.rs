//! # ah-config
//!
//! Layered settings for the AgriHub binary, lowest priority first:
//! built-in defaults, `config/agrihub.toml` (optional), then `AGRIHUB__*`
//! environment variables (`AGRIHUB__SERVER__PORT=9000`). A `.env` file is
//! loaded into the environment before anything else.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub http: HttpSettings,
    pub ai: AiSettings,
    pub weather: WeatherSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Shared by every outbound client.
#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct AiSettings {
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub system_prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherSettings {
    pub base_url: String,
    /// How long a cached forecast stays valid
    pub ttl_secs: i64,
}

#[derive(Debug, Deserialize)]
pub struct UploadSettings {
    pub endpoint: String,
    /// Catbox account hash. Uploads are anonymous without one.
    #[serde(default, deserialize_with = "optional_secret")]
    pub userhash: Option<SecretString>,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
}

const SYSTEM_PROMPT: &str = "You are a helpful farming assistant for African farmers. \
Provide practical advice about crops, livestock, weather, and sustainable farming practices. \
Keep responses concise and actionable.";

impl Settings {
    /// Reads `.env`, the optional config file and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        Self::load_from(
            Config::builder()
                .add_source(File::with_name("config/agrihub").required(false))
                .add_source(
                    Environment::with_prefix("AGRIHUB")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    /// Applies the built-in defaults underneath whatever sources `builder` carries.
    pub fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("http.timeout_secs", 60_i64)?
            .set_default("ai.base_url", "https://api.bk9.dev")?
            .set_default("ai.chat_model", "gemini_2_5_flash")?
            .set_default("ai.vision_model", "meta-llama/llama-4-scout-17b-16e-instruct")?
            .set_default("ai.system_prompt", SYSTEM_PROMPT)?
            .set_default("weather.base_url", "https://api.open-meteo.com")?
            .set_default("weather.ttl_secs", 3600_i64)?
            .set_default("upload.endpoint", "https://catbox.moe/user/api.php")?
            .set_default("upload.max_bytes", 20_i64 * 1024 * 1024)?
            .set_default("log.format", "pretty")?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}
