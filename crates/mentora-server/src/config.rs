//! Server configuration loading from file and environment variables.

use mentora_payments::StripeConfig;
use mentora_voice::LiveKitConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LiveKit session provider credentials.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Stripe payment gateway credentials and price table.
    #[serde(default)]
    pub stripe: StripeConfig,

    /// CORS settings for the browser frontend.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "mentora_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Allowed browser origins.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:3081".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `MENTORA_HOST` / `MENTORA_PORT` override `server.*`
/// - `MENTORA_LOG_LEVEL` / `MENTORA_LOG_JSON` override `logging.*`
/// - `MENTORA_LIVEKIT_URL` / `MENTORA_LIVEKIT_API_KEY` /
///   `MENTORA_LIVEKIT_API_SECRET` / `MENTORA_LIVEKIT_ROOM` override `livekit.*`
/// - `MENTORA_STRIPE_SECRET_KEY` / `MENTORA_STRIPE_WEBHOOK_SECRET` /
///   `MENTORA_STRIPE_PRICE_ID_PRO` / `MENTORA_STRIPE_PRICE_ID_PREMIUM`
///   override `stripe.*`
/// - `MENTORA_FRONTEND_URL` overrides `stripe.frontend_url` and is appended
///   to the allowed origins
/// - `MENTORA_ALLOWED_ORIGINS` (comma-separated) overrides `cors.allowed_origins`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Ok(host) = std::env::var("MENTORA_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("MENTORA_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(level) = std::env::var("MENTORA_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("MENTORA_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(value) = std::env::var("MENTORA_LIVEKIT_URL") {
        config.livekit.url = value;
    }
    if let Ok(value) = std::env::var("MENTORA_LIVEKIT_API_KEY") {
        config.livekit.api_key = value;
    }
    if let Ok(value) = std::env::var("MENTORA_LIVEKIT_API_SECRET") {
        config.livekit.api_secret = value;
    }
    if let Ok(value) = std::env::var("MENTORA_LIVEKIT_ROOM") {
        config.livekit.room_name = value;
    }
    if let Ok(value) = std::env::var("MENTORA_STRIPE_SECRET_KEY") {
        config.stripe.secret_key = value;
    }
    if let Ok(value) = std::env::var("MENTORA_STRIPE_WEBHOOK_SECRET") {
        config.stripe.webhook_secret = Some(value);
    }
    if let Ok(value) = std::env::var("MENTORA_STRIPE_PRICE_ID_PRO") {
        config.stripe.price_id_pro = value;
    }
    if let Ok(value) = std::env::var("MENTORA_STRIPE_PRICE_ID_PREMIUM") {
        config.stripe.price_id_premium = value;
    }
    if let Ok(value) = std::env::var("MENTORA_FRONTEND_URL") {
        if !config.cors.allowed_origins.contains(&value) {
            config.cors.allowed_origins.push(value.clone());
        }
        config.stripe.frontend_url = value;
    }
    if let Ok(value) = std::env::var("MENTORA_ALLOWED_ORIGINS") {
        config.cors.allowed_origins = value
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
    }

    Ok(config)
}
