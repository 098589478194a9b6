//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthouse.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use smarthouse_adapter_controller_http::{ControllerConfig, WebhookConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Controller API settings.
    pub controller: ControllerSection,
    /// Periodic rule cycle settings.
    pub scheduler: SchedulerConfig,
    /// Alert delivery settings.
    pub notifications: NotificationsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Controller API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerSection {
    /// Controller API endpoint.
    pub url: String,
    /// Bearer token.
    pub token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Drive the simulated in-memory house instead of the API.
    pub virtual_enabled: bool,
}

/// Scheduler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between two rule cycles.
    pub interval_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Address alerts are sent to.
    pub recipient: String,
    /// Webhook receiving notifications. Alerts are only logged when unset.
    pub webhook_url: Option<String>,
    /// Webhook timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from `smarthouse.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthouse.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SMARTHOUSE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("SMARTHOUSE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("SMARTHOUSE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SMARTHOUSE_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("SMARTHOUSE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SMARTHOUSE_CONTROLLER_URL") {
            self.controller.url = val;
        }
        if let Some(val) = var("SMARTHOUSE_CONTROLLER_TOKEN") {
            self.controller.token = val;
        }
        if let Some(enabled) = var("SMARTHOUSE_VIRTUAL_CONTROLLER").and_then(|val| val.parse().ok())
        {
            self.controller.virtual_enabled = enabled;
        }
        if let Some(val) = var("SMARTHOUSE_ALERT_RECIPIENT") {
            self.notifications.recipient = val;
        }
        if let Some(val) = var("SMARTHOUSE_WEBHOOK_URL") {
            self.notifications.webhook_url = Some(val);
        }
        if let Some(secs) = var("SMARTHOUSE_POLL_INTERVAL_SECS").and_then(|val| val.parse().ok()) {
            self.scheduler.interval_secs = secs;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler interval must be non-zero".to_string(),
            ));
        }
        if !self.controller.virtual_enabled && self.controller.url.is_empty() {
            return Err(ConfigError::Validation(
                "controller url is required unless the virtual controller is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Time between two scheduled rule cycles.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.interval_secs)
    }

    /// Settings for the HTTP controller client.
    #[must_use]
    pub fn controller_api(&self) -> ControllerConfig {
        ControllerConfig {
            url: self.controller.url.clone(),
            token: self.controller.token.clone(),
            timeout_secs: self.controller.timeout_secs,
        }
    }

    /// Settings for the webhook notifier, if one is configured.
    #[must_use]
    pub fn webhook(&self) -> Option<WebhookConfig> {
        self.notifications
            .webhook_url
            .as_ref()
            .map(|url| WebhookConfig {
                url: url.clone(),
                timeout_secs: self.notifications.timeout_secs,
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:smarthouse.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthoused=info,smarthouse=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            timeout_secs: 10,
            virtual_enabled: true,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            recipient: "admin@localhost".to_string(),
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
