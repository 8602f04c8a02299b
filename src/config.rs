use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "Clinic Patient Communication Dashboard";
/// Mirrors the en-US `toLocaleString()` layout, e.g. `3/5/2026, 2:07:09 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub time_format: String,
    pub app_name: String,
    pub demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            demo: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_connections = match non_empty("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("Invalid DB_MAX_CONNECTIONS '{raw}', using {DEFAULT_MAX_CONNECTIONS}");
                    DEFAULT_MAX_CONNECTIONS
                }
            },
            None => defaults.max_connections,
        };

        let acquire_timeout = match non_empty("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "Invalid DB_ACQUIRE_TIMEOUT_SECS '{raw}', using {DEFAULT_ACQUIRE_TIMEOUT_SECS}"
                    );
                    defaults.acquire_timeout
                }
            },
            None => defaults.acquire_timeout,
        };

        let demo = non_empty("DASHBOARD_DEMO")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            database_url: non_empty("DATABASE_URL"),
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections,
            acquire_timeout,
            time_format: non_empty("DASHBOARD_TIME_FORMAT").unwrap_or(defaults.time_format),
            app_name: non_empty("APP_NAME").unwrap_or(defaults.app_name),
            demo,
        }
    }
}
