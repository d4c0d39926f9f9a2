use crate::analytics::overall::sanitize::{sanitize_count, sanitize_window};
use crate::analytics::overall::InsightsPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub insights: InsightsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            insights: InsightsConfig::from_env(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Baseline data source and aggregator policy.
///
/// Unset knobs keep the policy default. Set knobs pass through the same
/// sanitizer as request input, so `FAIRWAY_RECENT_WINDOW=abc` means a window
/// of 5 rather than a startup failure.
#[derive(Debug, Clone, Default)]
pub struct InsightsConfig {
    pub baseline_csv: Option<PathBuf>,
    pub policy: InsightsPolicy,
}

impl InsightsConfig {
    fn from_env() -> Self {
        let mut policy = InsightsPolicy::default();

        if let Ok(raw) = env::var("FAIRWAY_RECENT_WINDOW") {
            policy.recent_window = sanitize_window(Some(&raw));
        }
        if let Ok(raw) = env::var("FAIRWAY_FREE_BASELINE_WINDOW") {
            policy.free_baseline_window = sanitize_window(Some(&raw));
        }
        if let Ok(raw) = env::var("FAIRWAY_PROJECTION_MIN_ROUNDS") {
            policy.projection_min_rounds = sanitize_count(Some(&raw));
        }
        if let Ok(raw) = env::var("FAIRWAY_COMBINED_MIN_NINE_ROUNDS") {
            policy.combined_min_nine_rounds = sanitize_count(Some(&raw));
        }

        let baseline_csv = env::var("FAIRWAY_BASELINE_CSV")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            baseline_csv,
            policy: policy.sanitized(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "FAIRWAY_BASELINE_CSV",
            "FAIRWAY_RECENT_WINDOW",
            "FAIRWAY_FREE_BASELINE_WINDOW",
            "FAIRWAY_PROJECTION_MIN_ROUNDS",
            "FAIRWAY_COMBINED_MIN_NINE_ROUNDS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.insights.baseline_csv, None);
        assert_eq!(config.insights.policy, InsightsPolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");

        match AppConfig::load() {
            Err(ConfigError::InvalidPort) => {}
            other => panic!("expected invalid port, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn policy_knobs_are_sanitized() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("FAIRWAY_RECENT_WINDOW", "abc");
        env::set_var("FAIRWAY_FREE_BASELINE_WINDOW", "30");
        env::set_var("FAIRWAY_PROJECTION_MIN_ROUNDS", "-4");
        env::set_var("FAIRWAY_COMBINED_MIN_NINE_ROUNDS", "2.9");
        env::set_var("FAIRWAY_BASELINE_CSV", " data/baselines.csv ");

        let config = AppConfig::load().expect("config loads");
        let policy = &config.insights.policy;
        assert_eq!(policy.recent_window, 5);
        assert_eq!(policy.free_baseline_window, 30);
        assert_eq!(policy.projection_min_rounds, 0);
        assert_eq!(policy.combined_min_nine_rounds, 2);
        assert_eq!(
            config.insights.baseline_csv,
            Some(PathBuf::from("data/baselines.csv"))
        );
        reset_env();
    }
}
