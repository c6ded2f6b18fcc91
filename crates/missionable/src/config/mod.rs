use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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

/// Top-level configuration for the site.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub backend: BackendConfig,
    pub offline: OfflineConfig,
    pub telemetry: TelemetryConfig,
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

        let base_path = normalize_base_path(
            &env::var("SITE_BASE_PATH").unwrap_or_else(|_| "/missionable".to_string()),
        )?;

        let url = env::var("BACKEND_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());
        let anon_key = env::var("BACKEND_ANON_KEY").unwrap_or_default();
        let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let admin_email = env::var("OFFLINE_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@missionable.systems".to_string());
        let admin_password =
            env::var("OFFLINE_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            site: SiteConfig { base_path },
            backend: BackendConfig {
                url,
                anon_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            offline: OfflineConfig {
                admin_email,
                admin_password,
            },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
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

/// Public site layout. `base_path` is empty when the site is mounted at `/`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_path: String,
}

/// Connection settings for the hosted data/auth/storage backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or(ConfigError::MissingBackendUrl)
    }
}

/// Credentials for the in-memory backend used by `serve --offline`.
#[derive(Debug, Clone)]
pub struct OfflineConfig {
    pub admin_email: String,
    pub admin_password: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

fn normalize_base_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') || trimmed.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidBasePath(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidBasePath(String),
    MissingBackendUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "BACKEND_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidBasePath(value) => {
                write!(f, "SITE_BASE_PATH must start with '/' (found '{value}')")
            }
            ConfigError::MissingBackendUrl => {
                write!(f, "BACKEND_URL is required unless the server runs offline")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidBasePath(_)
            | ConfigError::MissingBackendUrl => None,
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
            "SITE_BASE_PATH",
            "BACKEND_URL",
            "BACKEND_ANON_KEY",
            "BACKEND_TIMEOUT_SECS",
            "OFFLINE_ADMIN_EMAIL",
            "OFFLINE_ADMIN_PASSWORD",
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
        assert_eq!(config.site.base_path, "/missionable");
        assert_eq!(config.backend.timeout, Duration::from_secs(15));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(matches!(
            config.backend.require_url(),
            Err(ConfigError::MissingBackendUrl)
        ));
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
    fn backend_url_drops_trailing_slash() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BACKEND_URL", "https://project.example.co/");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.backend.require_url().expect("url present"),
            "https://project.example.co"
        );
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("/").expect("root"), "");
        assert_eq!(
            normalize_base_path(" /missionable/ ").expect("trimmed"),
            "/missionable"
        );
        assert!(matches!(
            normalize_base_path("missionable"),
            Err(ConfigError::InvalidBasePath(_))
        ));
    }
}
