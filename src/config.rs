use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub upstream: UpstreamConfig,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub events: ProviderConfig,

    /// File the settings were read from; `None` means built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Problems noticed while loading. Loading runs before tracing is
    /// installed, so these are held until `log_load_report`.
    #[serde(skip)]
    pub load_warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// "pretty" (default) or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/city-explorer.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Per-request timeout for every outbound call, in seconds (default: 30)
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment (default: true)
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            user_agent: format!("CityExplorer/{}", env!("CARGO_PKG_VERSION")),
            use_system_proxy: true,
        }
    }
}

/// Base URL and credential for one third-party API.
///
/// `base_url` is empty by default; each client falls back to its public host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,

    pub api_key: String,
}

impl ProviderConfig {
    #[must_use]
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.base_url.is_empty() {
            default
        } else {
            self.base_url.trim_end_matches('/')
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let dotenv_warning = match dotenvy::dotenv() {
            Err(e) if !e.not_found() => Some(format!("Ignoring unreadable .env file: {e}")),
            _ => None,
        };

        let mut config = Self::load_file()?;
        config.load_warnings.extend(dotenv_warning);
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Logs where the config came from and anything skipped while loading.
    pub fn log_load_report(&self) {
        match &self.source {
            Some(path) => info!("Loaded config from: {}", path.display()),
            None => info!("No config file found, using defaults"),
        }

        for warning in &self.load_warnings {
            warn!("{}", warning);
        }
    }

    /// Environment variables win over the file. `lookup` is injected so tests
    /// don't have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => self
                    .load_warnings
                    .push(format!("Ignoring non-numeric PORT value: {port}")),
            }
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_url = url;
        }

        if let Some(key) = lookup("GEOCODE_API_KEY") {
            self.geocode.api_key = key;
        }

        if let Some(key) = lookup("WEATHER_API_KEY") {
            self.weather.api_key = key;
        }

        if let Some(key) = lookup("EVENTBRITE_API_KEY") {
            self.events.api_key = key;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("city-explorer").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.general.database_url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        for (name, provider) in [
            ("geocode", &self.geocode),
            ("weather", &self.weather),
            ("events", &self.events),
        ] {
            if provider.api_key.is_empty() {
                warn!("No API key configured for {} provider", name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.request_timeout_seconds, 30);
        assert!(config.geocode.api_key.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 8080

            [weather]
            base_url = "http://127.0.0.1:9000/"
            api_key = "abc"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weather.api_key, "abc");
        assert_eq!(
            config.weather.base_url_or("https://example.com"),
            "http://127.0.0.1:9000"
        );
        assert_eq!(
            config.events.base_url_or("https://example.com"),
            "https://example.com"
        );
        assert_eq!(config.general.database_url, "sqlite:data/city-explorer.db");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "4000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("GEOCODE_API_KEY", "g"),
            ("WEATHER_API_KEY", "w"),
            ("EVENTBRITE_API_KEY", "e"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.general.database_url, "sqlite::memory:");
        assert_eq!(config.geocode.api_key, "g");
        assert_eq!(config.weather.api_key, "w");
        assert_eq!(config.events.api_key, "e");
    }

    #[test]
    fn test_bad_port_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "PORT").then(|| "nope".to_string()));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.load_warnings, ["Ignoring non-numeric PORT value: nope"]);
    }

    #[test]
    fn test_load_from_path_records_source() {
        let path = std::env::temp_dir().join(format!(
            "city-explorer-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[server]\nport = 8081\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert!(config.load_warnings.is_empty());
        assert!(Config::default().source.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
