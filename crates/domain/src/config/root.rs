use serde::{Deserialize, Serialize};

use super::blocking::BlockingConfig;
use super::cache::CacheConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for umbra-dns.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener and outbound-port settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolver list and queueing
    #[serde(default)]
    pub dns: DnsConfig,

    /// Query cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Block list settings
    #[serde(default)]
    pub blocking: BlockingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. umbra-dns.toml in current directory
    /// 3. /etc/umbra-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("umbra-dns.toml").exists() {
            Self::from_file("umbra-dns.toml")?
        } else if std::path::Path::new("/etc/umbra-dns/config.toml").exists() {
            Self::from_file("/etc/umbra-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if overrides.no_cache {
            self.cache.enabled = false;
        }
        if let Some(path) = overrides.blocklist_file {
            self.blocking.blocklist_file = Some(path);
        }
        if let Some(path) = overrides.resolvers_file {
            self.dns.resolvers_file = Some(path);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Listen address '{}' is not a socket address",
                self.server.listen
            )));
        }

        if self.dns.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "Request queue capacity cannot be 0".to_string(),
            ));
        }

        if self.cache.reap_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache reap interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    pub no_cache: bool,
    pub blocklist_file: Option<String>,
    pub resolvers_file: Option<String>,
    pub log_level: Option<String>,
}
