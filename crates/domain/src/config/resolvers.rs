use super::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Built-in upstreams used when no resolvers file is given.
const DEFAULT_RESOLVERS: &str = r#"
[[resolvers]]
address = "9.9.9.9:853"
hostname = "dns.quad9.net"

[[resolvers]]
address = "194.242.2.9:853"
hostname = "all.dns.mullvad.net"
"#;

/// One DNS-over-TLS upstream: `host:port` plus the hostname presented as SNI
/// and verified against the server certificate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverEntry {
    pub address: String,
    pub hostname: String,
}

impl ResolverEntry {
    /// Port component of `address`, if it parses.
    pub fn port(&self) -> Option<u16> {
        let (_, port) = self.address.rsplit_once(':')?;
        port.parse().ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Resolvers {
    #[serde(default)]
    pub resolvers: Vec<ResolverEntry>,
}

impl Resolvers {
    /// Load the resolvers list from `path`, or the built-in default list when
    /// no path is given.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let contents = match path {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ResolversRead(path.to_string(), e.to_string()))?,
            None => DEFAULT_RESOLVERS.to_string(),
        };

        toml::from_str(&contents).map_err(|e| ConfigError::ResolversParse(e.to_string()))
    }
}
