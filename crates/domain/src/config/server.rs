use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the UDP listener binds to.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Port upstream resolvers must be listening on. Resolver entries with a
    /// different port are skipped at startup.
    #[serde(default = "default_outbound_port")]
    pub outbound_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            outbound_port: default_outbound_port(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:53".to_string()
}

fn default_outbound_port() -> u16 {
    853
}
