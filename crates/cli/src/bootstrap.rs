use tracing_subscriber::EnvFilter;
use umbra_dns_domain::{CliOverrides, Config, ConfigError};

/// Load configuration and check it before anything else starts.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Route `tracing` output to stderr at the configured level. `RUST_LOG`
/// still wins when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
