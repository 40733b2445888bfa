use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Failed to read resolvers file {0}: {1}")]
    ResolversRead(String, String),

    #[error("Failed to parse resolvers file: {0}")]
    ResolversParse(String),
}
