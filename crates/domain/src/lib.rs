pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod question;

pub use config::{CliOverrides, Config, ConfigError, ResolverEntry, Resolvers};
pub use errors::DomainError;
pub use fingerprint::Fingerprint;
pub use question::{Question, RecordType};
