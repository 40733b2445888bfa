mod blocking;
mod cache;
mod dns;
mod errors;
mod logging;
mod resolvers;
mod root;
mod server;

pub use blocking::BlockingConfig;
pub use cache::CacheConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolvers::{ResolverEntry, Resolvers};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
