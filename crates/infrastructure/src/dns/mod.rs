pub mod blocklist;
pub mod cache;
pub mod codec;
pub mod pool;
pub mod queue;
pub mod request;
pub mod server;
pub mod transport;
pub mod upstream;

pub use blocklist::Blocklist;
pub use cache::{CachedAnswer, PendingTable, QueryCache};
pub use pool::Pool;
pub use request::ClientRequest;
pub use server::UdpFrontend;
