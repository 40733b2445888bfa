mod packets;

pub use packets::{name_rdata, ResponseBuilder};
