use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid dns packet: question terminator not found")]
    InvalidPacket,

    #[error("unrecognized record type: {0}")]
    InvalidRecordType(u16),

    #[error("problem parsing ttl offsets")]
    ProblemParsingOffsets,

    #[error("dial failed for {host}: {reason}")]
    DialFailed { host: String, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
