use crate::errors::DomainError;
use crate::fingerprint::Fingerprint;
use std::fmt;

/// Record types this forwarder recognizes in a question section.
///
/// Queries for anything outside this set are dropped before they reach an
/// upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    CERT,
    CDNSKEY,
    SVCB,
    HTTPS,
    ANY,
    CAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::AAAA => "AAAA",
            RecordType::SRV => "SRV",
            RecordType::CERT => "CERT",
            RecordType::CDNSKEY => "CDNSKEY",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
            RecordType::ANY => "ANY",
            RecordType::CAA => "CAA",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::CERT => 37,
            RecordType::CDNSKEY => 60,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
            RecordType::ANY => 255,
            RecordType::CAA => 257,
        }
    }

    pub fn from_u16(value: u16) -> Result<Self, DomainError> {
        match value {
            1 => Ok(RecordType::A),
            2 => Ok(RecordType::NS),
            5 => Ok(RecordType::CNAME),
            6 => Ok(RecordType::SOA),
            12 => Ok(RecordType::PTR),
            15 => Ok(RecordType::MX),
            16 => Ok(RecordType::TXT),
            28 => Ok(RecordType::AAAA),
            33 => Ok(RecordType::SRV),
            37 => Ok(RecordType::CERT),
            60 => Ok(RecordType::CDNSKEY),
            64 => Ok(RecordType::SVCB),
            65 => Ok(RecordType::HTTPS),
            255 => Ok(RecordType::ANY),
            257 => Ok(RecordType::CAA),
            other => Err(DomainError::InvalidRecordType(other)),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed question-section summary: the dotted hostname, the record type,
/// and the raw QNAME + QTYPE bytes the query cache keys on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    hostname: String,
    record_type: RecordType,
    name_type: Vec<u8>,
}

impl Question {
    pub fn new(hostname: String, record_type: RecordType, name_type: Vec<u8>) -> Self {
        Self {
            hostname,
            record_type,
            name_type,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// The QNAME label sequence followed by the 2-byte QTYPE, as it appeared
    /// on the wire.
    pub fn key_bytes(&self) -> &[u8] {
        &self.name_type
    }

    /// Content fingerprint of the question, the query-cache key.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.name_type)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hostname, self.record_type)
    }
}
