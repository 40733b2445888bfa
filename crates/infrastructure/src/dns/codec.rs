//! Byte-level DNS message handling (RFC 1035).
//!
//! Just enough of the wire format to read a question section, synthesize
//! nothing, and find the TTL fields of a response. All multi-byte integers
//! are big-endian; offsets are zero-based into the backing buffer.

use umbra_dns_domain::{DomainError, Question, RecordType};

/// Fixed DNS header length.
pub const HEADER_LEN: usize = 12;

/// Largest datagram the UDP listener accepts.
pub const MAX_PACKET_LEN: usize = 512;

/// Slice out QNAME + QTYPE from the start of a question section: everything
/// up to and including the first zero terminator, plus the two QTYPE bytes.
pub fn slice_question(section: &[u8]) -> Result<&[u8], DomainError> {
    let terminator = section
        .iter()
        .position(|&b| b == 0x00)
        .ok_or(DomainError::InvalidPacket)?;

    section
        .get(..terminator + 3)
        .ok_or(DomainError::InvalidPacket)
}

/// Join the length-prefixed labels of an uncompressed name with dots.
pub fn parse_domain_name(labels: &[u8]) -> Result<String, DomainError> {
    let mut name = String::new();
    let mut i = 0;

    loop {
        let length = usize::from(*labels.get(i).ok_or(DomainError::InvalidPacket)?);
        if length == 0 {
            break;
        }

        let label = labels
            .get(i + 1..i + 1 + length)
            .ok_or(DomainError::InvalidPacket)?;

        if i != 0 {
            name.push('.');
        }
        name.push_str(&String::from_utf8_lossy(label));

        i += length + 1;
    }

    Ok(name)
}

/// Parse a question section (starting at byte 12 of the message) into a
/// [`Question`]. Unrecognized QTYPEs are rejected.
pub fn parse_question(section: &[u8]) -> Result<Question, DomainError> {
    let name_type = slice_question(section)?;
    let split = name_type.len() - 2;

    let hostname = parse_domain_name(&name_type[..split])?;
    let qtype = u16::from_be_bytes([name_type[split], name_type[split + 1]]);
    let record_type = RecordType::from_u16(qtype)?;

    Ok(Question::new(hostname, record_type, name_type.to_vec()))
}

/// Byte offsets of every TTL in the answer and authority sections of a
/// response.
///
/// The additional section is left out on purpose: only records the cache can
/// age are of interest, and OPT pseudo-records do not carry a real TTL.
/// Record NAMEs are walked permissively: labels are followed until a zero
/// terminator or a compression pointer (top two bits `11`), so names written
/// as labels-ending-with-a-pointer are accepted.
pub fn ttl_offsets(message: &[u8]) -> Result<Vec<usize>, DomainError> {
    if message.len() < HEADER_LEN {
        return Err(DomainError::ProblemParsingOffsets);
    }

    let answers = u16::from_be_bytes([message[6], message[7]]);
    let authority = u16::from_be_bytes([message[8], message[9]]);
    let total = usize::from(answers) + usize::from(authority);

    // Hop over the single question: find its terminator, then skip the
    // terminator plus QTYPE and QCLASS.
    let terminator = message[HEADER_LEN..]
        .iter()
        .position(|&b| b == 0x00)
        .ok_or(DomainError::ProblemParsingOffsets)?;
    let mut offset = HEADER_LEN + terminator + 5;

    let mut offsets = Vec::with_capacity(total);

    for _ in 0..total {
        // NAME field.
        loop {
            let marker = *message
                .get(offset)
                .ok_or(DomainError::ProblemParsingOffsets)?;

            match marker {
                0x00 => {
                    offset += 1;
                    break;
                }
                m if m & 0xc0 == 0xc0 => {
                    offset += 2;
                    break;
                }
                length => {
                    offset += usize::from(length) + 1;
                }
            }
        }

        // TYPE + CLASS.
        offset += 4;

        // TTL field.
        if offset + 4 > message.len() {
            return Err(DomainError::ProblemParsingOffsets);
        }
        offsets.push(offset);
        offset += 4;

        // RDLENGTH, then past the RDATA it measures.
        let rdlength = message
            .get(offset..offset + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .ok_or(DomainError::ProblemParsingOffsets)?;
        offset += 2 + usize::from(rdlength);
    }

    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw protonmail.com QNAME.
    const PROTONMAIL: &[u8] = &[
        0x0a, b'p', b'r', b'o', b't', b'o', b'n', b'm', b'a', b'i', b'l', 0x03, b'c', b'o', b'm',
        0x00,
    ];

    const QTYPE_A: &[u8] = &[0x00, 0x01];

    #[test]
    fn test_slice_question_keeps_name_and_type() {
        let mut section = PROTONMAIL.to_vec();
        section.extend_from_slice(QTYPE_A);
        section.extend_from_slice(&[0x01, 0x03, 0x05]);

        let sliced = slice_question(&section).unwrap();
        assert_eq!(sliced, &section[..PROTONMAIL.len() + 2]);
    }

    #[test]
    fn test_slice_question_without_terminator_fails() {
        let err = slice_question(&[0x01]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPacket));
    }

    #[test]
    fn test_slice_question_truncated_after_terminator_fails() {
        // Terminator present but QTYPE missing.
        let err = slice_question(&[0x01, b'a', 0x00]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPacket));
    }

    #[test]
    fn test_parse_domain_name() {
        assert_eq!(parse_domain_name(PROTONMAIL).unwrap(), "protonmail.com");
    }

    #[test]
    fn test_parse_question() {
        let mut section = PROTONMAIL.to_vec();
        section.extend_from_slice(QTYPE_A);

        let question = parse_question(&section).unwrap();
        assert_eq!(question.hostname(), "protonmail.com");
        assert_eq!(question.record_type(), RecordType::A);
        assert_eq!(question.key_bytes(), &section[..]);
    }

    #[test]
    fn test_parse_question_rejects_unknown_qtype() {
        let mut section = PROTONMAIL.to_vec();
        section.extend_from_slice(&999u16.to_be_bytes());

        let err = parse_question(&section).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecordType(999)));
    }

    #[test]
    fn test_hostname_round_trips_through_slice() {
        let mut section = PROTONMAIL.to_vec();
        section.extend_from_slice(QTYPE_A);

        let question = parse_question(&section).unwrap();
        let sliced = slice_question(&section).unwrap();
        let rejoined = parse_domain_name(&sliced[..sliced.len() - 2]).unwrap();

        assert_eq!(question.hostname(), rejoined);
    }

    #[test]
    fn test_ttl_offsets_empty_response() {
        // Header + question, zero records.
        let mut message = vec![0u8; HEADER_LEN];
        message[4..6].copy_from_slice(&1u16.to_be_bytes());
        message.extend_from_slice(PROTONMAIL);
        message.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        assert_eq!(ttl_offsets(&message).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_ttl_offsets_truncated_record_fails() {
        let mut message = vec![0u8; HEADER_LEN];
        message[6..8].copy_from_slice(&1u16.to_be_bytes());
        message.extend_from_slice(PROTONMAIL);
        message.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        // Record cut off right after its pointer NAME.
        message.extend_from_slice(&[0xc0, 0x0c]);

        let err = ttl_offsets(&message).unwrap_err();
        assert!(matches!(err, DomainError::ProblemParsingOffsets));
    }

    #[test]
    fn test_ttl_offsets_label_name_record() {
        let mut message = vec![0u8; HEADER_LEN];
        message[6..8].copy_from_slice(&1u16.to_be_bytes());
        message.extend_from_slice(PROTONMAIL);
        message.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        // One A record whose NAME is written out as labels.
        let record_start = message.len();
        message.extend_from_slice(PROTONMAIL);
        message.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        let ttl_at = message.len();
        message.extend_from_slice(&300u32.to_be_bytes());
        message.extend_from_slice(&4u16.to_be_bytes());
        message.extend_from_slice(&[192, 0, 2, 1]);

        let offsets = ttl_offsets(&message).unwrap();
        assert_eq!(offsets, vec![ttl_at]);
        assert_eq!(ttl_at, record_start + PROTONMAIL.len() + 4);
    }
}
