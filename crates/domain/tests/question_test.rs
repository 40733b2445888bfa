use umbra_dns_domain::{DomainError, Question, RecordType};

#[test]
fn test_record_type_round_trip() {
    for rt in [
        RecordType::A,
        RecordType::NS,
        RecordType::CNAME,
        RecordType::SOA,
        RecordType::PTR,
        RecordType::MX,
        RecordType::TXT,
        RecordType::AAAA,
        RecordType::SRV,
        RecordType::CERT,
        RecordType::CDNSKEY,
        RecordType::SVCB,
        RecordType::HTTPS,
        RecordType::ANY,
        RecordType::CAA,
    ] {
        assert_eq!(RecordType::from_u16(rt.to_u16()).unwrap(), rt);
    }
}

#[test]
fn test_unknown_record_type_is_rejected() {
    let err = RecordType::from_u16(999).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRecordType(999)));
}

#[test]
fn test_record_type_as_str() {
    assert_eq!(RecordType::A.as_str(), "A");
    assert_eq!(RecordType::CAA.as_str(), "CAA");
    assert_eq!(RecordType::HTTPS.to_string(), "HTTPS");
}

#[test]
fn test_question_fingerprint_covers_name_and_type() {
    let name_type_a = b"\x07example\x03com\x00\x00\x01".to_vec();
    let name_type_aaaa = b"\x07example\x03com\x00\x00\x1c".to_vec();

    let a = Question::new("example.com".to_string(), RecordType::A, name_type_a);
    let aaaa = Question::new("example.com".to_string(), RecordType::AAAA, name_type_aaaa);

    assert_ne!(a.fingerprint(), aaaa.fingerprint());
    assert_eq!(a.to_string(), "example.com A");
}
