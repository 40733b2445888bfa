#![allow(dead_code)]

//! Wire-format DNS response builder for tests.

pub struct ResponseBuilder {
    buf: Vec<u8>,
    answers: u16,
    authority: u16,
    additional: u16,
}

impl ResponseBuilder {
    pub fn new(transaction_id: u16) -> Self {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&transaction_id.to_be_bytes());
        buf.extend_from_slice(&0x8180u16.to_be_bytes());
        buf.extend_from_slice(&[0u8; 8]);
        Self {
            buf,
            answers: 0,
            authority: 0,
            additional: 0,
        }
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        for label in name.split('.') {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.buf.push(0);
        self.buf.extend_from_slice(&qtype.to_be_bytes());
        self.buf.extend_from_slice(&1u16.to_be_bytes());
        self
    }

    /// Append an answer record whose NAME is a pointer to the question name.
    pub fn answer(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.push_record(rtype, ttl, rdata);
        self.answers += 1;
        self
    }

    /// Append an authority record whose NAME is a pointer to the question name.
    pub fn authority(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.push_record(rtype, ttl, rdata);
        self.authority += 1;
        self
    }

    /// Append a resource record whose NAME is a compression pointer to the
    /// question name (offset 12), followed by TYPE, CLASS, TTL, RDLENGTH, RDATA.
    fn push_record(&mut self, rtype: u16, ttl: u32, rdata: &[u8]) {
        self.buf.extend_from_slice(&[0xc0, 0x0c]);
        self.buf.extend_from_slice(&rtype.to_be_bytes());
        self.buf.extend_from_slice(&1u16.to_be_bytes());
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(rdata);
    }

    /// Append an OPT pseudo-record to the additional section.
    pub fn opt_additional(mut self) -> Self {
        self.buf.push(0);
        self.buf.extend_from_slice(&41u16.to_be_bytes());
        self.buf.extend_from_slice(&4096u16.to_be_bytes());
        self.buf.extend_from_slice(&0u32.to_be_bytes());
        self.buf.extend_from_slice(&0u16.to_be_bytes());
        self.additional += 1;
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.buf[4..6].copy_from_slice(&1u16.to_be_bytes());
        self.buf[6..8].copy_from_slice(&self.answers.to_be_bytes());
        self.buf[8..10].copy_from_slice(&self.authority.to_be_bytes());
        self.buf[10..12].copy_from_slice(&self.additional.to_be_bytes());
        self.buf
    }
}

/// Name-shaped RDATA of exactly `total` bytes: a compression pointer when
/// only two bytes fit, otherwise a single label plus terminator.
pub fn name_rdata(total: usize) -> Vec<u8> {
    assert!((2..=65).contains(&total), "rdata length out of range");

    if total == 2 {
        return vec![0xc0, 0x0c];
    }

    let label_len = total - 2;
    let mut rdata = Vec::with_capacity(total);
    rdata.push(label_len as u8);
    rdata.extend(std::iter::repeat(b'a').take(label_len));
    rdata.push(0x00);
    rdata
}
