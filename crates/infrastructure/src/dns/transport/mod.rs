//! Upstream wire transport: RFC 1035 §4.2.2 length-prefixed framing over a
//! stream, and the TLS dialer.

pub mod tls;

use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use umbra_dns_domain::DomainError;

/// Longest upstream reply we accept.
pub const MAX_REPLY_LEN: usize = 2048;

/// Write one DNS message with its 2-byte big-endian length prefix.
pub async fn write_frame<S>(stream: &mut S, message: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = (message.len() as u16).to_be_bytes();
    stream.write_all(&length).await?;
    stream.write_all(message).await?;
    stream.flush().await?;
    Ok(())
}

/// Read one length-prefixed DNS message.
pub async fn read_frame<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut length = [0u8; 2];
    stream.read_exact(&mut length).await?;
    let length = usize::from(u16::from_be_bytes(length));

    if length > MAX_REPLY_LEN {
        return Err(DomainError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("reply too large: {length} bytes"),
        )));
    }

    let mut message = vec![0u8; length];
    stream.read_exact(&mut message).await?;
    Ok(message)
}
