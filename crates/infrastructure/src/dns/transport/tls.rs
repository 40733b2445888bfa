//! TLS 1.3 dialer for upstream resolvers.

use rustls::pki_types::ServerName;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::debug;
use umbra_dns_domain::{DomainError, ResolverEntry};

const DIAL_TIMEOUT: Duration = Duration::from_secs(5);

static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = rustls::ClientConfig::builder_with_protocol_versions(&[&rustls::version::TLS13])
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

/// Dial `entry.address` and complete a TLS handshake presenting the
/// resolver's hostname as SNI. Connect and handshake each get a 5 s budget.
pub async fn dial(entry: &ResolverEntry) -> Result<TlsStream<TcpStream>, DomainError> {
    let connector = tokio_rustls::TlsConnector::from(SHARED_TLS_CONFIG.clone());

    let server_name = ServerName::try_from(entry.hostname.clone()).map_err(|e| {
        DomainError::DialFailed {
            host: entry.address.clone(),
            reason: format!("invalid tls hostname '{}': {}", entry.hostname, e),
        }
    })?;

    let tcp_stream = tokio::time::timeout(DIAL_TIMEOUT, TcpStream::connect(&entry.address))
        .await
        .map_err(|_| DomainError::DialFailed {
            host: entry.address.clone(),
            reason: "connect timeout".to_string(),
        })?
        .map_err(|e| DomainError::DialFailed {
            host: entry.address.clone(),
            reason: e.to_string(),
        })?;

    let tls_stream = tokio::time::timeout(DIAL_TIMEOUT, connector.connect(server_name, tcp_stream))
        .await
        .map_err(|_| DomainError::DialFailed {
            host: entry.address.clone(),
            reason: "handshake timeout".to_string(),
        })?
        .map_err(|e| DomainError::DialFailed {
            host: entry.address.clone(),
            reason: e.to_string(),
        })?;

    debug!(host = %entry.address, sni = %entry.hostname, "TLS connection established");
    Ok(tls_stream)
}
