use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use umbra_dns_domain::{CliOverrides, Resolvers};
use umbra_dns_infrastructure::dns::UdpFrontend;
use umbra_dns_jobs::{CacheReaperJob, JobRunner};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "umbra-dns")]
#[command(version)]
#[command(about = "Caching DNS-to-DNS-over-TLS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Address to listen on for plaintext DNS over UDP
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// Hosts-style block list file
    #[arg(short = 'b', long, value_name = "FILE")]
    blocklist: Option<String>,

    /// Resolvers file (TOML with a top-level `resolvers` list)
    #[arg(short = 'r', long, value_name = "FILE")]
    resolvers: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen: cli.listen,
        no_cache: cli.no_cache,
        blocklist_file: cli.blocklist,
        resolvers_file: cli.resolvers,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting umbra-dns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;

    // Load the resolver list and register every entry on the outbound port.
    let resolvers = Resolvers::load(config.dns.resolvers_file.as_deref())?;
    let mut registered = 0usize;
    for resolver in resolvers.resolvers {
        match resolver.port() {
            Some(port) if port == config.server.outbound_port => {
                services.pool.add_upstream(resolver).await;
                registered += 1;
            }
            _ => warn!(
                host = %resolver.address,
                outbound_port = config.server.outbound_port,
                "Skipping resolver, port does not match outbound port"
            ),
        }
    }
    anyhow::ensure!(registered > 0, "no usable resolvers configured");

    let shutdown = CancellationToken::new();
    if let Some(cache) = &services.cache {
        JobRunner::new()
            .with_cache_reaper(
                CacheReaperJob::new(cache.clone()).with_interval(config.cache.reap_interval_secs),
            )
            .with_shutdown_token(shutdown.clone())
            .start()
            .await;
    }

    let listen_addr: SocketAddr = config.server.listen.parse()?;
    let frontend = Arc::new(
        UdpFrontend::bind(listen_addr, services.use_case.clone(), services.pool.clone()).await?,
    );

    tokio::spawn(Arc::clone(&frontend).run());

    wait_for_shutdown().await?;

    info!("Exiting...");
    info!(total = frontend.request_count(), "Total requests served");
    shutdown.cancel();

    Ok(())
}

/// Block until SIGINT or SIGTERM arrives.
#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
