//! Hosts-style block list.

use compact_str::CompactString;
use dashmap::DashSet;
use regex::Regex;
use rustc_hash::FxBuildHasher;
use std::io::{BufRead, BufReader, Read};
use std::sync::LazyLock;
use tracing::info;
use umbra_dns_application::ports::BlocklistPort;
use umbra_dns_domain::DomainError;

/// Matches `<address><whitespace><hostname>` lines and captures the hostname;
/// comment lines and anything else fall through.
static HOST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^#].+\s+([A-Za-z\-0-9\.]+)$").expect("host line pattern compiles")
});

/// Exact-hostname sink list loaded from a hosts-style file. Immutable after
/// construction.
pub struct Blocklist {
    hosts: DashSet<CompactString, FxBuildHasher>,
}

impl Blocklist {
    pub fn from_file(path: &str) -> Result<Self, DomainError> {
        let file = std::fs::File::open(path)?;
        let blocklist = Self::from_reader(BufReader::new(file))?;
        info!(entries = blocklist.hosts.len(), "Loaded block list");
        Ok(blocklist)
    }

    /// Parse hosts-file lines, keeping only the hostname field. Malformed
    /// lines are skipped silently.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DomainError> {
        let hosts = DashSet::with_hasher(FxBuildHasher);

        for line in BufReader::new(reader).lines() {
            let line = line?;
            if let Some(captures) = HOST_LINE.captures(&line) {
                if let Some(host) = captures.get(1) {
                    hosts.insert(CompactString::from(host.as_str()));
                }
            }
        }

        Ok(Self { hosts })
    }
}

impl BlocklistPort for Blocklist {
    fn contains(&self, hostname: &str) -> bool {
        self.hosts.contains(hostname)
    }

    fn len(&self) -> usize {
        self.hosts.len()
    }
}
