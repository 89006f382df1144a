use std::net::SocketAddr;

use serde::Serialize;

const IPPROTO_TCP: u8 = 6;

/// Outcome of resolving the target host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsResult {
    pub host: Option<String>,
    pub port: u16,
    #[serde(flatten)]
    pub outcome: DnsOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DnsOutcome {
    Resolved { addresses: Vec<AddressRecord> },
    Failed { error: String },
}

impl DnsResult {
    pub fn addresses(&self) -> Option<&[AddressRecord]> {
        match &self.outcome {
            DnsOutcome::Resolved { addresses } => Some(addresses),
            DnsOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            DnsOutcome::Resolved { .. } => None,
            DnsOutcome::Failed { error } => Some(error),
        }
    }
}

/// One resolved stream address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    pub family: &'static str,
    pub socktype: &'static str,
    pub protocol: u8,
    pub address: String,
}

impl From<SocketAddr> for AddressRecord {
    fn from(addr: SocketAddr) -> Self {
        AddressRecord {
            family: if addr.is_ipv4() { "AF_INET" } else { "AF_INET6" },
            socktype: "SOCK_STREAM",
            protocol: IPPROTO_TCP,
            address: addr.ip().to_string(),
        }
    }
}
