use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::lookup_host;
use tokio::time::timeout;
use trust_dns_resolver::TokioAsyncResolver;

use super::prelude::*;
use crate::config::{ProbeConfig, setup_resolver};
use crate::request::Target;

/// Where host names are resolved.
pub enum DnsResolver {
    /// The operating system resolver, the same one the TCP and HTTP stages use.
    System,
    /// Dedicated name servers queried over TCP.
    NameServers(TokioAsyncResolver),
}

impl DnsResolver {
    pub fn from_config(config: &ProbeConfig) -> Self {
        match &config.dns_hosts {
            Some(hosts) if !hosts.is_empty() => {
                DnsResolver::NameServers(setup_resolver(hosts, config.timeout))
            }
            _ => DnsResolver::System,
        }
    }

    async fn lookup(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, String> {
        match self {
            DnsResolver::System => lookup_host((host, port))
                .await
                .map(|addrs| addrs.collect())
                .map_err(|e| e.to_string()),
            DnsResolver::NameServers(resolver) => resolver
                .lookup_ip(host)
                .await
                .map(|lookup| lookup.iter().map(|ip| SocketAddr::new(ip, port)).collect())
                .map_err(|e| e.to_string()),
        }
    }
}

/// Resolve the target host to every available stream address.
/// Failures are reported in the result, never returned.
pub async fn resolve(resolver: &DnsResolver, target: &Target, limit: Duration) -> DnsResult {
    let outcome = match &target.host {
        None => failed("URL has no host"),
        Some(host) => match timeout(limit, resolver.lookup(host, target.port)).await {
            Ok(Ok(addrs)) if addrs.is_empty() => failed(&format!("no addresses found for {host}")),
            Ok(Ok(addrs)) => {
                log::debug!("Resolved {host} to {} address(es)", addrs.len());
                DnsOutcome::Resolved {
                    addresses: addrs.into_iter().map(AddressRecord::from).collect(),
                }
            }
            Ok(Err(e)) => failed(&e),
            Err(_) => failed(&format!("timed out after {limit:?}")),
        },
    };

    if let DnsOutcome::Failed { error } = &outcome {
        log::warn!("{error}");
    }

    DnsResult {
        host: target.host.clone(),
        port: target.port,
        outcome,
    }
}

fn failed(details: &str) -> DnsOutcome {
    DnsOutcome::Failed {
        error: format!("DNS resolution failed: {details}"),
    }
}
