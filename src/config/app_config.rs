use std::env;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts},
};

use super::model::{DEFAULT_METHOD, DEFAULT_TIMEOUT_SECONDS, DEFAULT_URL, EnvironmentSnapshot, ProbeConfig};
use crate::error::ProbeError;

const USER_AGENT: &str = concat!("netdiag/", env!("CARGO_PKG_VERSION"));

/// Load the probe configuration from the process environment.
pub fn load_config() -> Result<ProbeConfig, ProbeError> {
    load_config_from(|name| env::var(name).ok())
}

/// Build the configuration from an arbitrary variable lookup.
/// Empty values are treated as unset.
pub fn load_config_from<F>(lookup: F) -> Result<ProbeConfig, ProbeError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let timeout = match var("HTTP_TIMEOUT_SECONDS") {
        Some(raw) => parse_timeout(&raw)?,
        None => Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
    };

    let default_method = var("DEFAULT_METHOD")
        .unwrap_or_else(|| DEFAULT_METHOD.to_string())
        .to_uppercase();
    let default_url = var("DEFAULT_URL").unwrap_or_else(|| DEFAULT_URL.to_string());

    let dns_hosts = var("DNS_HOSTS").map(|raw| parse_dns_hosts(&raw)).transpose()?;
    if let Some(hosts) = &dns_hosts {
        log::info!("Using DNS hosts: {:?}", hosts);
    }

    let accept_invalid_certs = match var("INSECURE_SKIP_TLS_VERIFY") {
        Some(raw) => parse_bool("INSECURE_SKIP_TLS_VERIFY", &raw)?,
        None => false,
    };

    let environment = EnvironmentSnapshot {
        subnet_ids: lookup("AWS_SUBNET_IDS"),
        security_group_ids: lookup("AWS_SECURITY_GROUP_IDS"),
        execution_env: lookup("AWS_EXECUTION_ENV"),
        region: lookup("AWS_REGION"),
    };

    Ok(ProbeConfig {
        timeout,
        default_method,
        default_url,
        dns_hosts,
        accept_invalid_certs,
        environment,
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ProbeError> {
    let invalid = |reason: String| ProbeError::Config {
        name: "HTTP_TIMEOUT_SECONDS",
        reason,
    };
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|e| invalid(format!("{raw:?}: {e}")))?;
    if seconds <= 0.0 {
        return Err(invalid(format!("{raw:?}: must be greater than zero")));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| invalid(format!("{raw:?}: {e}")))
}

fn parse_dns_hosts(raw: &str) -> Result<Vec<IpAddr>, ProbeError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|host| {
            host.parse().map_err(|e| ProbeError::Config {
                name: "DNS_HOSTS",
                reason: format!("{host:?}: {e}"),
            })
        })
        .collect()
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ProbeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ProbeError::Config {
            name,
            reason: format!("{other:?} is not a boolean"),
        }),
    }
}

/// Setup a DNS resolver that queries the given name servers over TCP.
/// A single attempt per server is made and caching is disabled, every probe
/// performs a fresh lookup.
pub fn setup_resolver(dns_hosts: &[IpAddr], timeout: Duration) -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.attempts = 1;
    opts.timeout = timeout;
    opts.cache_size = 0;

    let mut name_servers = NameServerConfigGroup::new();

    for ip in dns_hosts {
        name_servers.push(NameServerConfig {
            socket_addr: (*ip, 53).into(),
            protocol: Protocol::Tcp,
            tls_dns_name: None,
            trust_negative_responses: false,
            bind_addr: None,
        });
    }

    let resolver_config = ResolverConfig::from_parts(None, vec![], name_servers);
    TokioAsyncResolver::tokio(resolver_config, opts)
}

/// Setup the HTTP client used by the fetch stage.
pub fn setup_client(config: &ProbeConfig) -> Result<Client, ProbeError> {
    let client = Client::builder()
        .use_rustls_tls()
        .timeout(config.timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
