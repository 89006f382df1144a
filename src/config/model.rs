use std::{net::IpAddr, time::Duration};

use serde::Serialize;

pub const DEFAULT_TIMEOUT_SECONDS: f64 = 5.0;
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_URL: &str = "http://example.com";

/// Settings read once at startup and shared by every stage of a probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Applied independently to DNS resolution, the TCP connect and the HTTP request.
    pub timeout: Duration,

    /// Method used when the event does not name one. Always uppercase.
    pub default_method: String,

    /// URL probed when the event does not name one.
    pub default_url: String,

    /// Name servers to query instead of the system resolver.
    pub dns_hosts: Option<Vec<IpAddr>>,

    /// Skip certificate verification for the HTTP request.
    pub accept_invalid_certs: bool,

    pub environment: EnvironmentSnapshot,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            default_method: DEFAULT_METHOD.to_string(),
            default_url: DEFAULT_URL.to_string(),
            dns_hosts: None,
            accept_invalid_certs: false,
            environment: EnvironmentSnapshot::default(),
        }
    }
}

/// Deployment metadata echoed verbatim into every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    pub subnet_ids: Option<String>,
    pub security_group_ids: Option<String>,
    pub execution_env: Option<String>,
    pub region: Option<String>,
}
