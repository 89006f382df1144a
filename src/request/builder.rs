use std::collections::BTreeMap;

use url::{Host, Url};

use super::event::{EventBody, ProbeEvent};
use crate::config::ProbeConfig;
use crate::error::ProbeError;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// The normalized outbound check.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub url: String,
    /// Always uppercase.
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Normalize an event into a request, filling in configured defaults.
///
/// Structured bodies are encoded as JSON and get an `application/json`
/// content type unless the caller already set one.
pub fn build_request(event: ProbeEvent, config: &ProbeConfig) -> Result<ProbeRequest, ProbeError> {
    let url = event
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| config.default_url.clone());
    let method = event
        .method
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| config.default_method.clone())
        .to_uppercase();
    let mut headers = event.headers.unwrap_or_default();

    let body = match event.body {
        None => Vec::new(),
        Some(EventBody::Text(text)) => text.into_bytes(),
        Some(EventBody::Bytes(bytes)) => bytes,
        Some(EventBody::Structured(value)) => {
            let encoded = serde_json::to_vec(&value)?;
            if !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE)) {
                headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
            }
            encoded
        }
    };

    Ok(ProbeRequest {
        url,
        method,
        headers,
        body,
    })
}

/// Host and port the DNS and TCP stages aim at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// `None` when the URL does not parse or carries no host.
    pub host: Option<String>,
    pub port: u16,
}

impl Target {
    pub fn from_url(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => {
                let host = url.host().map(|host| match host {
                    Host::Domain(domain) => domain.to_string(),
                    Host::Ipv4(ip) => ip.to_string(),
                    Host::Ipv6(ip) => ip.to_string(),
                });
                // `Url` drops a port equal to the scheme default, so ask for the
                // known default before falling back.
                let port = url
                    .port_or_known_default()
                    .unwrap_or_else(|| default_port(url.scheme()));
                Target { host, port }
            }
            Err(e) => {
                log::debug!("Cannot parse {raw:?} as URL: {e}");
                let scheme = raw.split_once(':').map(|(s, _)| s).unwrap_or_default();
                Target {
                    host: None,
                    port: default_port(scheme),
                }
            }
        }
    }
}

fn default_port(scheme: &str) -> u16 {
    if scheme.eq_ignore_ascii_case("https") { 443 } else { 80 }
}
