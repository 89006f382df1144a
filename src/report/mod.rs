//! Runs every probe stage for one event and merges the outcomes into a
//! [`DiagnosticReport`].

use std::collections::BTreeMap;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::{EnvironmentSnapshot, ProbeConfig, setup_client};
use crate::dns_probe::prelude::*;
use crate::error::ProbeError;
use crate::http_probe::prelude::*;
use crate::request::{ProbeEvent, ProbeRequest, Target, build_request};
use crate::tcp_probe::prelude::*;

/// The complete outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub input: InputEcho,
    pub dns: DnsResult,
    /// `None` when the URL yields no host to connect to.
    pub socket: Option<SocketResult>,
    pub http: HttpResult,
    pub environment: EnvironmentSnapshot,
}

/// The normalized request, without its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputEcho {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body_length: usize,
}

impl From<&ProbeRequest> for InputEcho {
    fn from(request: &ProbeRequest) -> Self {
        InputEcho {
            url: request.url.clone(),
            method: request.method.clone(),
            headers: request.headers.clone(),
            body_length: request.body.len(),
        }
    }
}

/// Merge the stage outcomes. Failed stages are carried as data.
pub fn assemble(
    request: &ProbeRequest,
    dns: DnsResult,
    socket: Option<SocketResult>,
    http: HttpResult,
    environment: EnvironmentSnapshot,
) -> DiagnosticReport {
    DiagnosticReport {
        input: InputEcho::from(request),
        dns,
        socket,
        http,
        environment,
    }
}

/// Long lived state shared by invocations: configuration, resolver and HTTP client.
pub struct Prober {
    config: ProbeConfig,
    resolver: DnsResolver,
    client: Client,
}

impl Prober {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = setup_client(&config)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ProbeConfig, client: Client) -> Self {
        let resolver = DnsResolver::from_config(&config);
        Prober {
            config,
            resolver,
            client,
        }
    }

    /// Run DNS, TCP and HTTP checks for `event`, in that order.
    ///
    /// Only an event that cannot be normalized fails; every network failure
    /// is reported inside the returned report.
    pub async fn handle(&self, event: ProbeEvent) -> Result<DiagnosticReport, ProbeError> {
        let request = build_request(event, &self.config)?;
        let target = Target::from_url(&request.url);
        log::info!(
            "Probing {} {} (host: {:?}, port: {})",
            request.method,
            request.url,
            target.host,
            target.port
        );

        let timeout = self.config.timeout;
        let dns = resolve(&self.resolver, &target, timeout).await;

        let socket = match &target.host {
            Some(host) => Some(check_connect(host, target.port, timeout).await),
            None => {
                log::warn!("Skipping TCP check, {} has no host", request.url);
                None
            }
        };

        let http = fetch(&self.client, &request).await;

        Ok(assemble(
            &request,
            dns,
            socket,
            http,
            self.config.environment.clone(),
        ))
    }

    /// Like [`Prober::handle`], for an untyped event document. `null` is the empty event.
    pub async fn handle_value(&self, event: Value) -> Result<DiagnosticReport, ProbeError> {
        let event = match event {
            Value::Null => ProbeEvent::default(),
            Value::Object(_) => serde_json::from_value(event)
                .map_err(|e| ProbeError::InvalidEvent(e.to_string()))?,
            other => {
                return Err(ProbeError::InvalidEvent(format!(
                    "expected a mapping, got {other}"
                )));
            }
        };
        self.handle(event).await
    }
}
