use std::collections::BTreeMap;
use std::error::Error;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};

use super::prelude::*;
use super::{failure, is_tls_error};
use crate::request::ProbeRequest;

type BoxError = Box<dyn Error + Send + Sync>;

/// Issue the probe request and describe whatever came back.
///
/// Every failure, from an invalid method to a TLS handshake error, is folded
/// into the returned [`HttpResult`].
pub async fn fetch(client: &Client, request: &ProbeRequest) -> HttpResult {
    match send(client, request).await {
        Ok(result) => {
            if let Some(response) = result.response() {
                log::debug!(
                    "{} {} returned {} ({} bytes)",
                    request.method,
                    request.url,
                    response.status,
                    response.body_length
                );
            }
            result
        }
        Err(err) => {
            let err: &(dyn Error + 'static) = &*err;
            let result = if is_tls_error(err) {
                HttpResult::Failed {
                    error: format!("TLS error: {}", failure(err)),
                    trace: None,
                }
            } else {
                HttpResult::Failed {
                    error: format!("Request failed: {}", failure(err)),
                    trace: super::trace(err),
                }
            };
            if let Some(error) = result.error() {
                log::warn!("{} {}: {error}", request.method, request.url);
            }
            result
        }
    }
}

async fn send(client: &Client, request: &ProbeRequest) -> Result<HttpResult, BoxError> {
    let method = Method::from_bytes(request.method.as_bytes())?;

    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        headers.append(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }

    let mut builder = client.request(method, request.url.as_str()).headers(headers);
    if !request.body.is_empty() {
        builder = builder.body(request.body.clone());
    }

    let response = builder.send().await?;

    let rejection = response.error_for_status_ref().err().map(|e| e.to_string());
    let status = response.status();
    let headers = collect_headers(response.headers());
    let reason = status.canonical_reason().unwrap_or_default().to_string();

    // An error status is still reported with what was received when its body cannot be read.
    let (body, rejection) = match (response.bytes().await, rejection) {
        (Ok(body), rejection) => (body.to_vec(), rejection),
        (Err(e), Some(error)) => {
            log::warn!("Failed to read body of {status} response from {}: {e}", request.url);
            (Vec::new(), Some(format!("{error}; reading body failed: {e}")))
        }
        (Err(e), None) => return Err(e.into()),
    };

    let response = HttpResponse::new(status.as_u16(), reason, headers, &body);

    Ok(match rejection {
        None => HttpResult::Response(response),
        Some(error) => HttpResult::Rejected { response, error },
    })
}

/// Flatten response headers, joining repeated names with `, `.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}
