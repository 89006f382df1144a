use std::collections::BTreeMap;

use serde::Serialize;

/// Number of body bytes echoed back in `body_sample`.
pub const BODY_SAMPLE_LIMIT: usize = 1024;

/// Everything observed from a received response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: BTreeMap<String, String>,
    pub body_sample: String,
    pub body_length: usize,
}

impl HttpResponse {
    pub fn new(status: u16, reason: String, headers: BTreeMap<String, String>, body: &[u8]) -> Self {
        let sample = &body[..body.len().min(BODY_SAMPLE_LIMIT)];
        HttpResponse {
            status,
            reason,
            headers,
            body_sample: String::from_utf8_lossy(sample).into_owned(),
            body_length: body.len(),
        }
    }
}

/// Outcome of the HTTP request. The variants serialize without a tag; which
/// fields are present tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HttpResult {
    /// A response with a non-error status.
    Response(HttpResponse),

    /// A response whose status (4xx or 5xx) counts as a failure.
    Rejected {
        #[serde(flatten)]
        response: HttpResponse,
        error: String,
    },

    /// No response was obtained.
    Failed {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
    },
}

impl HttpResult {
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            HttpResult::Response(response) | HttpResult::Rejected { response, .. } => Some(response),
            HttpResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            HttpResult::Response(_) => None,
            HttpResult::Rejected { error, .. } | HttpResult::Failed { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_body_sample_is_truncated_and_lossy() {
        let mut body = vec![b'a'; BODY_SAMPLE_LIMIT - 1];
        // A two byte sequence cut in half by the sample limit.
        body.extend_from_slice("é".as_bytes());
        body.extend_from_slice(b"tail");

        let response = HttpResponse::new(200, "OK".to_string(), BTreeMap::new(), &body);
        assert_eq!(response.body_length, BODY_SAMPLE_LIMIT + 5);
        assert!(response.body_sample.ends_with('\u{FFFD}'));
        assert!(response.body_sample.starts_with("aaa"));
    }

    #[test]
    fn test_serialized_shapes() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        let response = HttpResponse::new(404, "Not Found".to_string(), headers, b"missing");

        assert_eq!(
            serde_json::to_value(HttpResult::Response(response.clone())).unwrap(),
            json!({
                "status": 404,
                "reason": "Not Found",
                "headers": { "content-type": "text/plain" },
                "body_sample": "missing",
                "body_length": 7,
            })
        );

        let rejected = HttpResult::Rejected {
            response,
            error: "HTTP status client error".to_string(),
        };
        let value = serde_json::to_value(&rejected).unwrap();
        assert_eq!(value["status"], 404);
        assert_eq!(value["error"], "HTTP status client error");

        let failed = HttpResult::Failed {
            error: "TLS error: bad certificate".to_string(),
            trace: None,
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "error": "TLS error: bad certificate" })
        );
        assert!(failed.response().is_none());
    }
}
