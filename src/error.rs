use std::fmt::Write;

use thiserror::Error;

/// Failures that abort an invocation. Network stage failures never end up
/// here; they are embedded in the report instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid configuration for {name}: {reason}")]
    Config { name: &'static str, reason: String },

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read event: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Render an error together with its chain of causes.
pub fn report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    for cause in causes(err) {
        let _ = write!(s, "\n\nCaused by: {}", cause);
    }
    s
}

/// Iterate over the sources of `err`, nearest cause first.
pub fn causes<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> impl Iterator<Item = &'a (dyn std::error::Error + 'static)> {
    std::iter::successors(err.source(), |e| e.source())
}
