pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::fetch;
    pub use super::result::{BODY_SAMPLE_LIMIT, HttpResponse, HttpResult};
}

use std::error::Error;

use crate::error::causes;

const TRACE_DEPTH: usize = 2;
const TLS_MARKERS: [&str; 4] = ["tls", "ssl", "certificate", "handshake"];

/// Whether a TLS failure appears anywhere in the error chain.
fn is_tls_error(err: &(dyn Error + 'static)) -> bool {
    if std::iter::once(err).chain(causes(err)).any(is_rustls_error) {
        return true;
    }
    // The outermost error may echo the URL, only look for markers in its causes.
    causes(err).any(|e| {
        let message = e.to_string().to_ascii_lowercase();
        TLS_MARKERS.iter().any(|marker| message.contains(marker))
    })
}

// `io::Error` reports the source of the error it wraps, not the wrapped
// error itself, and rustls errors usually sit several `io::Error` layers deep.
fn is_rustls_error(err: &(dyn Error + 'static)) -> bool {
    let mut current: &(dyn Error + 'static) = err;
    loop {
        if current.is::<rustls::Error>() {
            return true;
        }
        let inner = current
            .downcast_ref::<std::io::Error>()
            .and_then(|io| io.get_ref())
            .map(|inner| inner as &(dyn Error + 'static));
        match inner {
            Some(inner) => current = inner,
            None => return false,
        }
    }
}

/// One line summary: the error and, when different, its innermost cause.
fn failure(err: &(dyn Error + 'static)) -> String {
    match causes(err).last() {
        Some(root) => format!("{err}: {root}"),
        None => err.to_string(),
    }
}

/// The first levels of the cause chain.
fn trace(err: &(dyn Error + 'static)) -> Option<String> {
    let frames: Vec<String> = causes(err)
        .take(TRACE_DEPTH)
        .map(|cause| format!("Caused by: {cause}"))
        .collect();
    (!frames.is_empty()).then(|| frames.join("\n"))
}
