use std::net::SocketAddr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of the raw TCP connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketResult {
    Connected { latency_ms: u64, peername: SocketAddr },
    Failed { error: String },
}

impl SocketResult {
    pub fn success(&self) -> bool {
        matches!(self, SocketResult::Connected { .. })
    }
}

// Both shapes carry an explicit `success` flag next to their own fields.
impl Serialize for SocketResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SocketResult::Connected { latency_ms, peername } => {
                let mut s = serializer.serialize_struct("SocketResult", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("latency_ms", latency_ms)?;
                s.serialize_field("peername", &peername.to_string())?;
                s.end()
            }
            SocketResult::Failed { error } => {
                let mut s = serializer.serialize_struct("SocketResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}
