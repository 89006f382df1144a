use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The raw input of one invocation. Every field is optional; missing values
/// fall back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeEvent {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body: Option<EventBody>,
}

/// Request payload as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum EventBody {
    Text(String),
    Bytes(Vec<u8>),
    /// Any other document, sent as JSON.
    Structured(Value),
}

impl<'de> Deserialize<'de> for EventBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => EventBody::Text(text),
            other => EventBody::Structured(other),
        })
    }
}
