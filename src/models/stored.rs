// Samples as the API keeps them: the posted JSON object, untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SystemSample;

/// A posted sample kept verbatim. Only `timestamp` is ever inspected; metric
/// sections, their value types and any extra fields pass through as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredSample(Map<String, Value>);

impl StoredSample {
    /// Wraps a JSON body; `None` unless the body is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The `timestamp` field when it is a string.
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp().is_some_and(|t| !t.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<&SystemSample> for StoredSample {
    fn from(sample: &SystemSample) -> Self {
        match serde_json::to_value(sample) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }
}

impl From<SystemSample> for StoredSample {
    fn from(sample: SystemSample) -> Self {
        Self::from(&sample)
    }
}
