// JSON bodies returned by the API besides samples

use serde::{Deserialize, Serialize};

/// `{ "message": "..." }` used for errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a 201 on POST /stats: acknowledgement plus the history size after the insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestAck {
    pub message: String,
    pub stored: usize,
}

impl IngestAck {
    pub const MESSAGE: &'static str = "Stats received successfully.";

    pub fn new(stored: usize) -> Self {
        Self {
            message: Self::MESSAGE.into(),
            stored,
        }
    }
}

/// GET /ips response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpList {
    pub ips: Vec<String>,
}
