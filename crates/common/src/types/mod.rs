use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by every section write endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WriteResult {
    pub success: bool,
    pub message: String,
}

impl WriteResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
