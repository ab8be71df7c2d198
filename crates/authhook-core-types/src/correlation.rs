//! Correlation types for dispatch tracking
//!
//! Every lifecycle dispatch gets its own id so the start, per-command and end
//! log events of one player event can be grouped together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single lifecycle dispatch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(String);

impl DispatchId {
    /// Generate a new random DispatchId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
