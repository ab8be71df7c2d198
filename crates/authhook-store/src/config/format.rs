//! Command file format
//!
//! Defines the YAML structure of `commands.yml`:
//!
//! ```yaml
//! onLogin:
//!   welcome:
//!     command: 'broadcast %p has logged in'
//!     executor: CONSOLE
//! ```
//!
//! Sections and their entries are kept as ordered mappings; entry order is
//! execution order.

use serde::{Deserialize, Serialize};

/// One named entry of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommand {
    /// Command text, may contain placeholders
    pub command: String,

    /// `CONSOLE`, `PLAYER` or `ACTOR`; `PLAYER` when omitted
    #[serde(default)]
    pub executor: Option<String>,
}

/// A section's entries in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSection {
    pub entries: Vec<(String, RawCommand)>,
}
