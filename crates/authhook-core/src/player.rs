//! The acting player as seen by command hooks

use std::net::IpAddr;

/// A connected player that triggered a lifecycle event
///
/// Implemented by the host. Every method must be cheap except where noted;
/// the expensive lookups derived from a player (country) live in tags.
pub trait Player: Send + Sync {
    /// Account name
    fn name(&self) -> &str;

    /// Display name as shown in chat; defaults to the account name
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Remote address of the connection, if known
    fn address(&self) -> Option<IpAddr>;
}
