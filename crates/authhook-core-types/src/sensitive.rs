//! Wrapper for values that must never appear in logs
//!
//! Player addresses and command arguments are personal data; wrapping them in
//! [`Sensitive`] makes every `Debug`, `Display` and `Serialize` rendering
//! print [`REDACTED`] while the value stays usable in code.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::REDACTED;

/// A value that formats as the redaction marker
///
/// ```
/// use authhook_core_types::{Sensitive, REDACTED};
/// use std::net::{IpAddr, Ipv4Addr};
///
/// let address = Sensitive::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)));
/// assert_eq!(address.to_string(), REDACTED);
/// assert!(address.expose().is_ipv4());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv6Addr};

    #[test]
    fn test_formatting_hides_value() {
        let password = Sensitive::new("hunter2");
        assert_eq!(format!("{:?}", password), REDACTED);
        assert_eq!(format!("{}", password), REDACTED);
    }

    #[test]
    fn test_value_still_accessible() {
        let address = Sensitive::new(IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert!(address.expose().is_loopback());
        assert_eq!(address.into_inner(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_nested_in_debug_struct() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Session {
            player: String,
            address: Sensitive<String>,
        }

        let session = Session {
            player: "Alex".to_string(),
            address: Sensitive::new("198.51.100.20".to_string()),
        };

        let text = format!("{:?}", session);
        assert!(text.contains("Alex"));
        assert!(text.contains(REDACTED));
        assert!(!text.contains("198.51.100.20"));
    }

    #[test]
    fn test_serializes_as_marker() {
        let json = serde_json::to_string(&Sensitive::new("198.51.100.20")).unwrap();
        assert_eq!(json, format!("\"{}\"", REDACTED));
    }
}
