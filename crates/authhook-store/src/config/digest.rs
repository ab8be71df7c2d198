//! Config digest
//!
//! SHA256 of the exact bytes that were parsed, logged on every load

use sha2::{Digest, Sha256};

/// Compute a hex SHA256 digest of a config document
pub fn compute_config_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
