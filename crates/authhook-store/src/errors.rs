//! Error helpers for authhook-store
//!
//! Loader failures are reported as core `AuthHookError` values so they flow
//! through `CommandSource::load` unchanged.

use std::path::Path;

use authhook_core::errors::AuthHookError;

pub use authhook_core::errors::Result;

/// Create a YAML or document-shape error
pub fn config_parse(reason: impl Into<String>) -> AuthHookError {
    AuthHookError::ConfigParse {
        reason: reason.into(),
    }
}

/// Create an error for an invalid entry within a section
pub fn config_validation(section: &str, name: &str, reason: impl Into<String>) -> AuthHookError {
    AuthHookError::InvalidCommand {
        section: section.to_string(),
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Create an IO error for a config path
pub fn io_error(path: &Path, err: std::io::Error) -> AuthHookError {
    AuthHookError::ConfigRead {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authhook_core::errors::{ExError, ExErrorKind};

    #[test]
    fn test_helpers_map_to_stable_kinds() {
        let parse: ExError = config_parse("bad").into();
        assert_eq!(parse.kind(), ExErrorKind::Serialization);

        let invalid: ExError = config_validation("onJoin", "welcome", "empty").into();
        assert_eq!(invalid.kind(), ExErrorKind::InvalidCommand);

        let io = io_error(
            Path::new("/nowhere/commands.yml"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(io, AuthHookError::ConfigRead { ref path, .. } if path.ends_with("commands.yml")));
    }
}
