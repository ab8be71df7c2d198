//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::{Arc, Once};
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use super::redact::{RedactingFields, RedactingMakeWriter};
use crate::log_filter::LogFilter;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "authhook=debug",
            Profile::Production | Profile::Test => "authhook=info",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// It sets up the tracing subscriber based on the selected profile; output
/// goes to stderr.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// # Example
///
/// ```
/// use authhook_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| install(profile));
}

/// Initialize the logging facility with credential redaction
///
/// Same as [`init`], but sensitive command arguments never reach stderr.
/// Development output redacts each field value before formatting; Production
/// output redacts the string values of every JSON line, keeping it valid JSON.
pub fn init_with_filter(profile: Profile, filter: LogFilter) {
    INIT_ONCE.call_once(|| install_redacting(profile, Arc::new(filter)));
}

fn install(profile: Profile) {
    match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => install_test(),
    }
}

fn install_redacting(profile: Profile, filter: Arc<LogFilter>) {
    match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .fmt_fields(RedactingFields::with_shared(DefaultFields::new(), filter))
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(RedactingMakeWriter::with_shared(std::io::stderr, filter))
                .init();
        }
        Profile::Test => install_test(),
    }
}

fn install_test() {
    // Test capture is initialized separately via init_test_capture()
    let _ = tracing_subscriber::registry().try_init();
}
