//! Structured logging facility for AuthHook
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Credential-safe initialization via `init_with_filter(profile, filter)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`, `log_op_warn!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use authhook_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error
//! - `log_op_warn!(op, err, ...)` - Log a failed step of a running operation

pub mod init;
pub mod macros;
pub mod redact;
pub mod test_capture;

pub use init::{init, init_with_filter, Profile};
pub use redact::{RedactingFields, RedactingMakeWriter, RedactingVisitor, RedactingWriter};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
