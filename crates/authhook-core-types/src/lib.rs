//! Core types shared across AuthHook facilities
//!
//! This crate provides foundational types used by the dispatcher, the
//! error facility and the logging facility:
//!
//! - **Correlation types**: DispatchId
//! - **Sensitive data**: `Sensitive<T>` and the marker substituted for it in logs
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::DispatchId;
pub use sensitive::Sensitive;

/// Replacement text for redacted command arguments
pub const REDACTED: &str = "***REDACTED***";
