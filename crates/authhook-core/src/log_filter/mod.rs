//! Sensitive-syntax enumeration and log filtering
//!
//! [`build_blacklist`] walks the descriptor tree once at startup and expands
//! every alias of every password-carrying command into its full invocation
//! prefix. [`LogFilter`] consults the result for each log line.

pub mod blacklist;
pub mod filter;

pub use blacklist::{build_blacklist, command_syntaxes, invocation_prefix, Blacklist};
pub use filter::{LogFilter, COMMAND_ISSUED_MARKER};
