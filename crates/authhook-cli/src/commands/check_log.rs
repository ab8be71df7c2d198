//! Check-log command
//!
//! Usage: authhook check-log <LINE>

use authhook_core::descriptor::catalog::authme_commands;
use authhook_core::{build_blacklist, LogFilter};
use clap::Args;

#[derive(Debug, Args)]
pub struct CheckLogArgs {
    /// Log line to check, e.g. "Bobby issued server command: /login secret"
    pub line: String,
}

/// Execute check-log command
pub fn execute(args: CheckLogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let filter = LogFilter::new(build_blacklist(&authme_commands()?));

    let verdict = if filter.is_sensitive_line(&args.line) {
        "SENSITIVE"
    } else {
        "OK"
    };
    println!("{}", verdict);
    println!("{}", filter.redact(&args.line));

    Ok(())
}
