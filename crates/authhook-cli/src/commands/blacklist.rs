//! Blacklist command
//!
//! Usage: authhook blacklist [--json]

use authhook_core::build_blacklist;
use authhook_core::descriptor::catalog::authme_commands;
use clap::Args;

#[derive(Debug, Args)]
pub struct BlacklistArgs {
    /// Print a JSON array instead of one quoted entry per line
    #[arg(long)]
    pub json: bool,
}

/// Execute blacklist command
pub fn execute(args: BlacklistArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blacklist = build_blacklist(&authme_commands()?);

    if args.json {
        let entries: Vec<&str> = blacklist.iter().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        // Quoted so the trailing space is visible
        for entry in blacklist.iter() {
            println!("\"{}\"", entry);
        }
    }

    Ok(())
}
