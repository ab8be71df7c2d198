//! AuthHook CLI
//!
//! Command-line interface for inspecting AuthHook configuration

use authhook_core::descriptor::catalog::authme_commands;
use authhook_core::logging_facility::{init_with_filter, Profile};
use authhook_core::{build_blacklist, LogFilter};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "authhook")]
#[command(about = "AuthHook - lifecycle commands and log redaction", long_about = None)]
struct Cli {
    /// Emit diagnostic logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the command prefixes whose arguments are redacted from logs
    Blacklist(commands::blacklist::BlacklistArgs),
    /// Show the commands an event would run for a player
    Preview(commands::preview::PreviewArgs),
    /// Check a log line for sensitive command arguments
    CheckLog(commands::check_log::CheckLogArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let filter = authme_commands()
            .map(|tree| LogFilter::new(build_blacklist(&tree)))
            .unwrap_or_default();
        init_with_filter(Profile::Development, filter);
    }

    let result = match cli.command {
        Commands::Blacklist(args) => commands::blacklist::execute(args),
        Commands::Preview(args) => commands::preview::execute(args),
        Commands::CheckLog(args) => commands::check_log::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
