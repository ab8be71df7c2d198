//! AuthHook Store - command configuration loading
//!
//! Provides:
//! - The `commands.yml` document format and its validating parser
//! - Materialization of the bundled default file in a data folder
//! - Content digests for correlating reloads with file versions
//! - [`YamlCommandSource`], the file-backed `CommandSource`

pub mod config;
pub mod errors;
pub mod source;

// Re-export key types
pub use config::{parse_commands_file, parse_commands_str, COMMANDS_FILE_NAME};
pub use errors::Result;
pub use source::YamlCommandSource;
