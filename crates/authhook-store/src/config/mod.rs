//! `commands.yml` handling
//!
//! - [`format`]: the on-disk document shape
//! - [`parser`]: YAML parsing and validation into a `CommandConfig`
//! - [`resource`]: the bundled default file
//! - [`digest`]: content digests

pub mod digest;
pub mod format;
pub mod parser;
pub mod resource;

pub use digest::compute_config_digest;
pub use parser::{parse_commands_file, parse_commands_str};
pub use resource::{ensure_config_file, COMMANDS_FILE_NAME, DEFAULT_COMMANDS_YML};
