//! Bundled default `commands.yml`

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, Result};

/// File name of the command configuration inside the data folder
pub const COMMANDS_FILE_NAME: &str = "commands.yml";

/// Contents written when the data folder has no `commands.yml`
pub const DEFAULT_COMMANDS_YML: &str = include_str!("../../resources/commands.yml");

/// Path of `commands.yml` in `data_folder`, creating it from the default if missing
///
/// An existing file is never overwritten.
///
/// # Errors
///
/// Returns `ConfigRead` if the folder or file cannot be created.
pub fn ensure_config_file(data_folder: &Path) -> Result<PathBuf> {
    let path = data_folder.join(COMMANDS_FILE_NAME);
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(data_folder).map_err(|e| io_error(data_folder, e))?;
    fs::write(&path, DEFAULT_COMMANDS_YML).map_err(|e| io_error(&path, e))?;
    tracing::info!(path = %path.display(), "created default command configuration");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_commands_str;

    #[test]
    fn test_default_resource_is_valid_and_empty() {
        let config = parse_commands_str(DEFAULT_COMMANDS_YML).unwrap();
        assert!(config.is_empty());
    }
}
