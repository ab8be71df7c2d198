//! File-backed command source
//!
//! Reads `<data_folder>/commands.yml` on every load, creating it from the
//! bundled default first when it does not exist.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use authhook_core::commands::CommandSource;
use authhook_core::{log_op_end, log_op_error, log_op_start, CommandConfig, LifecycleEvent};
use authhook_core_types::schema::{FIELD_DIGEST, FIELD_PATH, OP_LOAD_CONFIG};

use crate::config::{compute_config_digest, ensure_config_file, parse_commands_str, COMMANDS_FILE_NAME};
use crate::errors::{io_error, Result};

/// Loads `commands.yml` from a data folder
#[derive(Debug, Clone)]
pub struct YamlCommandSource {
    data_folder: PathBuf,
}

impl YamlCommandSource {
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
        }
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Location of the command file
    pub fn path(&self) -> PathBuf {
        self.data_folder.join(COMMANDS_FILE_NAME)
    }

    fn read(&self) -> Result<(CommandConfig, String)> {
        let path = ensure_config_file(&self.data_folder)?;
        let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let config = parse_commands_str(&content)?;
        Ok((config, compute_config_digest(&content)))
    }
}

impl CommandSource for YamlCommandSource {
    fn load(&self) -> Result<CommandConfig> {
        let started = Instant::now();
        let path = self.path();
        log_op_start!(OP_LOAD_CONFIG, { FIELD_PATH } = %path.display());

        match self.read() {
            Ok((config, digest)) => {
                log_op_end!(
                    OP_LOAD_CONFIG,
                    duration_ms = started.elapsed().as_millis() as u64,
                    { FIELD_PATH } = %path.display(),
                    { FIELD_DIGEST } = digest.as_str(),
                    on_join = config.commands(LifecycleEvent::Join).len(),
                    on_login = config.commands(LifecycleEvent::Login).len(),
                    on_register = config.commands(LifecycleEvent::Register).len(),
                );
                Ok(config)
            }
            Err(err) => {
                log_op_error!(
                    OP_LOAD_CONFIG,
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    { FIELD_PATH } = %path.display(),
                );
                Err(err)
            }
        }
    }
}
