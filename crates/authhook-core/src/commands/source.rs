use std::sync::{Arc, Mutex};

use super::model::CommandConfig;
use crate::errors::{AuthHookError, Result};

/// Supplies a freshly parsed [`CommandConfig`] on every reload
pub trait CommandSource: Send + Sync {
    /// Read and parse the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is malformed.
    fn load(&self) -> Result<CommandConfig>;
}

impl<S: CommandSource + ?Sized> CommandSource for Arc<S> {
    fn load(&self) -> Result<CommandConfig> {
        (**self).load()
    }
}

/// In-memory source, swappable for tests and embedders
#[derive(Debug)]
pub struct StaticCommandSource {
    next: Mutex<Result<CommandConfig>>,
}

impl StaticCommandSource {
    pub fn new(config: CommandConfig) -> Self {
        Self {
            next: Mutex::new(Ok(config)),
        }
    }

    /// Make subsequent loads return `config`
    pub fn set(&self, config: CommandConfig) {
        self.replace(Ok(config));
    }

    /// Make subsequent loads fail with `err`
    pub fn fail_with(&self, err: AuthHookError) {
        self.replace(Err(err));
    }

    fn replace(&self, next: Result<CommandConfig>) {
        let mut slot = self.next.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = next;
    }
}

impl CommandSource for StaticCommandSource {
    fn load(&self) -> Result<CommandConfig> {
        self.next
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::model::{Command, LifecycleEvent};

    #[test]
    fn test_static_source_switches_between_outcomes() {
        let source = StaticCommandSource::new(CommandConfig::default());
        assert_eq!(source.load().unwrap(), CommandConfig::default());

        source.fail_with(AuthHookError::ConfigParse {
            reason: "tab in indentation".to_string(),
        });
        assert!(source.load().is_err());

        let config = CommandConfig::new()
            .with_commands(LifecycleEvent::Login, vec![Command::console("say %p")]);
        source.set(config.clone());
        assert_eq!(source.load().unwrap(), config);
    }

    #[test]
    fn test_shared_source_loads_through_arc() {
        let source = Arc::new(StaticCommandSource::new(CommandConfig::default()));
        let boxed: Box<dyn CommandSource> = Box::new(Arc::clone(&source));
        source.fail_with(AuthHookError::Internal {
            message: "gone".to_string(),
        });
        assert!(boxed.load().is_err());
    }
}
