use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AuthHookError;

/// Channel a resolved command is sent to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Executor {
    /// Run by the server console
    Console,
    /// Run as the acting player
    #[default]
    #[serde(alias = "ACTOR")]
    Player,
}

impl Executor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Executor::Console => "CONSOLE",
            Executor::Player => "PLAYER",
        }
    }
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Executor {
    type Err = AuthHookError;

    /// Parse an executor name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSOLE" => Ok(Executor::Console),
            "PLAYER" | "ACTOR" => Ok(Executor::Player),
            other => Err(AuthHookError::ConfigParse {
                reason: format!("unknown executor '{}', expected CONSOLE or PLAYER", other),
            }),
        }
    }
}

/// A command template and the channel that runs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    template: String,
    executor: Executor,
}

impl Command {
    pub fn new(template: impl Into<String>, executor: Executor) -> Self {
        Self {
            template: template.into(),
            executor,
        }
    }

    pub fn console(template: impl Into<String>) -> Self {
        Self::new(template, Executor::Console)
    }

    pub fn player(template: impl Into<String>) -> Self {
        Self::new(template, Executor::Player)
    }

    /// Command text; after resolution this is the text to execute
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }

    /// Same executor, different text
    pub fn with_template(&self, template: String) -> Self {
        Self {
            template,
            executor: self.executor,
        }
    }
}

/// Player lifecycle events that can trigger commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Join,
    Login,
    Register,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 3] = [
        LifecycleEvent::Join,
        LifecycleEvent::Login,
        LifecycleEvent::Register,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Join => "join",
            LifecycleEvent::Login => "login",
            LifecycleEvent::Register => "register",
        }
    }

    /// Name of the section holding this event's commands in `commands.yml`
    pub fn section(&self) -> &'static str {
        match self {
            LifecycleEvent::Join => "onJoin",
            LifecycleEvent::Login => "onLogin",
            LifecycleEvent::Register => "onRegister",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = AuthHookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| {
                event.as_str().eq_ignore_ascii_case(s) || event.section().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| AuthHookError::UnknownSection {
                section: s.to_string(),
            })
    }
}

/// Ordered commands per lifecycle event
///
/// Produced fresh by the configuration source on every reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandConfig {
    pub on_join: Vec<Command>,
    pub on_login: Vec<Command>,
    pub on_register: Vec<Command>,
}

impl CommandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style replacement of one event's commands
    pub fn with_commands(mut self, event: LifecycleEvent, commands: Vec<Command>) -> Self {
        *self.commands_mut(event) = commands;
        self
    }

    pub fn commands(&self, event: LifecycleEvent) -> &[Command] {
        match event {
            LifecycleEvent::Join => &self.on_join,
            LifecycleEvent::Login => &self.on_login,
            LifecycleEvent::Register => &self.on_register,
        }
    }

    pub fn commands_mut(&mut self, event: LifecycleEvent) -> &mut Vec<Command> {
        match event {
            LifecycleEvent::Join => &mut self.on_join,
            LifecycleEvent::Login => &mut self.on_login,
            LifecycleEvent::Register => &mut self.on_register,
        }
    }

    /// Total number of commands across all events
    pub fn len(&self) -> usize {
        self.on_join.len() + self.on_login.len() + self.on_register.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_parse_case_insensitive() {
        assert_eq!("console".parse::<Executor>().unwrap(), Executor::Console);
        assert_eq!("Player".parse::<Executor>().unwrap(), Executor::Player);
        assert_eq!("ACTOR".parse::<Executor>().unwrap(), Executor::Player);
        assert!("server".parse::<Executor>().is_err());
    }

    #[test]
    fn test_with_template_keeps_executor() {
        let cmd = Command::console("say %p");
        let resolved = cmd.with_template("say Alex".to_string());
        assert_eq!(resolved.executor(), Executor::Console);
        assert_eq!(resolved.template(), "say Alex");
    }

    #[test]
    fn test_lifecycle_from_section_or_name() {
        assert_eq!("onLogin".parse::<LifecycleEvent>().unwrap(), LifecycleEvent::Login);
        assert_eq!("register".parse::<LifecycleEvent>().unwrap(), LifecycleEvent::Register);
        assert!("onQuit".parse::<LifecycleEvent>().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = CommandConfig::new()
            .with_commands(LifecycleEvent::Join, vec![Command::player("spawn")])
            .with_commands(LifecycleEvent::Register, vec![Command::console("kit %p")]);

        assert_eq!(config.len(), 2);
        assert!(config.commands(LifecycleEvent::Login).is_empty());
        assert_eq!(config.commands(LifecycleEvent::Register)[0].template(), "kit %p");
    }
}
