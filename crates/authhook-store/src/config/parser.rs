//! Command file parser with validation
//!
//! Parses YAML and validates section names, command text and executors.
//! Any invalid entry rejects the whole document.

use std::fs;
use std::path::Path;

use authhook_core::errors::AuthHookError;
use authhook_core::{Command, CommandConfig, Executor, LifecycleEvent};
use serde_yaml::{Mapping, Value};

use crate::config::format::{RawCommand, RawSection};
use crate::errors::{config_parse, config_validation, io_error, Result};

/// Parse a command file from a path
///
/// # Errors
///
/// Returns `ConfigRead` if the file cannot be read, otherwise the errors of
/// [`parse_commands_str`].
pub fn parse_commands_file(path: &Path) -> Result<CommandConfig> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_commands_str(&content)
}

/// Parse a command file from a string
///
/// # Errors
///
/// Returns `ConfigParse` for malformed YAML, `UnknownSection` for a
/// top-level key other than `onJoin`, `onLogin` or `onRegister`, and
/// `InvalidCommand` for an entry that fails validation.
pub fn parse_commands_str(content: &str) -> Result<CommandConfig> {
    if content.trim().is_empty() {
        return Ok(CommandConfig::default());
    }

    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| config_parse(format!("YAML parse error: {}", e)))?;

    let mut config = CommandConfig::new();
    for (event, section) in read_sections(document)? {
        *config.commands_mut(event) = validate_section(event, section)?;
    }
    Ok(config)
}

fn read_sections(document: Value) -> Result<Vec<(LifecycleEvent, RawSection)>> {
    let top = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(config_parse(format!(
                "Expected a mapping of sections, found {}",
                describe(&other)
            )))
        }
    };

    let mut sections = Vec::with_capacity(top.len());
    for (key, value) in top {
        let name = key_to_string(&key)?;
        let event = LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.section() == name)
            .ok_or(AuthHookError::UnknownSection {
                section: name.clone(),
            })?;
        sections.push((event, read_section(event, value)?));
    }
    Ok(sections)
}

fn read_section(event: LifecycleEvent, value: Value) -> Result<RawSection> {
    let mapping = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(config_parse(format!(
                "Section {} must be a mapping of named commands, found {}",
                event.section(),
                describe(&other)
            )))
        }
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key_to_string(&key)?;
        let command: RawCommand = serde_yaml::from_value(value)
            .map_err(|e| config_validation(event.section(), &name, e.to_string()))?;
        entries.push((name, command));
    }
    Ok(RawSection { entries })
}

fn validate_section(event: LifecycleEvent, section: RawSection) -> Result<Vec<Command>> {
    section
        .entries
        .into_iter()
        .map(|(name, raw)| validate_command(event.section(), &name, raw))
        .collect()
}

fn validate_command(section: &str, name: &str, raw: RawCommand) -> Result<Command> {
    if raw.command.trim().is_empty() {
        return Err(config_validation(section, name, "Command must not be empty"));
    }
    if raw.command.trim_start().starts_with('/') {
        return Err(config_validation(
            section,
            name,
            "Command must not start with '/'",
        ));
    }

    let executor = match raw.executor.as_deref() {
        None => Executor::default(),
        Some(text) => text.parse::<Executor>().map_err(|_| {
            config_validation(
                section,
                name,
                format!("Unknown executor '{}', expected CONSOLE or PLAYER", text),
            )
        })?,
    };

    Ok(Command::new(raw.command, executor))
}

fn key_to_string(key: &Value) -> Result<String> {
    match key {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(config_parse(format!(
            "Expected a scalar key, found {}",
            describe(other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_entry_order() {
        let yaml = r#"
onLogin:
  zeta:
    command: 'first %p'
    executor: CONSOLE
  alpha:
    command: 'second'
"#;
        let config = parse_commands_str(yaml).unwrap();
        assert_eq!(
            config.on_login,
            vec![Command::console("first %p"), Command::player("second")]
        );
        assert!(config.on_join.is_empty());
        assert!(config.on_register.is_empty());
    }

    #[test]
    fn test_executor_aliases() {
        let yaml = r#"
onJoin:
  a: { command: 'x', executor: console }
  b: { command: 'y', executor: Actor }
  c: { command: 'z', executor: PLAYER }
"#;
        let executors: Vec<Executor> = parse_commands_str(yaml)
            .unwrap()
            .on_join
            .iter()
            .map(Command::executor)
            .collect();
        assert_eq!(
            executors,
            vec![Executor::Console, Executor::Player, Executor::Player]
        );
    }

    #[test]
    fn test_empty_section_and_document() {
        assert!(parse_commands_str("").unwrap().is_empty());
        assert!(parse_commands_str("  \n").unwrap().is_empty());
        assert!(parse_commands_str("onJoin:\nonLogin: {}\n").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_commands_str("onQuit: {}\n").unwrap_err();
        assert_eq!(
            err,
            AuthHookError::UnknownSection {
                section: "onQuit".to_string()
            }
        );
    }

    #[test]
    fn test_leading_slash_rejected() {
        let err = parse_commands_str("onJoin:\n  a:\n    command: '/spawn'\n").unwrap_err();
        assert!(matches!(
            err,
            AuthHookError::InvalidCommand { ref section, ref name, .. }
                if section == "onJoin" && name == "a"
        ));
    }

    #[test]
    fn test_blank_command_rejected() {
        let err = parse_commands_str("onRegister:\n  a:\n    command: '   '\n").unwrap_err();
        assert!(matches!(err, AuthHookError::InvalidCommand { .. }));
    }

    #[test]
    fn test_unknown_executor_rejected() {
        let err =
            parse_commands_str("onJoin:\n  a:\n    command: 'x'\n    executor: SERVER\n")
                .unwrap_err();
        assert!(matches!(err, AuthHookError::InvalidCommand { ref reason, .. } if reason.contains("SERVER")));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = parse_commands_str("onJoin: [unclosed\n").unwrap_err();
        assert!(matches!(err, AuthHookError::ConfigParse { .. }));
    }

    #[test]
    fn test_non_mapping_document_rejected() {
        let err = parse_commands_str("- onJoin\n").unwrap_err();
        assert!(matches!(err, AuthHookError::ConfigParse { ref reason } if reason.contains("a list")));
    }
}
