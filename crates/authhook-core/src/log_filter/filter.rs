use std::borrow::Cow;

use authhook_core_types::REDACTED;

use super::blacklist::Blacklist;

/// Text the server writes before a player's command in its log
pub const COMMAND_ISSUED_MARKER: &str = "issued server command:";

/// Decides whether a log line carries a credential and redacts it
///
/// A line is sensitive when it starts with a blacklisted invocation, or when
/// the command after the "issued server command:" marker does.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    blacklist: Blacklist,
}

impl LogFilter {
    pub fn new(blacklist: Blacklist) -> Self {
        Self { blacklist }
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Whether a raw command invocation (`/login secret`) is sensitive
    pub fn is_sensitive_command(&self, command: &str) -> bool {
        self.blacklist.matches(command.trim_start())
    }

    /// Whether a log line contains a sensitive invocation
    pub fn is_sensitive_line(&self, line: &str) -> bool {
        self.arguments_start(line).is_some()
    }

    /// Keep the invocation prefix and replace everything after it
    ///
    /// Non-sensitive lines are returned unchanged. A trailing line terminator
    /// is preserved.
    pub fn redact<'l>(&self, line: &'l str) -> Cow<'l, str> {
        let Some(args_start) = self.arguments_start(line) else {
            return Cow::Borrowed(line);
        };

        let rest = &line[args_start..];
        let body_len = rest.trim_end_matches(['\r', '\n']).len();
        let terminator = &rest[body_len..];
        Cow::Owned(format!("{}{}{}", &line[..args_start], REDACTED, terminator))
    }

    /// Byte offset where the arguments of a sensitive invocation begin
    fn arguments_start(&self, line: &str) -> Option<usize> {
        command_starts(line).find_map(|start| {
            self.blacklist
                .matching_entry(&line[start..])
                .map(|entry| start + entry.len())
        })
    }
}

/// Offsets in `line` where a command may begin
fn command_starts(line: &str) -> impl Iterator<Item = usize> {
    let leading = leading_whitespace(line);
    let after_marker = line
        .to_ascii_lowercase()
        .find(COMMAND_ISSUED_MARKER)
        .map(|index| {
            let after = index + COMMAND_ISSUED_MARKER.len();
            after + leading_whitespace(&line[after..])
        });
    std::iter::once(leading).chain(after_marker)
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}
