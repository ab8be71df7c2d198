use crate::errors::Result;
use crate::player::Player;

/// Host primitive that executes resolved command text
///
/// Both calls are fire-and-forget from the dispatcher's point of view: an
/// error is logged and the next command still runs.
pub trait ExecutionChannel: Send + Sync {
    /// Run `command` as the server console
    fn dispatch_console_command(&self, command: &str) -> Result<()>;

    /// Run `command` on behalf of `player`
    fn dispatch_command(&self, player: &dyn Player, command: &str) -> Result<()>;
}
