//! Event Dispatcher
//!
//! Entry points invoked by the host on player lifecycle events. Each call
//! takes the current snapshot once, resolves that event's commands for the
//! player, and sends them to the execution channel in configured order.

use std::sync::Arc;
use std::time::Instant;

use authhook_core_types::schema::{
    FIELD_ADDRESS, FIELD_COMMAND_COUNT, FIELD_DISPATCH_ID, FIELD_EXECUTOR, FIELD_FAILED_COUNT,
    FIELD_INDEX, FIELD_LIFECYCLE, FIELD_PLAYER, FIELD_REVISION, OP_DISPATCH, OP_RELOAD,
};
use authhook_core_types::{DispatchId, Sensitive};

use super::channel::ExecutionChannel;
use super::model::{Command, Executor, LifecycleEvent};
use super::source::CommandSource;
use super::store::{CommandSnapshot, CommandStore};
use super::Reloadable;
use crate::errors::{ExError, Result};
use crate::geoip::GeoIpLookup;
use crate::player::Player;
use crate::tags::{build_available_tags, PlayerTag};
use crate::{log_op_end, log_op_error, log_op_start, log_op_warn};

/// Summary of one lifecycle dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub dispatch_id: DispatchId,
    pub event: LifecycleEvent,
    /// Revision of the snapshot the dispatch ran against
    pub revision: u64,
    /// Commands handed to the execution channel
    pub executed: usize,
    /// Commands the channel reported as failed
    pub failed: usize,
}

/// Runs configured commands when players join, log in or register
pub struct CommandManager {
    store: CommandStore,
    channel: Arc<dyn ExecutionChannel>,
    source: Box<dyn CommandSource>,
}

impl CommandManager {
    /// Create a manager with the standard tag registry and load the configuration
    ///
    /// # Errors
    ///
    /// Returns the source's error if the initial load fails.
    pub fn new(
        geoip: Arc<dyn GeoIpLookup>,
        channel: Arc<dyn ExecutionChannel>,
        source: Box<dyn CommandSource>,
    ) -> Result<Self> {
        Self::with_tags(build_available_tags(geoip), channel, source)
    }

    /// Create a manager with a custom tag list and load the configuration
    ///
    /// # Errors
    ///
    /// Returns the source's error if the initial load fails.
    pub fn with_tags(
        tags: Vec<PlayerTag>,
        channel: Arc<dyn ExecutionChannel>,
        source: Box<dyn CommandSource>,
    ) -> Result<Self> {
        let manager = Self {
            store: CommandStore::new(tags),
            channel,
            source,
        };
        manager.reload()?;
        Ok(manager)
    }

    /// Run the configured commands for a player that has joined
    pub fn run_commands_on_join(&self, player: &(dyn Player + 'static)) -> DispatchOutcome {
        self.run_commands(LifecycleEvent::Join, player)
    }

    /// Run the configured commands for a player that has logged in
    pub fn run_commands_on_login(&self, player: &(dyn Player + 'static)) -> DispatchOutcome {
        self.run_commands(LifecycleEvent::Login, player)
    }

    /// Run the configured commands for a player that has registered
    pub fn run_commands_on_register(&self, player: &(dyn Player + 'static)) -> DispatchOutcome {
        self.run_commands(LifecycleEvent::Register, player)
    }

    /// The snapshot dispatches currently run against
    pub fn snapshot(&self) -> Arc<CommandSnapshot> {
        self.store.current()
    }

    /// Run the configured commands for `event`
    ///
    /// Commands go to the channel in configured order. A command the channel
    /// rejects is logged and the remaining commands still run. The player's
    /// address is logged only as the redaction marker.
    pub fn run_commands(
        &self,
        event: LifecycleEvent,
        player: &(dyn Player + 'static),
    ) -> DispatchOutcome {
        let started = Instant::now();
        let dispatch_id = DispatchId::new();
        let snapshot = self.store.current();

        log_op_start!(
            OP_DISPATCH,
            { FIELD_LIFECYCLE } = event.as_str(),
            { FIELD_DISPATCH_ID } = dispatch_id.as_str(),
            { FIELD_PLAYER } = player.name(),
            { FIELD_ADDRESS } = player.address().map(|ip| display(Sensitive::new(ip))),
            { FIELD_REVISION } = snapshot.revision(),
        );

        let configured = snapshot.commands(event);
        let commands = snapshot.resolve(event, player);
        let mut failed = 0;
        for (index, (command, template)) in commands.iter().zip(configured).enumerate() {
            if let Err(err) = self.execute(player, command) {
                failed += 1;
                // resolved text may carry the player's address; log the configured template
                let ex_err = ExError::from(err)
                    .with_dispatch_id(dispatch_id.clone())
                    .with_entity(template.template());
                log_op_warn!(
                    OP_DISPATCH,
                    ex_err,
                    { FIELD_LIFECYCLE } = event.as_str(),
                    { FIELD_EXECUTOR } = command.executor().as_str(),
                    { FIELD_INDEX } = index,
                );
            }
        }

        log_op_end!(
            OP_DISPATCH,
            duration_ms = started.elapsed().as_millis() as u64,
            { FIELD_LIFECYCLE } = event.as_str(),
            { FIELD_DISPATCH_ID } = dispatch_id.as_str(),
            { FIELD_PLAYER } = player.name(),
            { FIELD_COMMAND_COUNT } = commands.len(),
            { FIELD_FAILED_COUNT } = failed,
        );

        DispatchOutcome {
            dispatch_id,
            event,
            revision: snapshot.revision(),
            executed: commands.len(),
            failed,
        }
    }

    fn execute(&self, player: &dyn Player, command: &Command) -> Result<()> {
        match command.executor() {
            Executor::Console => self.channel.dispatch_console_command(command.template()),
            Executor::Player => self.channel.dispatch_command(player, command.template()),
        }
    }
}

impl Reloadable for CommandManager {
    /// Load the configuration and swap in a new snapshot
    ///
    /// On failure nothing is replaced; dispatches keep using the previous
    /// snapshot.
    fn reload(&self) -> Result<()> {
        let started = Instant::now();
        log_op_start!(OP_RELOAD);

        let config = match self.source.load() {
            Ok(config) => config,
            Err(err) => {
                log_op_error!(
                    OP_RELOAD,
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    { FIELD_REVISION } = self.store.current().revision(),
                );
                return Err(err);
            }
        };

        let snapshot = self.store.install(config);
        log_op_end!(
            OP_RELOAD,
            duration_ms = started.elapsed().as_millis() as u64,
            { FIELD_REVISION } = snapshot.revision(),
            on_join = snapshot.commands(LifecycleEvent::Join).len(),
            on_login = snapshot.commands(LifecycleEvent::Login).len(),
            on_register = snapshot.commands(LifecycleEvent::Register).len(),
        );
        Ok(())
    }
}

impl std::fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandManager")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
