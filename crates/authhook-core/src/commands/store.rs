//! Command Configuration Store
//!
//! Holds the bound command collections as one immutable snapshot behind a
//! lock. A reload builds a complete new snapshot and swaps the handle, so a
//! dispatch that took the current snapshot keeps seeing it unchanged.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::model::{Command, CommandConfig, LifecycleEvent};
use crate::lazytags::WrappedTagReplacer;
use crate::player::Player;
use crate::tags::PlayerTag;

type BoundCommands = WrappedTagReplacer<Command, dyn Player>;

/// Immutable view of the command configuration bound to the tag registry
pub struct CommandSnapshot {
    on_join: BoundCommands,
    on_login: BoundCommands,
    on_register: BoundCommands,
    revision: u64,
    loaded_at: DateTime<Utc>,
}

impl CommandSnapshot {
    fn bind(tags: &Arc<[PlayerTag]>, config: CommandConfig, revision: u64) -> Self {
        Self {
            on_join: bind_commands(tags, config.on_join),
            on_login: bind_commands(tags, config.on_login),
            on_register: bind_commands(tags, config.on_register),
            revision,
            loaded_at: Utc::now(),
        }
    }

    fn bound(&self, event: LifecycleEvent) -> &BoundCommands {
        match event {
            LifecycleEvent::Join => &self.on_join,
            LifecycleEvent::Login => &self.on_login,
            LifecycleEvent::Register => &self.on_register,
        }
    }

    /// Commands for `event` with placeholders resolved for `player`
    pub fn resolve(&self, event: LifecycleEvent, player: &(dyn Player + 'static)) -> Vec<Command> {
        self.bound(event).adapted_items(player)
    }

    /// Configured, unresolved commands for `event`
    pub fn commands(&self, event: LifecycleEvent) -> &[Command] {
        self.bound(event).items()
    }

    /// Placeholders referenced by `event`'s commands
    pub fn used_tags(&self, event: LifecycleEvent) -> Vec<&str> {
        self.bound(event).used_tags()
    }

    /// Number of successful reloads that preceded this snapshot; 0 before the first
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("revision", &self.revision)
            .field("loaded_at", &self.loaded_at)
            .field("on_join", &self.on_join.len())
            .field("on_login", &self.on_login.len())
            .field("on_register", &self.on_register.len())
            .finish()
    }
}

fn bind_commands(tags: &Arc<[PlayerTag]>, commands: Vec<Command>) -> BoundCommands {
    WrappedTagReplacer::new(
        Arc::clone(tags),
        commands,
        Command::template,
        |command: &Command, text| command.with_template(text),
    )
}

/// Process-wide holder of the current [`CommandSnapshot`]
pub struct CommandStore {
    tags: Arc<[PlayerTag]>,
    current: RwLock<Arc<CommandSnapshot>>,
    install_lock: Mutex<()>,
}

impl CommandStore {
    /// Create a store holding an empty revision-0 snapshot
    pub fn new(tags: Vec<PlayerTag>) -> Self {
        let tags: Arc<[PlayerTag]> = Arc::from(tags);
        let empty = CommandSnapshot::bind(&tags, CommandConfig::default(), 0);
        Self {
            tags,
            current: RwLock::new(Arc::new(empty)),
            install_lock: Mutex::new(()),
        }
    }

    /// The snapshot in effect right now
    pub fn current(&self) -> Arc<CommandSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Bind `config` and make it the current snapshot
    ///
    /// Installs are serialized so revisions increase in install order. The
    /// write lock is held only for the handle swap.
    pub fn install(&self, config: CommandConfig) -> Arc<CommandSnapshot> {
        let _serialized = self
            .install_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let revision = self.current().revision() + 1;
        let snapshot = Arc::new(CommandSnapshot::bind(&self.tags, config, revision));

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&snapshot);
        snapshot
    }

    pub fn tags(&self) -> &[PlayerTag] {
        &self.tags
    }
}

impl std::fmt::Debug for CommandStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandStore")
            .field("tags", &self.tags.len())
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geoip::NoGeoIp;
    use crate::tags::build_available_tags;
    use std::net::IpAddr;

    struct Alex;

    impl Player for Alex {
        fn name(&self) -> &str {
            "Alex"
        }

        fn address(&self) -> Option<IpAddr> {
            None
        }
    }

    fn store() -> CommandStore {
        CommandStore::new(build_available_tags(Arc::new(NoGeoIp)))
    }

    #[test]
    fn test_new_store_is_empty_revision_zero() {
        let store = store();
        let snapshot = store.current();
        assert_eq!(snapshot.revision(), 0);
        for event in LifecycleEvent::ALL {
            assert!(snapshot.commands(event).is_empty());
        }
    }

    #[test]
    fn test_install_increments_revision() {
        let store = store();
        store.install(CommandConfig::default());
        let second = store.install(CommandConfig::default());
        assert_eq!(second.revision(), 2);
        assert_eq!(store.current().revision(), 2);
    }

    #[test]
    fn test_held_snapshot_survives_install() {
        let store = store();
        store.install(
            CommandConfig::new().with_commands(LifecycleEvent::Join, vec![Command::player("old %p")]),
        );
        let held = store.current();

        store.install(
            CommandConfig::new().with_commands(LifecycleEvent::Join, vec![Command::player("new %p")]),
        );

        let resolved = held.resolve(LifecycleEvent::Join, &Alex);
        assert_eq!(resolved, vec![Command::player("old Alex")]);
        assert_eq!(
            store.current().resolve(LifecycleEvent::Join, &Alex),
            vec![Command::player("new Alex")]
        );
    }

    #[test]
    fn test_used_tags_per_event() {
        let store = store();
        let snapshot = store.install(
            CommandConfig::new()
                .with_commands(LifecycleEvent::Login, vec![Command::console("log %ip %p")]),
        );
        assert_eq!(snapshot.used_tags(LifecycleEvent::Login), vec!["%p", "%ip"]);
        assert!(snapshot.used_tags(LifecycleEvent::Join).is_empty());
    }
}
