//! Configurable commands run on player lifecycle events
//!
//! - [`model`]: commands, executors and the per-event configuration
//! - [`store`]: the atomically swapped, bound command snapshot
//! - [`manager`]: the event dispatcher invoked by the host
//! - [`channel`] / [`source`]: execution and configuration collaborators

pub mod channel;
pub mod manager;
pub mod model;
pub mod source;
pub mod store;

pub use channel::ExecutionChannel;
pub use manager::{CommandManager, DispatchOutcome};
pub use model::{Command, CommandConfig, Executor, LifecycleEvent};
pub use source::{CommandSource, StaticCommandSource};
pub use store::{CommandSnapshot, CommandStore};

use crate::errors::Result;

/// A component whose state is rebuilt from its source on demand
pub trait Reloadable {
    /// Rebuild the component's state
    ///
    /// # Errors
    ///
    /// Returns the source's error; the previous state stays in effect.
    fn reload(&self) -> Result<()>;
}
