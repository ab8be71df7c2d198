//! AuthHook Core - lifecycle commands and credential-safe logging
//!
//! This crate provides the domain kernel of AuthHook, including:
//! - Lazily evaluated placeholder tags and template replacers
//! - The per-event command configuration model and its atomic store
//! - The dispatcher that runs configured commands on join, login and register
//! - The command descriptor tree and the sensitive-command blacklist
//! - A log filter that redacts credentials from server log lines
//!
//! Host integration happens through the [`Player`], [`GeoIpLookup`],
//! [`ExecutionChannel`] and [`CommandSource`] traits.

pub mod commands;
pub mod descriptor;
pub mod errors;
pub mod geoip;
pub mod lazytags;
pub mod log_filter;
pub mod logging_facility;
pub mod player;
pub mod tags;

// Re-export commonly used types
pub use commands::{
    Command, CommandConfig, CommandManager, CommandSource, CommandStore, DispatchOutcome,
    ExecutionChannel, Executor, LifecycleEvent, Reloadable,
};
pub use descriptor::{DescriptorId, DescriptorTree, DescriptorTreeBuilder};
pub use errors::{AuthHookError, ExError, ExErrorKind, Result};
pub use geoip::{GeoIpLookup, NoGeoIp};
pub use log_filter::{build_blacklist, Blacklist, LogFilter};
pub use player::Player;
pub use tags::{build_available_tags, PlayerTag};

pub use authhook_core_types::{schema, Sensitive};
