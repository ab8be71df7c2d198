//! Preview command
//!
//! Usage: authhook preview --data-folder <DIR> --event <EVENT> --name <NAME>
//!        [--nick <NICK>] [--ip <ADDR>] [--country <COUNTRY>]

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use authhook_core::errors::Result as CoreResult;
use authhook_core::{CommandManager, ExecutionChannel, Executor, GeoIpLookup, LifecycleEvent, Player};
use authhook_store::YamlCommandSource;
use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Folder holding commands.yml (created with defaults if missing)
    #[arg(long)]
    pub data_folder: PathBuf,

    /// Lifecycle event to preview
    #[arg(long, value_enum)]
    pub event: EventArg,

    /// Player name (%p)
    #[arg(long)]
    pub name: String,

    /// Display name (%nick), defaults to the name
    #[arg(long)]
    pub nick: Option<String>,

    /// Player address (%ip)
    #[arg(long)]
    pub ip: Option<IpAddr>,

    /// Country reported for the address (%country); requires --ip, since the
    /// country of a player without an address is always the fallback
    #[arg(long, requires = "ip")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventArg {
    Join,
    Login,
    Register,
}

impl From<EventArg> for LifecycleEvent {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Join => LifecycleEvent::Join,
            EventArg::Login => LifecycleEvent::Login,
            EventArg::Register => LifecycleEvent::Register,
        }
    }
}

struct PreviewPlayer {
    name: String,
    nick: Option<String>,
    ip: Option<IpAddr>,
}

impl Player for PreviewPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.name)
    }

    fn address(&self) -> Option<IpAddr> {
        self.ip
    }
}

/// Reports the operator-supplied country for any address
struct FixedCountry(Option<String>);

impl GeoIpLookup for FixedCountry {
    fn country_name(&self, _ip: IpAddr) -> Option<String> {
        self.0.clone()
    }
}

/// Collects commands instead of executing them
#[derive(Default)]
struct PreviewChannel {
    lines: Mutex<Vec<(Executor, String)>>,
}

impl PreviewChannel {
    fn push(&self, executor: Executor, command: &str) {
        let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push((executor, command.to_string()));
    }

    fn take(&self) -> Vec<(Executor, String)> {
        let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *lines)
    }
}

impl ExecutionChannel for PreviewChannel {
    fn dispatch_console_command(&self, command: &str) -> CoreResult<()> {
        self.push(Executor::Console, command);
        Ok(())
    }

    fn dispatch_command(&self, _player: &dyn Player, command: &str) -> CoreResult<()> {
        self.push(Executor::Player, command);
        Ok(())
    }
}

/// Execute preview command
pub fn execute(args: PreviewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let channel = Arc::new(PreviewChannel::default());
    let manager = CommandManager::new(
        Arc::new(FixedCountry(args.country)),
        channel.clone(),
        Box::new(YamlCommandSource::new(args.data_folder)),
    )?;

    let player = PreviewPlayer {
        name: args.name,
        nick: args.nick,
        ip: args.ip,
    };
    manager.run_commands(args.event.into(), &player);

    for (executor, command) in channel.take() {
        println!("[{}] {}", executor, command);
    }

    Ok(())
}
