use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use authhook_core::commands::{CommandManager, StaticCommandSource};
use authhook_core::errors::{AuthHookError, Result};
use authhook_core::{CommandConfig, ExecutionChannel, Executor, GeoIpLookup, Player};

/// Player with fixed attributes
#[allow(dead_code)]
pub struct TestPlayer {
    pub name: String,
    pub display_name: String,
    pub address: Option<IpAddr>,
}

#[allow(dead_code)]
impl TestPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            address: Some("198.51.100.20".parse().unwrap()),
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn without_address(mut self) -> Self {
        self.address = None;
        self
    }
}

impl Player for TestPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn address(&self) -> Option<IpAddr> {
        self.address
    }
}

/// One command as received by the execution channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub executor: Executor,
    /// Acting player for player-executed commands
    pub player: Option<String>,
    pub text: String,
}

/// Channel that records every command, optionally failing some of them
#[derive(Default)]
pub struct RecordingChannel {
    dispatched: Mutex<Vec<Dispatched>>,
    fail_containing: Option<String>,
}

#[allow(dead_code)]
impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail (after recording) any command whose text contains `needle`
    pub fn failing_on(needle: &str) -> Self {
        Self {
            dispatched: Mutex::new(Vec::new()),
            fail_containing: Some(needle.to_string()),
        }
    }

    pub fn dispatched(&self) -> Vec<Dispatched> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.dispatched().into_iter().map(|d| d.text).collect()
    }

    fn record(&self, dispatched: Dispatched) -> Result<()> {
        let text = dispatched.text.clone();
        self.dispatched.lock().unwrap().push(dispatched);
        match &self.fail_containing {
            Some(needle) if text.contains(needle.as_str()) => Err(AuthHookError::ExecutionFailed {
                command: text,
                reason: "rejected by test channel".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl ExecutionChannel for RecordingChannel {
    fn dispatch_console_command(&self, command: &str) -> Result<()> {
        self.record(Dispatched {
            executor: Executor::Console,
            player: None,
            text: command.to_string(),
        })
    }

    fn dispatch_command(&self, player: &dyn Player, command: &str) -> Result<()> {
        self.record(Dispatched {
            executor: Executor::Player,
            player: Some(player.name().to_string()),
            text: command.to_string(),
        })
    }
}

/// GeoIP lookup that counts how often it is asked
pub struct CountingGeoIp {
    country: Option<String>,
    lookups: AtomicUsize,
}

#[allow(dead_code)]
impl CountingGeoIp {
    pub fn resolving(country: &str) -> Self {
        Self {
            country: Some(country.to_string()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            country: None,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl GeoIpLookup for CountingGeoIp {
    fn country_name(&self, _ip: IpAddr) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.country.clone()
    }
}

/// Manager wired to shared test collaborators
#[allow(dead_code)]
pub struct Harness {
    pub manager: CommandManager,
    pub channel: Arc<RecordingChannel>,
    pub geoip: Arc<CountingGeoIp>,
    pub source: Arc<StaticCommandSource>,
}

#[allow(dead_code)]
pub fn harness(config: CommandConfig) -> Harness {
    harness_with(config, RecordingChannel::new(), CountingGeoIp::resolving("Portugal"))
}

#[allow(dead_code)]
pub fn harness_with(
    config: CommandConfig,
    channel: RecordingChannel,
    geoip: CountingGeoIp,
) -> Harness {
    let channel = Arc::new(channel);
    let geoip = Arc::new(geoip);
    let source = Arc::new(StaticCommandSource::new(config));
    let manager = CommandManager::new(
        geoip.clone(),
        channel.clone(),
        Box::new(Arc::clone(&source)),
    )
    .unwrap();
    Harness {
        manager,
        channel,
        geoip,
        source,
    }
}
