#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use authhook_core::commands::{CommandManager, StaticCommandSource};
use authhook_core::errors::AuthHookError;
use authhook_core::{Command, CommandConfig, LifecycleEvent, NoGeoIp, Reloadable};
use common::{harness, RecordingChannel, TestPlayer};

fn join_config(templates: &[&str]) -> CommandConfig {
    CommandConfig::new().with_commands(
        LifecycleEvent::Join,
        templates.iter().map(|t| Command::console(*t)).collect(),
    )
}

#[test]
fn test_reload_replaces_commands() {
    let h = harness(join_config(&["old %p"]));
    let player = TestPlayer::new("Bobby");
    assert_eq!(h.manager.snapshot().revision(), 1);

    h.source.set(join_config(&["new %p"]));
    h.manager.reload().unwrap();
    h.manager.run_commands_on_join(&player);

    assert_eq!(h.manager.snapshot().revision(), 2);
    assert_eq!(h.channel.texts(), vec!["new Bobby"]);
}

#[test]
fn test_failed_reload_keeps_previous_snapshot() {
    let h = harness(join_config(&["kept %p"]));
    let before = h.manager.snapshot();

    h.source.fail_with(AuthHookError::ConfigParse {
        reason: "mapping values are not allowed here".to_string(),
    });
    let err = h.manager.reload().unwrap_err();

    assert!(matches!(err, AuthHookError::ConfigParse { .. }));
    let after = h.manager.snapshot();
    assert!(Arc::ptr_eq(&before, &after));

    h.manager.run_commands_on_join(&TestPlayer::new("Bobby"));
    assert_eq!(h.channel.texts(), vec!["kept Bobby"]);
}

#[test]
fn test_initial_load_failure_is_reported() {
    let source = StaticCommandSource::new(CommandConfig::default());
    source.fail_with(AuthHookError::UnknownSection {
        section: "onQuit".to_string(),
    });

    let result = CommandManager::new(
        Arc::new(NoGeoIp),
        Arc::new(RecordingChannel::new()),
        Box::new(source),
    );

    assert!(matches!(
        result.unwrap_err(),
        AuthHookError::UnknownSection { .. }
    ));
}

#[test]
fn test_dispatch_outcome_reports_snapshot_revision() {
    let h = harness(join_config(&["a"]));
    h.source.set(join_config(&["b"]));
    h.manager.reload().unwrap();

    let outcome = h.manager.run_commands_on_join(&TestPlayer::new("Bobby"));

    assert_eq!(outcome.revision, 2);
}

#[test]
fn test_concurrent_dispatch_never_mixes_configurations() {
    let old = ["old-1 %p", "old-2 %p"];
    let new = ["new-1 %p", "new-2 %p", "new-3 %p"];
    let h = harness(join_config(&old));

    std::thread::scope(|scope| {
        for thread in 0..4 {
            let manager = &h.manager;
            scope.spawn(move || {
                for i in 0..50 {
                    let player = TestPlayer::new(&format!("p{}_{}", thread, i));
                    manager.run_commands_on_join(&player);
                }
            });
        }

        scope.spawn(|| {
            for round in 0..20 {
                let next = if round % 2 == 0 { &new[..] } else { &old[..] };
                h.source.set(join_config(next));
                h.manager.reload().unwrap();
            }
        });
    });

    let mut by_player: HashMap<String, Vec<String>> = HashMap::new();
    for text in h.channel.texts() {
        let (prefix, player) = text.split_once(' ').unwrap();
        by_player
            .entry(player.to_string())
            .or_default()
            .push(prefix.to_string());
    }

    assert_eq!(by_player.len(), 200);
    for (player, prefixes) in by_player {
        let all_old = prefixes == ["old-1", "old-2"];
        let all_new = prefixes == ["new-1", "new-2", "new-3"];
        assert!(
            all_old || all_new,
            "dispatch for {} saw a mixed configuration: {:?}",
            player,
            prefixes
        );
    }
}
