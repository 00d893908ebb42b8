use battery_core::commands::PlayerCommand;
use battery_core::components::{Locomotion, Location, Pickup, PlayerControl, SpawnVolume};
use battery_core::constants::DEFAULT_DT;
use battery_core::enums::PlayState;
use battery_core::events::GameEvent;
use battery_core::types::DVec3;
use battery_sim::config::{SimConfig, SpawnVolumeConfig};
use battery_sim::SimulationEngine;

/// Config with no decay and no spawn volumes, for tests that place pickups by hand.
fn quiet_config(initial_power: f64) -> SimConfig {
    SimConfig {
        decay_rate: 0.0,
        initial_power,
        spawn_volumes: Vec::new(),
        ..Default::default()
    }
}

fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.begin_play();
    engine
}

fn run_secs(engine: &mut SimulationEngine, secs: f64) -> Vec<GameEvent> {
    let frames = (secs / DEFAULT_DT).round() as usize;
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(engine.tick(DEFAULT_DT).events);
    }
    events
}

fn spawning_volumes(engine: &SimulationEngine) -> usize {
    engine
        .world()
        .query::<&SpawnVolume>()
        .iter()
        .filter(|(_, v)| v.spawning_active)
        .count()
}

// --- Level start ---

#[test]
fn tick_before_begin_play_is_idle() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.state, PlayState::Unknown);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.current_power.is_none());
    assert!(snap.events.is_empty());
}

#[test]
fn begin_play_enters_playing_and_enables_volumes() {
    let mut engine = started(SimConfig::default());
    assert_eq!(engine.state(), PlayState::Playing);
    assert_eq!(engine.power_to_win(), 2500.0);
    assert_eq!(engine.spawn_volumes().len(), 2);
    assert_eq!(spawning_volumes(&engine), 2);

    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.active_spawners, 2);
    assert_eq!(
        snap.events[..2],
        [
            GameEvent::StateChanged {
                from: PlayState::Unknown,
                to: PlayState::Playing,
            },
            GameEvent::SpawnersToggled {
                active: true,
                applied: 2,
            },
        ]
    );
}

#[test]
fn engine_rejects_invalid_config() {
    let inverted = SimConfig {
        spawn_delay_low: 5.0,
        spawn_delay_high: 1.0,
        ..Default::default()
    };
    assert!(SimulationEngine::new(inverted).is_err());

    let oversized = SimConfig {
        spawn_volumes: vec![SpawnVolumeConfig {
            origin: DVec3::ZERO,
            extent: DVec3::new(1e308, 1.0, 1.0),
        }],
        ..Default::default()
    };
    let Err(err) = SimulationEngine::new(oversized) else {
        panic!("oversized spawn volume was accepted");
    };
    assert!(err.to_string().contains("extent"), "{err}");
}

#[test]
fn begin_play_twice_does_not_duplicate_level() {
    let mut engine = started(SimConfig::default());
    engine.begin_play();
    let volume_count = engine.world().query::<&SpawnVolume>().iter().count();
    assert_eq!(volume_count, 2);
    assert_eq!(engine.spawn_volumes().len(), 2);
}

// --- Decay ---

#[test]
fn power_decays_one_percent_of_initial_per_second() {
    let mut engine = started(SimConfig {
        spawn_volumes: Vec::new(),
        ..Default::default()
    });
    run_secs(&mut engine, 1.0);
    let power = engine.player_power().unwrap();
    assert!((power - 1980.0).abs() < 1e-6, "power was {power}");
    assert_eq!(engine.state(), PlayState::Playing);
}

#[test]
fn decay_reports_power_change() {
    let mut engine = started(SimConfig {
        initial_power: 100.0,
        spawn_volumes: Vec::new(),
        ..Default::default()
    });
    let snap = engine.tick(1.0);
    let changes: Vec<_> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PowerChanged { current, delta } => Some((*current, *delta)),
            _ => None,
        })
        .collect();
    assert_eq!(changes.len(), 1);
    let (current, delta) = changes[0];
    assert!((delta - -1.0).abs() < 1e-12, "delta was {delta}");
    assert!((current - 99.0).abs() < 1e-12, "current was {current}");
    assert_eq!(snap.current_power, Some(current));
}

#[test]
fn drained_player_loses() {
    let mut engine = started(SimConfig {
        initial_power: 100.0,
        decay_rate: 0.5,
        spawn_volumes: Vec::new(),
        ..Default::default()
    });
    // Two seconds drain everything; the next frame sees power <= 0.
    let events = run_secs(&mut engine, 2.5);
    assert_eq!(engine.state(), PlayState::GameOver);
    assert!(events.contains(&GameEvent::StateChanged {
        from: PlayState::Playing,
        to: PlayState::GameOver,
    }));
}

// --- Win ---

#[test]
fn collecting_enough_batteries_wins() {
    let mut engine = started(quiet_config(100.0));
    engine.place_battery(DVec3::new(50.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::Collect);

    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.state, PlayState::Won);
    assert_eq!(snap.current_power, Some(250.0));
    assert!(snap.events.contains(&GameEvent::PickupCollected {
        count: 1,
        power: 150.0,
    }));
}

#[test]
fn win_disables_every_volume_once() {
    let mut engine = started(SimConfig::default());
    engine.set_player_power(3000.0);

    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.state, PlayState::Won);
    assert_eq!(spawning_volumes(&engine), 0);
    let toggles: Vec<_> = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::SpawnersToggled { active: false, .. }))
        .collect();
    assert_eq!(toggles.len(), 1);

    let later = run_secs(&mut engine, 1.0);
    assert!(!later
        .iter()
        .any(|e| matches!(e, GameEvent::SpawnersToggled { .. } | GameEvent::StateChanged { .. })));
}

#[test]
fn power_at_threshold_keeps_playing() {
    let mut engine = started(quiet_config(100.0));
    engine.set_player_power(125.0);
    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.state, PlayState::Playing);
}

#[test]
fn winning_leaves_player_in_control() {
    let mut engine = started(quiet_config(100.0));
    engine.set_player_power(200.0);
    engine.tick(DEFAULT_DT);

    let player = engine.player().unwrap();
    let control = engine.world().get::<&PlayerControl>(player).unwrap();
    assert!(control.input_enabled);
}

// --- Game over ---

#[test]
fn game_over_freezes_and_ragdolls_player() {
    let mut engine = started(SimConfig::default());
    engine.set_player_power(-5.0);
    let snap = engine.tick(DEFAULT_DT);

    assert_eq!(snap.state, PlayState::GameOver);
    assert_eq!(snap.active_spawners, 0);

    let player = engine.player().unwrap();
    let control = engine.world().get::<&PlayerControl>(player).unwrap();
    assert!(!control.input_enabled);
    let loco = engine.world().get::<&Locomotion>(player).unwrap();
    assert!(loco.ragdoll);
    assert!(!loco.can_jump);
}

#[test]
fn commands_are_dropped_after_game_over() {
    let mut engine = started(quiet_config(100.0));
    engine.set_player_power(0.0);
    engine.tick(DEFAULT_DT);
    assert_eq!(engine.state(), PlayState::GameOver);

    engine.place_battery(DVec3::new(10.0, 0.0, 0.0));
    engine.queue_commands([
        PlayerCommand::Collect,
        PlayerCommand::Jump,
        PlayerCommand::Walk {
            direction: DVec3::X,
        },
    ]);
    let snap = engine.tick(DEFAULT_DT);

    assert_eq!(snap.current_power, Some(0.0));
    assert_eq!(snap.active_pickups, 1);
    let player = engine.player().unwrap();
    assert_eq!(engine.world().get::<&Location>(player).unwrap().0, DVec3::ZERO);
    assert_eq!(engine.world().get::<&Locomotion>(player).unwrap().jumps, 0);
}

// --- Absent handles ---

#[test]
fn missing_player_pauses_state_machine() {
    let mut engine = started(SimConfig::default());
    assert!(engine.despawn_player());
    assert!(!engine.despawn_player());

    let events = run_secs(&mut engine, 5.0);
    assert_eq!(engine.state(), PlayState::Playing);
    assert!(engine.player_power().is_none());
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::StateChanged { .. })));
    // Commands without a player are discarded.
    engine.queue_command(PlayerCommand::Collect);
    let snap = engine.tick(DEFAULT_DT);
    assert!(snap.current_power.is_none());
}

#[test]
fn destroyed_volume_is_skipped_on_transition() {
    let mut engine = started(SimConfig::default());
    let doomed = engine.spawn_volumes()[0];
    assert!(engine.despawn_spawn_volume(doomed));
    assert!(!engine.despawn_spawn_volume(doomed));

    engine.set_player_power(5000.0);
    let snap = engine.tick(DEFAULT_DT);
    assert_eq!(snap.state, PlayState::Won);
    assert!(snap.events.contains(&GameEvent::SpawnersToggled {
        active: false,
        applied: 1,
    }));
    // The registry still lists the stale handle.
    assert_eq!(engine.spawn_volumes().len(), 2);
}

// --- Spawning and collection ---

#[test]
fn active_volumes_spawn_batteries() {
    let mut engine = started(SimConfig::default());
    let events = run_secs(&mut engine, 5.0);
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PickupSpawned { .. }))
        .count();
    // Max delay is 4.5s, so each of the two volumes fires at least once.
    assert!(spawned >= 2, "only {spawned} batteries spawned");
    let snap = engine.tick(DEFAULT_DT);
    assert!(snap.active_pickups as usize >= 2);
}

#[test]
fn spawned_batteries_land_inside_their_volume() {
    let config = SimConfig {
        spawn_volumes: vec![SpawnVolumeConfig {
            origin: DVec3::new(1000.0, -500.0, 0.0),
            extent: DVec3::new(100.0, 50.0, 0.0),
        }],
        ..Default::default()
    };
    let mut engine = started(config);
    let events = run_secs(&mut engine, 20.0);
    let positions: Vec<DVec3> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PickupSpawned { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert!(!positions.is_empty());
    for p in positions {
        assert!((900.0..=1100.0).contains(&p.x), "{p}");
        assert!((-550.0..=-450.0).contains(&p.y), "{p}");
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn no_spawning_after_game_ends() {
    let mut engine = started(SimConfig::default());
    engine.set_player_power(-1.0);
    engine.tick(DEFAULT_DT);
    let events = run_secs(&mut engine, 10.0);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::PickupSpawned { .. })));
}

#[test]
fn collect_only_reaches_nearby_batteries() {
    let mut engine = started(quiet_config(1000.0));
    engine.place_battery(DVec3::new(150.0, 0.0, 0.0));
    engine.place_battery(DVec3::new(0.0, -199.0, 0.0));
    let far = engine.place_battery(DVec3::new(5000.0, 0.0, 0.0));

    engine.queue_command(PlayerCommand::Collect);
    let snap = engine.tick(DEFAULT_DT);

    assert_eq!(snap.current_power, Some(1300.0));
    assert_eq!(snap.active_pickups, 1);
    assert!(engine.world().get::<&Pickup>(far).unwrap().active);
    // Collected pickups were cleaned up.
    assert_eq!(engine.world().query::<&Pickup>().iter().count(), 1);
}

#[test]
fn collection_reports_power_change() {
    let mut engine = started(quiet_config(1000.0));
    engine.place_battery(DVec3::new(20.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::Collect);
    let snap = engine.tick(DEFAULT_DT);

    assert!(snap.events.contains(&GameEvent::PowerChanged {
        current: 1150.0,
        delta: 150.0,
    }));
}

#[test]
fn long_frame_spawns_for_every_elapsed_delay() {
    let config = SimConfig {
        spawn_delay_low: 1.0,
        spawn_delay_high: 1.0,
        spawn_volumes: vec![SpawnVolumeConfig {
            origin: DVec3::ZERO,
            extent: DVec3::splat(100.0),
        }],
        ..Default::default()
    };
    let mut engine = started(config);

    // Timer starts at 1.0s; a 3.5s frame covers expiries at 1, 2 and 3s.
    let snap = engine.tick(3.5);
    let spawned = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::PickupSpawned { .. }))
        .count();
    assert_eq!(spawned, 3);

    // The 0.5s overshoot carries over: the next battery is due at 4s.
    let snap = engine.tick(0.4);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PickupSpawned { .. })));
    let snap = engine.tick(0.2);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PickupSpawned { .. })));
}

#[test]
fn collect_with_nothing_in_reach_emits_nothing() {
    let mut engine = started(quiet_config(1000.0));
    engine.tick(DEFAULT_DT);
    engine.queue_command(PlayerCommand::Collect);
    let snap = engine.tick(DEFAULT_DT);
    assert!(snap.events.is_empty());
    assert_eq!(snap.current_power, Some(1000.0));
}

// --- Locomotion ---

#[test]
fn walking_speed_follows_power() {
    let mut engine = started(quiet_config(100.0));
    engine.queue_command(PlayerCommand::Walk {
        direction: DVec3::new(2.0, 0.0, 0.0),
    });
    engine.tick(1.0);

    let player = engine.player().unwrap();
    let x = engine.world().get::<&Location>(player).unwrap().0.x;
    // base 10 + 0.75 * 100
    assert!((x - 85.0).abs() < 1e-9, "x was {x}");
}

#[test]
fn jump_counts_while_allowed() {
    let mut engine = started(quiet_config(100.0));
    engine.queue_commands([PlayerCommand::Jump, PlayerCommand::Jump]);
    engine.tick(DEFAULT_DT);
    let player = engine.player().unwrap();
    assert_eq!(engine.world().get::<&Locomotion>(player).unwrap().jumps, 2);
}

// --- Determinism ---

#[test]
fn same_seed_same_session() {
    let mut a = started(SimConfig::default());
    let mut b = started(SimConfig::default());
    for i in 0..600 {
        if i % 30 == 0 {
            a.queue_command(PlayerCommand::Collect);
            b.queue_command(PlayerCommand::Collect);
        }
        let snap_a = serde_json::to_string(&a.tick(DEFAULT_DT)).unwrap();
        let snap_b = serde_json::to_string(&b.tick(DEFAULT_DT)).unwrap();
        assert_eq!(snap_a, snap_b, "sessions diverged at frame {i}");
    }
}

#[test]
fn negative_delta_is_treated_as_zero() {
    let mut engine = started(SimConfig {
        spawn_volumes: Vec::new(),
        ..Default::default()
    });
    let snap = engine.tick(-1.0);
    assert_eq!(snap.current_power, Some(2000.0));
    assert_eq!(snap.time.elapsed_secs, 0.0);
}
