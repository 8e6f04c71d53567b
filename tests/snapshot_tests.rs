//! Save and restore tests.
//!
//! Snapshots are written to temporary directories in both formats and
//! restored into fresh engines.

use std::fs;

use rust_citadels::cards::source::default_catalog;
use rust_citadels::cards::{CardId, Role};
use rust_citadels::core::{GameConfig, GameError, GameState, PlayerId, SnapshotError};
use rust_citadels::events::GameEvent;
use rust_citadels::persist::{Snapshot, SNAPSHOT_VERSION};
use rust_citadels::policy::computer_seats;
use rust_citadels::rules::GameEngine;

fn engine(players: usize, seed: u64) -> GameEngine {
    let config = GameConfig::default()
        .with_players(players)
        .with_seed(seed)
        .with_human_seat(None);
    let seats = computer_seats(&config);
    GameEngine::new(config, default_catalog().unwrap(), seats).unwrap()
}

fn assert_same_table(a: &GameState, b: &GameState) {
    assert_eq!(a.round, b.round);
    assert_eq!(a.crowned, b.crowned);
    assert_eq!(a.player_count(), b.player_count());
    for (id, left) in a.players.iter() {
        let right = b.player(id);
        assert_eq!(left.name(), right.name());
        assert_eq!(left.gold(), right.gold());
        assert_eq!(left.hand(), right.hand());
        let left_city: Vec<_> = left.city().iter().collect();
        let right_city: Vec<_> = right.city().iter().collect();
        assert_eq!(left_city, right_city);
    }
    let left_catalog: Vec<_> = a.catalog.iter().collect();
    let right_catalog: Vec<_> = b.catalog.iter().collect();
    assert_eq!(left_catalog, right_catalog);
}

/// JSON save, load and restore reproduce the table exactly.
#[test]
fn test_json_round_trip_through_engine() {
    let mut source = engine(5, 3);
    for _ in 0..3 {
        source.play_round().unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    Snapshot::capture(source.state()).save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"version\": 1"));

    let mut target = engine(5, 999);
    target.restore(&Snapshot::load(&path).unwrap()).unwrap();
    assert_same_table(source.state(), target.state());
    assert!(matches!(target.events().history().last(), Some(GameEvent::GameRestored)));
}

/// Binary saves restore the same table, RNG position included.
#[test]
fn test_binary_round_trip() {
    let mut source = engine(4, 12);
    source.play_round().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.bin");
    let saved = Snapshot::capture(source.state());
    saved.save(&path).unwrap();

    let mut target = engine(4, 5);
    target.restore(&Snapshot::load(&path).unwrap()).unwrap();
    assert_same_table(source.state(), target.state());
    assert_eq!(Snapshot::capture(target.state()), saved);
}

/// Roles survive the round trip.
#[test]
fn test_roles_round_trip() {
    let mut source = engine(4, 8);
    source.state_mut().player_mut(PlayerId::new(2)).assign_role(Role::Merchant);
    let snapshot = Snapshot::capture(source.state());
    assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    assert_eq!(snapshot.players[2].role, Some(Role::Merchant));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roles.json");
    snapshot.save(&path).unwrap();

    let mut target = engine(4, 8);
    target.restore(&Snapshot::load(&path).unwrap()).unwrap();
    assert_eq!(target.state().player(PlayerId::new(2)).role(), Some(Role::Merchant));
    assert_eq!(target.state().player(PlayerId::new(0)).role(), None);
    assert_eq!(target.state().roles(), source.state().roles());
}

/// A save without a catalog is renumbered against the live catalog, so
/// no two physical cards share an instance id.
#[test]
fn test_restore_without_catalog_keeps_ids_unique() {
    let source = engine(4, 1);
    let mut snapshot = Snapshot::capture(source.state());
    snapshot.catalog = None;
    snapshot.rng = None;
    // Same seed: every saved id also sits in the target's live catalog.
    let mut target = engine(4, 1);
    target.restore(&snapshot).unwrap();

    let state = target.state();
    let mut ids: Vec<CardId> = state.catalog.iter().map(|card| card.id).collect();
    for player in state.players.values() {
        ids.extend(player.hand().iter().map(|card| card.id));
        ids.extend(player.city().iter().map(|card| card.id));
    }
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);

    // Saved names and order survive the renumbering.
    for (id, saved) in PlayerId::all(4).zip(&snapshot.players) {
        let names: Vec<&str> = state.player(id).hand().iter().map(|card| card.name.as_str()).collect();
        let expected: Vec<&str> = saved.hand.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, expected);
    }
}

/// Built cards from a renumbered save are removed by their own id.
#[test]
fn test_renumbered_city_removes_the_right_card() {
    let mut source = engine(4, 2);
    let owner = PlayerId::new(1);
    let first = source.state().player(owner).hand()[0].clone();
    {
        let player = source.state_mut().player_mut(owner);
        player.add_gold(10);
        player.build_from_hand(0).unwrap();
    }
    let mut snapshot = Snapshot::capture(source.state());
    snapshot.catalog = None;

    let mut target = engine(4, 2);
    target.restore(&snapshot).unwrap();
    let live = target.state_mut().catalog.draw().unwrap();
    let built = target.state().player(owner).city().iter().next().cloned().unwrap();
    assert_eq!(built.name, first.name);
    assert_ne!(built.id, live.id);

    let removed = target.state_mut().player_mut(owner).city_mut().remove(built.id).unwrap();
    assert_eq!(removed.name, first.name);
}

/// A snapshot without catalog or RNG keeps the engine's own.
#[test]
fn test_partial_snapshot_keeps_catalog() {
    let source = engine(4, 1);
    let mut snapshot = Snapshot::capture(source.state());
    snapshot.catalog = None;
    snapshot.rng = None;

    let mut target = engine(4, 2);
    let before: Vec<_> = target.state().catalog.iter().cloned().collect();
    target.restore(&snapshot).unwrap();
    let after: Vec<_> = target.state().catalog.iter().cloned().collect();
    assert_eq!(before, after);
}

/// Missing and malformed files are reported, not panicked on.
#[test]
fn test_bad_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Snapshot::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, SnapshotError::Io { .. }));

    let garbled = dir.path().join("garbled.json");
    fs::write(&garbled, "{ not json").unwrap();
    assert!(matches!(Snapshot::load(&garbled).unwrap_err(), SnapshotError::Json(_)));

    let truncated = dir.path().join("truncated.bin");
    fs::write(&truncated, [1u8, 2, 3]).unwrap();
    assert!(matches!(Snapshot::load(&truncated).unwrap_err(), SnapshotError::Bincode(_)));
}

/// Structurally invalid tables are refused before touching the engine.
#[test]
fn test_invalid_tables_refused() {
    let source = engine(4, 6);
    let good = Snapshot::capture(source.state());

    let mut duplicate_role = good.clone();
    duplicate_role.players[0].role = Some(Role::King);
    duplicate_role.players[1].role = Some(Role::King);
    assert!(matches!(
        duplicate_role.validate(),
        Err(SnapshotError::DuplicateRole { role: Role::King })
    ));

    let mut crowned = good.clone();
    crowned.crowned = 9;
    assert!(matches!(crowned.validate(), Err(SnapshotError::CrownedOutOfRange { .. })));

    let mut too_few = good.clone();
    too_few.players.truncate(3);
    assert!(matches!(too_few.validate(), Err(SnapshotError::PlayerCount(3))));

    let mut target = engine(5, 6);
    let round_before = target.state().round;
    assert!(matches!(
        target.restore(&good),
        Err(SnapshotError::SeatMismatch { saved: 4, seated: 5 })
    ));
    assert_eq!(target.state().round, round_before);
}

/// Restoring after the game ended lets play continue.
#[test]
fn test_restore_reopens_finished_game() {
    let mut game = engine(4, 30);
    let saved = Snapshot::capture(game.state());
    game.run().unwrap();
    assert!(matches!(game.play_round(), Err(GameError::GameOver)));

    game.restore(&saved).unwrap();
    assert!(game.outcome().is_none());
    assert!(game.play_round().is_ok());
}
