use std::time::Duration;

use tank_battle_core::{
    CellCoord, Direction, Event, LevelConfig, Material, Outcome, Placement, PlayerConfig,
    PlayerIntent, Rules, Tier, UnitId, WaveEntry, Weapon,
};
use tank_battle_world::{query, World};

const PLAYER: UnitId = UnitId::new(0);

/// Narrow corridor with the player at the bottom facing up.
fn corridor() -> LevelConfig {
    LevelConfig {
        columns: 5,
        rows: 7,
        objective: CellCoord::new(4, 0),
        player: PlayerConfig::at(CellCoord::new(2, 6)),
        rules: Rules::default(),
        spawn_points: Vec::new(),
        placements: Vec::new(),
        waves: Vec::new(),
    }
}

fn wave(tier: Tier, count: u32) -> WaveEntry {
    WaveEntry { tier, count }
}

fn at(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn one_shot_kills_a_light_unit_in_the_same_tick() {
    let mut level = corridor();
    level.spawn_points.push(CellCoord::new(2, 3));
    level.waves.push(wave(Tier::Light, 1));
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, Some(PlayerIntent::firing()));

    assert!(events.contains(&Event::UnitDestroyed {
        unit: UnitId::new(1),
        tier: Tier::Light,
        by: PLAYER,
    }));
    let snapshot = world.snapshot();
    assert!(snapshot.units.iter().all(|unit| unit.id != UnitId::new(1)));
    assert_eq!(snapshot.kills, 1);
    assert_eq!(snapshot.score, 100);
    assert_eq!(snapshot.outcome, Some(Outcome::VictoryAllWavesCleared));
}

#[test]
fn return_fire_lands_after_the_shooter_dies() {
    let mut level = corridor();
    level.spawn_points.push(CellCoord::new(2, 3));
    level.waves.push(wave(Tier::Light, 1));
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, Some(PlayerIntent::firing()));

    assert!(events.contains(&Event::UnitDamaged {
        unit: PLAYER,
        remaining: 1,
    }));
}

#[test]
fn last_life_lost_ends_the_match_in_the_same_tick() {
    let mut level = corridor();
    level.player.tier = Tier::Light;
    level.player.lives = 1;
    level.spawn_points.push(CellCoord::new(2, 3));
    level.waves.push(wave(Tier::Medium, 2));
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, None);

    assert!(events.contains(&Event::PlayerLifeLost {
        unit: PLAYER,
        lives_remaining: 0,
    }));
    assert_eq!(
        events.last(),
        Some(&Event::MatchEnded {
            outcome: Outcome::DefeatLives
        })
    );
    let snapshot = world.snapshot();
    assert!(snapshot.player().is_none());
    assert!(snapshot.is_terminal());

    assert!(world.tick(at(5_000), None).is_empty(), "terminal worlds stay frozen");
    assert_eq!(world.snapshot(), snapshot);
}

#[test]
fn player_with_lives_left_respawns_at_the_start() {
    let mut level = corridor();
    level.player.tier = Tier::Light;
    level.player.lives = 2;
    level.spawn_points.push(CellCoord::new(2, 3));
    level.waves.push(wave(Tier::Medium, 2));
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, None);

    assert!(events.contains(&Event::PlayerRespawned {
        unit: PLAYER,
        cell: CellCoord::new(2, 6),
    }));
    let player = world.snapshot().player().cloned().expect("player respawned");
    assert_eq!(player.health, Tier::Light.profile().health);
    assert_eq!(query::lives(&world), 1);
    assert_eq!(query::outcome(&world), None);
}

#[test]
fn brittle_brick_is_cleared_and_stops_the_shell() {
    let mut level = corridor();
    level.placements.push(Placement {
        durability: Some(1),
        ..Placement::new(2, 3, Material::Destructible)
    });
    level.spawn_points.push(CellCoord::new(0, 0));
    level.waves.push(wave(Tier::Heavy, 1));
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, Some(PlayerIntent::firing()));

    assert!(events.contains(&Event::TerrainDestroyed {
        cell: CellCoord::new(2, 3)
    }));
    let snapshot = world.snapshot();
    assert_eq!(
        snapshot
            .cell(CellCoord::new(2, 3))
            .map(|cell| cell.material()),
        Some(Material::Empty)
    );
    assert!(snapshot.projectiles.iter().all(|p| p.owner != PLAYER));
}

#[test]
fn shell_jumps_a_brick_beside_the_shooter() {
    let mut level = corridor();
    level
        .placements
        .push(Placement::new(2, 5, Material::Destructible));
    level.spawn_points.push(CellCoord::new(2, 3));
    level.waves.push(wave(Tier::Light, 1));
    let mut world = World::new(&level).expect("valid level");
    let brick = world.snapshot().cell(CellCoord::new(2, 5));

    let events = world.tick(Duration::ZERO, Some(PlayerIntent::firing()));

    assert!(events.contains(&Event::UnitDestroyed {
        unit: UnitId::new(1),
        tier: Tier::Light,
        by: PLAYER,
    }));
    assert!(events.contains(&Event::UnitDamaged {
        unit: PLAYER,
        remaining: 1,
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TerrainDamaged { .. })));
    let snapshot = world.snapshot();
    assert_eq!(snapshot.cell(CellCoord::new(2, 5)), brick);
    assert_eq!(snapshot.score, 100);
}

#[test]
fn heavier_weapons_chip_more_durability() {
    let mut level = corridor();
    level.placements.push(Placement::new(2, 3, Material::Destructible));
    level.spawn_points.push(CellCoord::new(0, 0));
    level.waves.push(wave(Tier::Heavy, 1));
    let mut world = World::new(&level).expect("valid level");

    let cycle = PlayerIntent {
        cycle_weapon: true,
        ..PlayerIntent::default()
    };
    let _ = world.tick(Duration::ZERO, Some(cycle));
    let _ = world.tick(at(10), Some(cycle));
    assert_eq!(query::weapon(&world), Weapon::Heavy);

    let events = world.tick(at(20), Some(PlayerIntent::firing()));
    assert!(events.contains(&Event::TerrainDamaged {
        cell: CellCoord::new(2, 3),
        remaining: 1,
    }));
}

#[test]
fn own_shell_on_the_objective_loses_the_match() {
    let mut level = corridor();
    level.objective = CellCoord::new(2, 3);
    let mut world = World::new(&level).expect("valid level");

    let events = world.tick(Duration::ZERO, Some(PlayerIntent::firing()));

    assert!(events.contains(&Event::MatchEnded {
        outcome: Outcome::DefeatObjectiveLost
    }));
    assert!(!events.contains(&Event::MatchEnded {
        outcome: Outcome::VictoryAllWavesCleared
    }));
}

#[test]
fn waves_arrive_one_interval_apart() {
    let mut level = corridor();
    level.spawn_points.push(CellCoord::new(0, 0));
    level.waves.push(wave(Tier::Heavy, 2));
    let mut world = World::new(&level).expect("valid level");

    let spawned = |events: &[Event]| {
        events
            .iter()
            .filter(|event| matches!(event, Event::UnitSpawned { .. }))
            .count()
    };

    assert_eq!(spawned(&world.tick(Duration::ZERO, None)), 1);
    assert_eq!(spawned(&world.tick(at(9_999), None)), 0);
    assert_eq!(query::next_spawn_at(&world), Some(at(10_000)));
    assert_eq!(spawned(&world.tick(at(10_000), None)), 1);
    assert_eq!(query::next_spawn_at(&world), None);
    assert!(world.snapshot().remaining_waves.is_empty());
}

#[test]
fn ai_units_close_in_on_the_player() {
    let mut level = corridor();
    level.player.start = CellCoord::new(4, 6);
    level.spawn_points.push(CellCoord::new(0, 0));
    level.waves.push(wave(Tier::Light, 1));
    let mut world = World::new(&level).expect("valid level");
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(4, 6);

    for frame in 0..=120 {
        let _ = world.tick(at(frame * 25), Some(PlayerIntent::moving(Direction::Down)));
    }

    let unit = query::unit_view(&world)
        .get(UnitId::new(1))
        .cloned()
        .expect("unit alive");
    assert!(unit.cell.manhattan_distance(target) < start.manhattan_distance(target));
    assert!(unit.planned_at.is_some());
}

#[test]
fn invalid_levels_are_rejected() {
    let mut level = corridor();
    level.waves.push(wave(Tier::Light, 1));
    assert!(World::new(&level).is_err());
}
