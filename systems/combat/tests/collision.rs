use tank_battle_core::{
    CellCoord, Command, Direction, ProjectileId, ProjectileSnapshot, ProjectileView, Role, Tier,
    UnitId, UnitSnapshot, UnitView,
};
use tank_battle_system_combat::CollisionResolver;

const FAR_AWAY: CellCoord = CellCoord::new(40, 40);

fn unit(id: u32, role: Role, cell: CellCoord, health: u32) -> UnitSnapshot {
    UnitSnapshot {
        id: UnitId::new(id),
        role,
        tier: Tier::Light,
        cell,
        facing: Direction::Down,
        health,
        ready_to_fire: false,
        next_hop: None,
        planned_at: None,
    }
}

fn projectile(id: u32, owner: u32, cell: CellCoord, damage: u32) -> ProjectileSnapshot {
    ProjectileSnapshot {
        id: ProjectileId::new(id),
        owner: UnitId::new(owner),
        cell,
        direction: Direction::Up,
        damage,
        speed: 2,
    }
}

fn resolve(
    projectiles: Vec<ProjectileSnapshot>,
    units: Vec<UnitSnapshot>,
    objective: CellCoord,
) -> Vec<Command> {
    let mut resolver = CollisionResolver::new();
    let mut out = Vec::new();
    resolver.handle(
        &ProjectileView::from_snapshots(projectiles),
        &UnitView::from_snapshots(units),
        objective,
        &mut out,
    );
    out
}

#[test]
fn projectile_hits_only_the_first_of_two_stacked_units() {
    let cell = CellCoord::new(3, 3);
    let out = resolve(
        vec![projectile(0, 0, cell, 1)],
        vec![
            unit(7, Role::AiControlled, cell, 3),
            unit(4, Role::AiControlled, cell, 3),
        ],
        FAR_AWAY,
    );

    assert_eq!(
        out,
        vec![Command::ResolveHit {
            projectile: ProjectileId::new(0),
            unit: UnitId::new(4),
            damage: 1,
        }]
    );
}

#[test]
fn second_projectile_moves_on_once_the_first_unit_is_dead() {
    let cell = CellCoord::new(1, 2);
    let out = resolve(
        vec![projectile(10, 0, cell, 1), projectile(11, 0, cell, 1)],
        vec![
            unit(1, Role::AiControlled, cell, 1),
            unit(2, Role::AiControlled, cell, 1),
        ],
        FAR_AWAY,
    );

    assert_eq!(
        out,
        vec![
            Command::ResolveHit {
                projectile: ProjectileId::new(10),
                unit: UnitId::new(1),
                damage: 1,
            },
            Command::ResolveHit {
                projectile: ProjectileId::new(11),
                unit: UnitId::new(2),
                damage: 1,
            },
        ]
    );
}

#[test]
fn wounded_units_keep_absorbing_hits() {
    let cell = CellCoord::new(0, 0);
    let out = resolve(
        vec![projectile(1, 5, cell, 1), projectile(2, 5, cell, 1)],
        vec![unit(3, Role::AiControlled, cell, 5)],
        FAR_AWAY,
    );

    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|command| matches!(
        command,
        Command::ResolveHit { unit, .. } if *unit == UnitId::new(3)
    )));
}

#[test]
fn projectile_owned_by_an_ai_unit_hits_the_player() {
    let cell = CellCoord::new(2, 0);
    let out = resolve(
        vec![projectile(0, 1, cell, 2)],
        vec![
            unit(0, Role::Player, cell, 2),
            unit(1, Role::AiControlled, CellCoord::new(2, 3), 1),
        ],
        FAR_AWAY,
    );

    assert_eq!(
        out,
        vec![Command::ResolveHit {
            projectile: ProjectileId::new(0),
            unit: UnitId::new(0),
            damage: 2,
        }]
    );
}

#[test]
fn objective_is_struck_regardless_of_owner() {
    let objective = CellCoord::new(5, 5);
    let out = resolve(
        vec![projectile(3, 0, objective, 1)],
        vec![unit(0, Role::Player, CellCoord::new(5, 7), 2)],
        objective,
    );

    assert_eq!(
        out,
        vec![Command::StrikeObjective {
            projectile: ProjectileId::new(3),
        }]
    );
}

#[test]
fn projectile_consumed_by_a_unit_never_reaches_the_objective() {
    let objective = CellCoord::new(5, 5);
    let out = resolve(
        vec![projectile(3, 0, objective, 1)],
        vec![unit(2, Role::AiControlled, objective, 4)],
        objective,
    );

    assert_eq!(
        out,
        vec![Command::ResolveHit {
            projectile: ProjectileId::new(3),
            unit: UnitId::new(2),
            damage: 1,
        }]
    );
}

#[test]
fn only_the_first_objective_strike_is_reported() {
    let objective = CellCoord::new(0, 4);
    let out = resolve(
        vec![projectile(8, 1, objective, 1), projectile(9, 2, objective, 1)],
        Vec::new(),
        objective,
    );

    assert_eq!(
        out,
        vec![Command::StrikeObjective {
            projectile: ProjectileId::new(8),
        }]
    );
}
