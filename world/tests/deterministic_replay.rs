use hq_defence_core::{Command, EnemyKind, Event, TowerKind, Vector2};
use hq_defence_world::{self as world, query, World, WorldConfig};

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    funds: u32,
    projectile_centers: Vec<Vector2>,
    enemy_armor: Vec<i32>,
}

#[test]
fn machine_gun_spread_replays_identically_for_a_fixed_seed() {
    let config = WorldConfig {
        rng_seed: 0x5eed,
        ..WorldConfig::default()
    };

    let first = replay(config.clone(), scripted_commands());
    let second = replay(config, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first
            .events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileFired { .. }))
            .count()
            >= 4,
        "script must exercise spread on several shots"
    );
}

fn replay(config: WorldConfig, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(config).expect("valid world");
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events).expect("command runs");
    }

    ReplayOutcome {
        events,
        funds: query::funds(&world),
        projectile_centers: query::projectiles(&world)
            .map(|(_, projectile)| hq_defence_core::Entity::rect(projectile).center())
            .collect(),
        enemy_armor: query::enemies(&world)
            .map(|(_, enemy)| enemy.armor())
            .collect(),
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::PlaceTower {
            kind: TowerKind::Mg,
            center: Vector2::new(250.0, 300.0),
        },
        Command::PlaceTower {
            kind: TowerKind::Sniper,
            center: Vector2::new(400.0, 150.0),
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Boss,
            center: Vector2::new(400.0, 300.0),
            armor: 500,
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Small,
            center: Vector2::new(50.0, 300.0),
            armor: 3,
        },
    ];
    commands.extend(std::iter::repeat(Command::Tick).take(40));
    commands
}
