#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for HQ Defence.
//!
//! The [`World`] owns the headquarters, the live tower, enemy, and
//! projectile collections, the funds balance, and the random source used
//! for weapon spread. Adapters mutate it exclusively through [`apply`] and
//! read it through the [`query`] module.

mod entities;
mod roster;

use hq_defence_core::{
    CollisionError, Command, DeathCheck, EnemyId, EnemyKind, Entity, Event, GeometryError,
    Playfield, ProjectileId, TowerId, TowerKind, Vector2,
};
use hq_defence_system_builder::{footprint, placement_check};
use hq_defence_system_tower_combat::{CombatStep, TowerCombat, DEFAULT_PROJECTILE_SPEED};
use hq_defence_system_tower_targeting::{EnemyCandidate, TowerTargeting};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use entities::{DamageOutcome, Enemy, Flight, Hq, Projectile, Tower};
pub use roster::{Roster, RosterKey};

/// Speed of an advancing enemy in playfield units per frame.
pub const DEFAULT_ENEMY_SPEED: f32 = 3.0;

const DEFAULT_RNG_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Tunable parameters of a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Bounds used for projectile expiry.
    pub playfield: Playfield,
    /// Center of the headquarters.
    pub hq_center: Vector2,
    /// Balance available before any tower is placed.
    pub starting_funds: u32,
    /// Speed of projectiles fired by towers.
    pub projectile_speed: f32,
    /// Speed of advancing enemies.
    pub enemy_speed: f32,
    /// Which damage call kills an enemy.
    pub death_check: DeathCheck,
    /// Seed of the random source driving weapon spread.
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let playfield = Playfield::default();
        Self {
            hq_center: Vector2::new(playfield.width / 2.0, playfield.height / 2.0),
            playfield,
            starting_funds: 100,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            death_check: DeathCheck::default(),
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Failures that abort a command.
#[derive(Debug, Error)]
pub enum WorldError {
    /// An entity footprint or direction could not be computed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Two entities were tested with colliders that have no implemented test.
    #[error(transparent)]
    Collision(#[from] CollisionError),
}

/// Represents the authoritative HQ Defence world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    hq: Hq,
    towers: Roster<TowerId, Tower>,
    enemies: Roster<EnemyId, Enemy>,
    projectiles: Roster<ProjectileId, Projectile>,
    funds: u32,
    frame: u64,
    rng: ChaCha8Rng,
    targeting: TowerTargeting,
    combat: TowerCombat,
}

impl World {
    /// Creates a world with the headquarters placed and no other entities.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Geometry`] when the headquarters footprint cannot
    /// be built.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        Ok(Self {
            hq: Hq::new(config.hq_center)?,
            towers: Roster::new(),
            enemies: Roster::new(),
            projectiles: Roster::new(),
            funds: config.starting_funds,
            frame: 0,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(config.projectile_speed),
            config,
        })
    }

    fn place_tower(
        &mut self,
        kind: TowerKind,
        center: Vector2,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let rect = footprint(center, kind)?;
        let existing = self.towers.iter().map(|(_, tower)| tower.rect());

        match placement_check(&rect, kind.cost(), self.hq.rect(), existing, self.funds) {
            Ok(()) => {
                self.funds -= kind.cost();
                let tower = self.towers.insert(Tower::new(kind, rect));
                info!(tower = tower.get(), ?kind, funds = self.funds, "tower placed");
                out_events.push(Event::TowerPlaced { tower, kind, rect });
            }
            Err(reason) => {
                warn!(?kind, %reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected {
                    kind,
                    center,
                    reason,
                });
            }
        }
        Ok(())
    }

    fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        center: Vector2,
        armor: i32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let enemy = self.enemies.insert(Enemy::new(kind, center, armor)?);
        debug!(enemy = enemy.get(), ?kind, armor, "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy, kind });
        Ok(())
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        self.frame = self.frame.saturating_add(1);
        out_events.push(Event::TimeAdvanced { frame: self.frame });

        self.update_enemies();
        self.update_towers(out_events)?;
        self.update_projectiles(out_events);
        self.resolve_hits(out_events)?;

        let _ = self.projectiles.sweep();
        let _ = self.enemies.sweep();
        Ok(())
    }

    fn update_enemies(&mut self) {
        let hq_center = self.hq.rect().center();
        for id in self.enemies.live_keys() {
            if let Some(enemy) = self.enemies.get_mut(id) {
                enemy.update(hq_center, self.config.enemy_speed);
            }
        }
    }

    fn update_towers(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        self.targeting.prepare(
            self.enemies
                .iter()
                .map(|(id, enemy)| EnemyCandidate {
                    id,
                    center: enemy.center(),
                }),
        );

        for id in self.towers.live_keys() {
            let Some(tower) = self.towers.get_mut(id) else {
                continue;
            };

            let center = tower.center();
            let target = self.targeting.acquire(center);
            tower.target = target.map(|selected| selected.enemy);

            let step = self.combat.step(
                tower.kind(),
                center,
                &mut tower.shoot_cooldown,
                target.map(|selected| selected.enemy_center),
                &mut self.rng,
            );

            if let (CombatStep::Fire(solution), Some(selected)) = (step, target) {
                let projectile = self.projectiles.insert(Projectile::new(
                    solution.origin,
                    solution.velocity,
                    solution.damage,
                )?);
                debug!(
                    tower = id.get(),
                    projectile = projectile.get(),
                    target = selected.enemy.get(),
                    "tower fired"
                );
                out_events.push(Event::ProjectileFired {
                    tower: id,
                    projectile,
                    target: selected.enemy,
                });
            }
        }
        Ok(())
    }

    fn update_projectiles(&mut self, out_events: &mut Vec<Event>) {
        for id in self.projectiles.live_keys() {
            let Some(projectile) = self.projectiles.get_mut(id) else {
                continue;
            };

            if projectile.update(&self.config.playfield) == Flight::Expired {
                let _ = self.projectiles.retire(id);
                debug!(projectile = id.get(), "projectile left the playfield");
                out_events.push(Event::ProjectileExpired { projectile: id });
            }
        }
    }

    fn resolve_hits(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let enemy_ids = self.enemies.live_keys();

        for projectile_id in self.projectiles.live_keys() {
            let Some(projectile) = self.projectiles.get(projectile_id) else {
                continue;
            };
            let body = *projectile.body();
            let damage = projectile.damage();

            for &enemy_id in &enemy_ids {
                let Some(enemy) = self.enemies.get_mut(enemy_id) else {
                    continue;
                };
                if !body.collides_with(enemy.body())? {
                    continue;
                }

                let outcome = enemy.take_damage(damage, self.config.death_check);
                let _ = self.projectiles.retire(projectile_id);
                out_events.push(Event::ProjectileHit {
                    projectile: projectile_id,
                    enemy: enemy_id,
                    damage,
                });

                if let DamageOutcome::Killed { reward } = outcome {
                    let _ = self.enemies.retire(enemy_id);
                    self.funds = self.funds.saturating_add(reward);
                    info!(
                        enemy = enemy_id.get(),
                        reward,
                        funds = self.funds,
                        "enemy killed"
                    );
                    out_events.push(Event::EnemyKilled {
                        enemy: enemy_id,
                        reward,
                    });
                }
                break;
            }
        }
        Ok(())
    }
}

/// Applies the provided command to the world.
///
/// `Command::Tick` runs one frame in a fixed order: enemies advance, towers
/// acquire targets and fire, projectiles move and expire, projectile hits
/// are resolved against enemies, and finally removed entities are dropped.
/// Towers therefore aim at enemy positions from the current frame.
///
/// # Errors
///
/// Returns [`WorldError`] when the command cannot be carried out; events
/// emitted before the failure remain in `out_events`.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    match command {
        Command::PlaceTower { kind, center } => world.place_tower(kind, center, out_events),
        Command::SpawnEnemy {
            kind,
            center,
            armor,
        } => world.spawn_enemy(kind, center, armor, out_events),
        Command::Tick => world.tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use hq_defence_core::{
        EnemyId, Entity, Playfield, ProjectileId, TowerId, TowerKind, Vector2,
    };
    use hq_defence_system_builder::PlacementPreview;

    use super::{Enemy, Hq, Projectile, Tower, World, WorldConfig};

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// The defended headquarters.
    #[must_use]
    pub fn hq(world: &World) -> &Hq {
        &world.hq
    }

    /// Bounds used for projectile expiry.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.config.playfield
    }

    /// Current balance.
    #[must_use]
    pub fn funds(world: &World) -> u32 {
        world.funds
    }

    /// Number of frames simulated so far.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Live towers in placement order.
    pub fn towers(world: &World) -> impl Iterator<Item = (TowerId, &Tower)> {
        world.towers.iter()
    }

    /// Live enemies in spawn order.
    pub fn enemies(world: &World) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        world.enemies.iter()
    }

    /// Live projectiles in firing order.
    pub fn projectiles(world: &World) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        world.projectiles.iter()
    }

    /// Looks up a live tower.
    #[must_use]
    pub fn tower(world: &World, id: TowerId) -> Option<&Tower> {
        world.towers.get(id)
    }

    /// Looks up a live enemy.
    #[must_use]
    pub fn enemy(world: &World, id: EnemyId) -> Option<&Enemy> {
        world.enemies.get(id)
    }

    /// Resolves a tower's target to the enemy, if it is still alive.
    #[must_use]
    pub fn tower_target(world: &World, id: TowerId) -> Option<&Enemy> {
        let target = world.towers.get(id)?.target()?;
        world.enemies.get(target)
    }

    /// Head rotation for drawing a tower, or `None` for an unknown tower.
    #[must_use]
    pub fn tower_aim_angle(world: &World, id: TowerId) -> Option<f32> {
        let tower = world.towers.get(id)?;
        let target_center = tower_target(world, id).map(Enemy::center);
        Some(tower.aim_angle(target_center))
    }

    /// Reports whether a `kind` tower centered on `center` could be placed now.
    #[must_use]
    pub fn can_place(world: &World, center: Vector2, kind: TowerKind) -> bool {
        hq_defence_system_builder::can_place(
            center,
            kind,
            world.hq.rect(),
            world.towers.iter().map(|(_, tower)| tower.rect()),
            world.funds,
        )
    }

    /// Reports whether the placement preview at `center` should be drawn valid.
    #[must_use]
    pub fn blueprint_is_valid(world: &World, center: Vector2, kind: TowerKind) -> bool {
        hq_defence_system_builder::blueprint_is_valid(
            center,
            kind,
            world.hq.rect(),
            world.towers.iter().map(|(_, tower)| tower.rect()),
            world.funds,
        )
    }

    /// Placement preview a presentation layer draws under the cursor.
    #[must_use]
    pub fn placement_preview(
        world: &World,
        center: Vector2,
        kind: TowerKind,
    ) -> Option<PlacementPreview> {
        hq_defence_system_builder::preview(
            center,
            kind,
            world.hq.rect(),
            world.towers.iter().map(|(_, tower)| tower.rect()),
            world.funds,
        )
    }
}
