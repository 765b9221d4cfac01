#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the HQ Defence simulation.
//!
//! This crate defines the value types (vectors, rectangles, collider shapes)
//! and the message surface that connects adapters, the authoritative world,
//! and pure systems. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then reports [`Event`] values describing what happened during the
//! frame.

mod collider;
mod geometry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use collider::{Body, ColliderError, ColliderShape, CollisionError, Entity};
pub use geometry::{GeometryError, Playfield, Rectangle, Vector2};

/// Footprint of the headquarters every enemy walks toward.
pub const HQ_SIZE: Vector2 = Vector2::new(40.0, 40.0);

/// Footprint of every projectile fired by a tower.
pub const PROJECTILE_SIZE: Vector2 = Vector2::new(16.0, 16.0);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests placement of a tower centered on the provided point.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Point the tower footprint is centered on.
        center: Vector2,
    },
    /// Requests that a new enemy enter the playfield.
    SpawnEnemy {
        /// Type of enemy to create.
        kind: EnemyKind,
        /// Point the enemy footprint is centered on.
        center: Vector2,
        /// Starting armor (hit points) of the enemy.
        armor: i32,
    },
    /// Advances the simulation by a single frame.
    Tick,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced to a new frame.
    TimeAdvanced {
        /// Index of the frame that just ran, starting at one.
        frame: u64,
    },
    /// Confirms that a tower was placed and paid for.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Footprint occupied by the tower.
        rect: Rectangle,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Requested center of the footprint.
        center: Vector2,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy by the world.
        enemy: EnemyId,
        /// Type of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports that a tower fired at its current target.
    ProjectileFired {
        /// Tower that fired.
        tower: TowerId,
        /// Identifier assigned to the new projectile.
        projectile: ProjectileId,
        /// Enemy the tower was aiming at.
        target: EnemyId,
    },
    /// Reports that a projectile left the playfield without hitting anything.
    ProjectileExpired {
        /// Projectile that was removed.
        projectile: ProjectileId,
    },
    /// Reports that a projectile struck an enemy and was consumed.
    ProjectileHit {
        /// Projectile that was removed.
        projectile: ProjectileId,
        /// Enemy that absorbed the hit.
        enemy: EnemyId,
        /// Damage carried by the projectile.
        damage: i32,
    },
    /// Reports that an enemy died and its reward was credited.
    EnemyKilled {
        /// Enemy that was removed.
        enemy: EnemyId,
        /// Funds credited for the kill.
        reward: u32,
    },
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a tower.
    TowerId
);
entity_id!(
    /// Unique identifier assigned to an enemy.
    EnemyId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Machine gun: cheap damage per shot, fast cadence, inaccurate.
    Mg,
    /// Sniper: heavy damage per shot, slow cadence, perfectly accurate.
    Sniper,
}

impl TowerKind {
    /// Footprint of the tower.
    #[must_use]
    pub const fn size(self) -> Vector2 {
        match self {
            Self::Mg => Vector2::new(48.0, 48.0),
            Self::Sniper => Vector2::new(32.0, 32.0),
        }
    }

    /// Damage carried by each projectile the tower fires.
    #[must_use]
    pub const fn damage(self) -> i32 {
        match self {
            Self::Mg => 2,
            Self::Sniper => 8,
        }
    }

    /// Funds required to place the tower.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Mg => 60,
            Self::Sniper => 40,
        }
    }

    /// Frames the tower waits after a shot before it may fire again.
    #[must_use]
    pub const fn max_shoot_cooldown(self) -> u32 {
        match self {
            Self::Mg => 6,
            Self::Sniper => 30,
        }
    }

    /// Half-width of the uniform velocity perturbation applied per axis.
    ///
    /// Zero means the tower fires straight at its target.
    #[must_use]
    pub const fn spread(self) -> f32 {
        match self {
            Self::Mg => 2.0,
            Self::Sniper => 0.0,
        }
    }
}

/// Types of enemies the spawner may send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Small, cheap enemy.
    Small,
    /// Medium enemy.
    Big,
    /// Large enemy worth a hefty reward.
    Boss,
}

impl EnemyKind {
    /// Footprint of the enemy.
    #[must_use]
    pub const fn size(self) -> Vector2 {
        match self {
            Self::Small => Vector2::new(8.0, 8.0),
            Self::Big => Vector2::new(16.0, 16.0),
            Self::Boss => Vector2::new(48.0, 48.0),
        }
    }

    /// Funds credited when the enemy dies.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Small => 1,
            Self::Big => 2,
            Self::Boss => 10,
        }
    }
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The footprint overlaps the headquarters.
    #[error("footprint overlaps the headquarters")]
    OverlapsHq,
    /// The footprint overlaps an existing tower.
    #[error("footprint overlaps an existing tower")]
    OverlapsTower,
    /// The balance cannot cover the tower cost.
    #[error("insufficient funds: need {cost}, have {funds}")]
    InsufficientFunds {
        /// Cost of the requested tower.
        cost: u32,
        /// Balance at the time of the request.
        funds: u32,
    },
}

/// Policy deciding which damage call kills an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCheck {
    /// Armor is inspected before damage is applied: a hit on an enemy whose
    /// armor is already non-positive kills it, so death lands one hit late.
    #[default]
    BeforeDamage,
    /// Armor is inspected after damage is applied: the hit that brings armor
    /// to zero or below kills the enemy.
    AfterDamage,
}

/// Coarse armor bracket used by presentation layers to tint enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmorTier {
    /// Armor of eight or more.
    Strong,
    /// Armor between four and seven.
    Worn,
    /// Armor below four.
    Critical,
}

impl ArmorTier {
    /// Classifies the provided armor value.
    #[must_use]
    pub const fn from_armor(armor: i32) -> Self {
        if armor >= 8 {
            Self::Strong
        } else if armor >= 4 {
            Self::Worn
        } else {
            Self::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArmorTier, DeathCheck, EnemyKind, PlacementError, TowerId, TowerKind, Vector2};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tower_catalog_matches_design_values() {
        assert_eq!(TowerKind::Mg.size(), Vector2::new(48.0, 48.0));
        assert_eq!(TowerKind::Mg.damage(), 2);
        assert_eq!(TowerKind::Mg.cost(), 60);
        assert_eq!(TowerKind::Mg.max_shoot_cooldown(), 6);

        assert_eq!(TowerKind::Sniper.size(), Vector2::new(32.0, 32.0));
        assert_eq!(TowerKind::Sniper.damage(), 8);
        assert_eq!(TowerKind::Sniper.cost(), 40);
        assert_eq!(TowerKind::Sniper.max_shoot_cooldown(), 30);
        assert_eq!(TowerKind::Sniper.spread(), 0.0);
    }

    #[test]
    fn enemy_catalog_matches_design_values() {
        assert_eq!(EnemyKind::Small.size(), Vector2::new(8.0, 8.0));
        assert_eq!(EnemyKind::Small.reward(), 1);
        assert_eq!(EnemyKind::Big.size(), Vector2::new(16.0, 16.0));
        assert_eq!(EnemyKind::Big.reward(), 2);
        assert_eq!(EnemyKind::Boss.size(), Vector2::new(48.0, 48.0));
        assert_eq!(EnemyKind::Boss.reward(), 10);
    }

    #[test]
    fn armor_tiers_use_inclusive_lower_bounds() {
        assert_eq!(ArmorTier::from_armor(8), ArmorTier::Strong);
        assert_eq!(ArmorTier::from_armor(7), ArmorTier::Worn);
        assert_eq!(ArmorTier::from_armor(4), ArmorTier::Worn);
        assert_eq!(ArmorTier::from_armor(3), ArmorTier::Critical);
        assert_eq!(ArmorTier::from_armor(-2), ArmorTier::Critical);
    }

    #[test]
    fn default_death_check_keeps_legacy_timing() {
        assert_eq!(DeathCheck::default(), DeathCheck::BeforeDamage);
    }

    #[test]
    fn tower_id_round_trips_through_bincode() {
        assert_round_trip(&TowerId::new(42));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientFunds { cost: 60, funds: 30 });
    }
}
