//! Simulation entities owned by the world.

use std::f32::consts::PI;

use hq_defence_core::{
    ArmorTier, Body, DeathCheck, EnemyId, EnemyKind, Entity, GeometryError, Playfield, Rectangle,
    TowerKind, Vector2, HQ_SIZE, PROJECTILE_SIZE,
};
use tracing::debug;

/// Rotation added to the aim direction so sprites drawn facing up point at the target.
const AIM_SPRITE_OFFSET: f32 = 2.0 * PI * 0.75;

/// The single structure defended by the player.
#[derive(Clone, Debug)]
pub struct Hq {
    body: Body,
}

impl Hq {
    /// Creates the headquarters centered on `center`.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from the footprint construction.
    pub fn new(center: Vector2) -> Result<Self, GeometryError> {
        Ok(Self {
            body: Body::square(Rectangle::centered(center, HQ_SIZE)?),
        })
    }
}

impl Entity for Hq {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// A placed, stationary combat unit.
#[derive(Clone, Debug)]
pub struct Tower {
    body: Body,
    kind: TowerKind,
    pub(crate) shoot_cooldown: u32,
    pub(crate) target: Option<EnemyId>,
}

impl Tower {
    /// Creates a tower occupying `rect`, starting with a full cooldown.
    #[must_use]
    pub fn new(kind: TowerKind, rect: Rectangle) -> Self {
        Self {
            body: Body::square(rect),
            kind,
            shoot_cooldown: kind.max_shoot_cooldown(),
            target: None,
        }
    }

    /// Type of the tower.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Frames left before the tower may fire again.
    #[must_use]
    pub const fn shoot_cooldown(&self) -> u32 {
        self.shoot_cooldown
    }

    /// Enemy selected during the most recent frame, if any.
    ///
    /// The identifier may refer to an enemy removed later in that frame.
    #[must_use]
    pub const fn target(&self) -> Option<EnemyId> {
        self.target
    }

    /// Center of the tower footprint.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        self.body.rect().center()
    }

    /// Head rotation in radians for a tower aiming at `target_center`.
    ///
    /// Returns zero when the tower has nothing to aim at.
    #[must_use]
    pub fn aim_angle(&self, target_center: Option<Vector2>) -> f32 {
        match target_center {
            Some(target) => {
                let offset = target.subtract(self.center());
                offset.y.atan2(offset.x) + AIM_SPRITE_OFFSET
            }
            None => 0.0,
        }
    }
}

impl Entity for Tower {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Result of a single [`Enemy::take_damage`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The enemy survived the call; `armor` is what remains.
    Absorbed {
        /// Armor left after the call.
        armor: i32,
    },
    /// The enemy died on this call and pays `reward`.
    Killed {
        /// Funds owed for the kill.
        reward: u32,
    },
    /// The enemy had already died; nothing changed.
    AlreadyDead,
}

/// An advancing hostile unit.
#[derive(Clone, Debug)]
pub struct Enemy {
    body: Body,
    kind: EnemyKind,
    armor: i32,
    vel: Vector2,
    has_target: bool,
    is_dead: bool,
}

impl Enemy {
    /// Creates an enemy of `kind` centered on `center` with `armor` hit points.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from the footprint construction.
    pub fn new(kind: EnemyKind, center: Vector2, armor: i32) -> Result<Self, GeometryError> {
        Ok(Self {
            body: Body::square(Rectangle::centered(center, kind.size())?),
            kind,
            armor,
            vel: Vector2::ZERO,
            has_target: false,
            is_dead: false,
        })
    }

    /// Type of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Remaining armor; may be negative.
    #[must_use]
    pub const fn armor(&self) -> i32 {
        self.armor
    }

    /// Velocity fixed on the first update.
    #[must_use]
    pub const fn velocity(&self) -> Vector2 {
        self.vel
    }

    /// Reports whether the velocity has been aimed at the headquarters.
    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.has_target
    }

    /// Reports whether the enemy has died.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Center of the enemy footprint.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        self.body.rect().center()
    }

    /// Armor bracket used for tinting.
    #[must_use]
    pub const fn armor_tier(&self) -> ArmorTier {
        ArmorTier::from_armor(self.armor)
    }

    /// Advances the enemy by one frame.
    ///
    /// The first call aims the enemy at `hq_center` with magnitude `speed`;
    /// later calls keep that velocity even if the target moves. An enemy
    /// spawned exactly on `hq_center` has no direction and stays put.
    pub fn update(&mut self, hq_center: Vector2, speed: f32) {
        if !self.has_target {
            self.vel = match hq_center.subtract(self.center()).normalized() {
                Ok(direction) => direction.scale(speed),
                Err(error) => {
                    debug!(%error, "enemy spawned on the hq center, holding position");
                    Vector2::ZERO
                }
            };
            self.has_target = true;
        }

        self.body.translate(self.vel);
    }

    /// Applies `amount` damage under the `policy` death check.
    ///
    /// Armor is never clamped. A dead enemy ignores further damage so its
    /// reward can only be claimed once.
    pub fn take_damage(&mut self, amount: i32, policy: DeathCheck) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::AlreadyDead;
        }

        match policy {
            DeathCheck::BeforeDamage => {
                if self.armor > 0 {
                    self.armor = self.armor.saturating_sub(amount);
                    return DamageOutcome::Absorbed { armor: self.armor };
                }
            }
            DeathCheck::AfterDamage => {
                self.armor = self.armor.saturating_sub(amount);
                if self.armor > 0 {
                    return DamageOutcome::Absorbed { armor: self.armor };
                }
            }
        }

        self.is_dead = true;
        DamageOutcome::Killed {
            reward: self.kind.reward(),
        }
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Whether a projectile is still travelling after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    /// Still overlapping or touching the playfield.
    InFlight,
    /// Fully outside the playfield; the projectile should be removed.
    Expired,
}

/// A fired, moving hazard.
#[derive(Clone, Debug)]
pub struct Projectile {
    body: Body,
    vel: Vector2,
    damage: i32,
}

impl Projectile {
    /// Creates a projectile centered on `center`.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from the footprint construction.
    pub fn new(center: Vector2, vel: Vector2, damage: i32) -> Result<Self, GeometryError> {
        Ok(Self {
            body: Body::square(Rectangle::centered(center, PROJECTILE_SIZE)?),
            vel,
            damage,
        })
    }

    /// Velocity in playfield units per frame.
    #[must_use]
    pub const fn velocity(&self) -> Vector2 {
        self.vel
    }

    /// Damage dealt on impact.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Moves the projectile one frame and reports whether it left `playfield`.
    pub fn update(&mut self, playfield: &Playfield) -> Flight {
        self.body.translate(self.vel);
        if playfield.is_fully_outside(self.body.rect()) {
            Flight::Expired
        } else {
            Flight::InFlight
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
}
