#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that advances tower cooldowns and computes firing solutions.
//!
//! Each frame a tower either burns one frame of cooldown or, once the
//! cooldown has run out, fires at its target. The system never touches the
//! projectile collection; it reports what should be spawned and the world
//! performs the mutation.

use hq_defence_core::{TowerKind, Vector2};
use rand::Rng;

/// Speed of a freshly fired projectile in playfield units per frame.
pub const DEFAULT_PROJECTILE_SPEED: f32 = 6.0;

/// Outcome of a single tower's combat step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombatStep {
    /// The tower spent this frame cooling down.
    CoolingDown {
        /// Cooldown left after the decrement.
        remaining: u32,
    },
    /// The tower is ready but has nothing it can shoot at.
    Holding,
    /// The tower fired; the caller spawns the projectile.
    Fire(FireSolution),
}

/// Projectile parameters produced by a successful shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireSolution {
    /// Spawn point of the projectile (the tower center).
    pub origin: Vector2,
    /// Projectile velocity in playfield units per frame.
    pub velocity: Vector2,
    /// Damage carried by the projectile.
    pub damage: i32,
}

/// Tower combat system parameterised by projectile speed.
#[derive(Clone, Copy, Debug)]
pub struct TowerCombat {
    projectile_speed: f32,
}

impl Default for TowerCombat {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTILE_SPEED)
    }
}

impl TowerCombat {
    /// Creates a combat system firing projectiles at `projectile_speed`.
    #[must_use]
    pub const fn new(projectile_speed: f32) -> Self {
        Self { projectile_speed }
    }

    /// Advances one tower by a frame.
    ///
    /// `cooldown` is decremented while it is at least one. Once it reads
    /// below one and `target_center` is known the tower fires and the
    /// cooldown resets to the kind's maximum. Without a target, or when the
    /// target sits exactly on the tower center, the shot is held and the
    /// cooldown stays at zero.
    pub fn step<R: Rng + ?Sized>(
        &self,
        kind: TowerKind,
        tower_center: Vector2,
        cooldown: &mut u32,
        target_center: Option<Vector2>,
        rng: &mut R,
    ) -> CombatStep {
        if *cooldown >= 1 {
            *cooldown -= 1;
            return CombatStep::CoolingDown {
                remaining: *cooldown,
            };
        }

        let Some(target_center) = target_center else {
            return CombatStep::Holding;
        };

        let Some(velocity) = self.aim(kind, tower_center, target_center, rng) else {
            return CombatStep::Holding;
        };

        *cooldown = kind.max_shoot_cooldown();
        CombatStep::Fire(FireSolution {
            origin: tower_center,
            velocity,
            damage: kind.damage(),
        })
    }

    /// Computes the projectile velocity from `from` toward `to`.
    ///
    /// Returns `None` when the two points coincide.
    pub fn aim<R: Rng + ?Sized>(
        &self,
        kind: TowerKind,
        from: Vector2,
        to: Vector2,
        rng: &mut R,
    ) -> Option<Vector2> {
        let direction = to.subtract(from).normalized().ok()?;
        let velocity = direction.scale(self.projectile_speed);

        let spread = kind.spread();
        if spread <= 0.0 {
            return Some(velocity);
        }

        Some(Vector2::new(
            velocity.x + rng.gen_range(-spread..spread),
            velocity.y + rng.gen_range(-spread..spread),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn sniper_fires_straight_at_projectile_speed() {
        let combat = TowerCombat::default();
        let mut cooldown = 0;

        let step = combat.step(
            TowerKind::Sniper,
            Vector2::ZERO,
            &mut cooldown,
            Some(Vector2::new(0.0, 40.0)),
            &mut rng(),
        );

        assert_eq!(
            step,
            CombatStep::Fire(FireSolution {
                origin: Vector2::ZERO,
                velocity: Vector2::new(0.0, 6.0),
                damage: 8,
            })
        );
        assert_eq!(cooldown, 30);
    }

    #[test]
    fn mg_spread_stays_within_half_open_band() {
        let combat = TowerCombat::default();
        let mut rng = rng();

        for _ in 0..500 {
            let velocity = combat
                .aim(TowerKind::Mg, Vector2::ZERO, Vector2::new(10.0, 0.0), &mut rng)
                .expect("distinct points");
            assert!(velocity.x >= 4.0 && velocity.x <= 8.0, "x = {}", velocity.x);
            assert!(velocity.y >= -2.0 && velocity.y <= 2.0, "y = {}", velocity.y);
        }
    }

    #[test]
    fn cooling_tower_decrements_and_skips_firing() {
        let combat = TowerCombat::default();
        let mut cooldown = 3;

        let step = combat.step(
            TowerKind::Mg,
            Vector2::ZERO,
            &mut cooldown,
            Some(Vector2::new(5.0, 5.0)),
            &mut rng(),
        );

        assert_eq!(step, CombatStep::CoolingDown { remaining: 2 });
        assert_eq!(cooldown, 2);
    }

    #[test]
    fn ready_tower_without_target_keeps_zero_cooldown() {
        let combat = TowerCombat::default();
        let mut cooldown = 0;

        let step = combat.step(TowerKind::Mg, Vector2::ZERO, &mut cooldown, None, &mut rng());

        assert_eq!(step, CombatStep::Holding);
        assert_eq!(cooldown, 0);
    }

    #[test]
    fn target_on_tower_center_holds_fire() {
        let combat = TowerCombat::default();
        let mut cooldown = 0;
        let center = Vector2::new(12.0, 12.0);

        let step = combat.step(TowerKind::Sniper, center, &mut cooldown, Some(center), &mut rng());

        assert_eq!(step, CombatStep::Holding);
        assert_eq!(cooldown, 0);
    }

    #[test]
    fn mg_fires_again_on_seventh_frame_after_a_shot() {
        let combat = TowerCombat::default();
        let mut rng = rng();
        let mut cooldown = 0;
        let target = Some(Vector2::new(100.0, 0.0));

        let first = combat.step(TowerKind::Mg, Vector2::ZERO, &mut cooldown, target, &mut rng);
        assert!(matches!(first, CombatStep::Fire(_)));
        assert_eq!(cooldown, 6);

        for expected in (0..6).rev() {
            let step = combat.step(TowerKind::Mg, Vector2::ZERO, &mut cooldown, target, &mut rng);
            assert_eq!(step, CombatStep::CoolingDown { remaining: expected });
        }
        assert_eq!(cooldown, 0);

        let again = combat.step(TowerKind::Mg, Vector2::ZERO, &mut cooldown, target, &mut rng);
        assert!(matches!(again, CombatStep::Fire(_)));
    }
}
