#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects the nearest enemy for each tower.

use hq_defence_core::{EnemyId, Vector2};

/// Enemy position captured for a targeting pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyCandidate {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Center of the enemy bounding box.
    pub center: Vector2,
}

/// Target selected for a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Enemy the tower should engage.
    pub enemy: EnemyId,
    /// Center of the enemy at selection time.
    pub enemy_center: Vector2,
    /// Euclidean distance between the tower and enemy centers.
    pub distance: f32,
}

/// Tower targeting system that reuses a candidate buffer across towers.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    candidates: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with an empty candidate buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the enemies eligible for this pass.
    ///
    /// Candidate order is preserved and decides ties: when two enemies are
    /// equally close the one prepared first wins.
    pub fn prepare<I>(&mut self, enemies: I)
    where
        I: IntoIterator<Item = EnemyCandidate>,
    {
        self.candidates.clear();
        self.candidates.extend(enemies);
    }

    /// Number of candidates captured by the last [`TowerTargeting::prepare`].
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Selects the prepared enemy closest to `tower_center`.
    ///
    /// Returns `None` when no candidates were prepared.
    #[must_use]
    pub fn acquire(&self, tower_center: Vector2) -> Option<TowerTarget> {
        let mut best: Option<TowerTarget> = None;

        for candidate in &self.candidates {
            let distance = candidate.center.subtract(tower_center).length();
            let current = TowerTarget {
                enemy: candidate.id,
                enemy_center: candidate.center,
                distance,
            };

            match &mut best {
                Some(existing) => {
                    if current.distance < existing.distance {
                        *existing = current;
                    }
                }
                None => best = Some(current),
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::{EnemyCandidate, TowerTargeting};
    use hq_defence_core::{EnemyId, Vector2};

    fn candidate(id: u32, x: f32, y: f32) -> EnemyCandidate {
        EnemyCandidate {
            id: EnemyId::new(id),
            center: Vector2::new(x, y),
        }
    }

    #[test]
    fn nearest_enemy_is_selected() {
        let mut system = TowerTargeting::new();
        system.prepare(vec![candidate(1, 10.0, 0.0), candidate(2, 5.0, 0.0)]);

        let target = system.acquire(Vector2::ZERO).expect("target");
        assert_eq!(target.enemy, EnemyId::new(2));
        assert_eq!(target.enemy_center, Vector2::new(5.0, 0.0));
        assert!((target.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn first_prepared_enemy_wins_ties() {
        let mut system = TowerTargeting::new();
        system.prepare(vec![candidate(7, 0.0, 3.0), candidate(3, 3.0, 0.0)]);

        let target = system.acquire(Vector2::ZERO).expect("target");
        assert_eq!(target.enemy, EnemyId::new(7));
    }

    #[test]
    fn both_axes_contribute_to_distance() {
        let mut system = TowerTargeting::new();
        system.prepare(vec![candidate(1, 4.0, 4.0), candidate(2, 5.0, 0.0)]);

        let target = system.acquire(Vector2::ZERO).expect("target");
        assert_eq!(target.enemy, EnemyId::new(2));
    }

    #[test]
    fn empty_candidates_produce_no_target() {
        let mut system = TowerTargeting::new();
        system.prepare(Vec::new());
        assert_eq!(system.candidate_count(), 0);
        assert!(system.acquire(Vector2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn prepare_replaces_previous_candidates() {
        let mut system = TowerTargeting::new();
        system.prepare(vec![candidate(1, 1.0, 0.0)]);
        system.prepare(vec![candidate(2, 50.0, 0.0)]);

        assert_eq!(system.candidate_count(), 1);
        let target = system.acquire(Vector2::ZERO).expect("target");
        assert_eq!(target.enemy, EnemyId::new(2));
    }
}
