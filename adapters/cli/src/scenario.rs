//! Scripted headless runs loaded from TOML.

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use hq_defence_core::{Command, EnemyKind, Event, TowerKind, Vector2};
use hq_defence_world::{self as world, query, World, WorldConfig};
use serde::Deserialize;
use tracing::{debug, info};

const DEFAULT_FRAMES: u64 = 600;

/// Tower placed before the first frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct TowerPlan {
    pub(crate) kind: TowerKind,
    pub(crate) center: Vector2,
}

/// Enemy spawned once the world reaches `frame`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct SpawnPlan {
    pub(crate) frame: u64,
    pub(crate) kind: EnemyKind,
    pub(crate) center: Vector2,
    pub(crate) armor: i32,
}

/// World configuration plus the commands a headless run issues.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Scenario {
    pub(crate) world: WorldConfig,
    pub(crate) frames: u64,
    pub(crate) towers: Vec<TowerPlan>,
    pub(crate) spawns: Vec<SpawnPlan>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            frames: DEFAULT_FRAMES,
            towers: Vec::new(),
            spawns: Vec::new(),
        }
    }
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Runs the scenario to completion and tallies what happened.
    pub(crate) fn run(&self) -> Result<Summary> {
        let mut world = World::new(self.world.clone()).context("failed to create world")?;
        let mut summary = Summary::default();
        let mut events = Vec::new();

        for tower in &self.towers {
            world::apply(
                &mut world,
                Command::PlaceTower {
                    kind: tower.kind,
                    center: tower.center,
                },
                &mut events,
            )
            .context("failed to place scenario tower")?;
        }
        summary.record(&mut events);

        let mut spawns: Vec<&SpawnPlan> = self.spawns.iter().collect();
        spawns.sort_by_key(|spawn| spawn.frame);
        let mut pending = spawns.into_iter().peekable();

        for _ in 0..self.frames {
            let frame = query::frame(&world);
            while let Some(spawn) = pending.next_if(|spawn| spawn.frame <= frame) {
                world::apply(
                    &mut world,
                    Command::SpawnEnemy {
                        kind: spawn.kind,
                        center: spawn.center,
                        armor: spawn.armor,
                    },
                    &mut events,
                )
                .with_context(|| format!("failed to spawn enemy at frame {frame}"))?;
            }

            world::apply(&mut world, Command::Tick, &mut events)
                .with_context(|| format!("frame {} failed", frame + 1))?;
            summary.record(&mut events);
        }

        summary.frames = query::frame(&world);
        summary.funds = query::funds(&world);
        summary.towers = query::towers(&world).count();
        summary.enemies_alive = query::enemies(&world).count();
        info!(frames = summary.frames, kills = summary.kills, "scenario finished");
        Ok(summary)
    }
}

/// Outcome of a headless run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) frames: u64,
    pub(crate) funds: u32,
    pub(crate) towers: usize,
    pub(crate) rejected_towers: usize,
    pub(crate) enemies_spawned: usize,
    pub(crate) enemies_alive: usize,
    pub(crate) shots: usize,
    pub(crate) hits: usize,
    pub(crate) kills: usize,
    pub(crate) expired: usize,
}

impl Summary {
    fn record(&mut self, events: &mut Vec<Event>) {
        for event in events.drain(..) {
            match event {
                Event::TowerPlacementRejected { kind, reason, .. } => {
                    debug!(?kind, %reason, "scenario tower rejected");
                    self.rejected_towers += 1;
                }
                Event::EnemySpawned { .. } => self.enemies_spawned += 1,
                Event::ProjectileFired { .. } => self.shots += 1,
                Event::ProjectileHit { .. } => self.hits += 1,
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::ProjectileExpired { .. } => self.expired += 1,
                Event::TimeAdvanced { .. } | Event::TowerPlaced { .. } => {}
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(f, "funds: {}", self.funds)?;
        writeln!(
            f,
            "towers: {} placed, {} rejected",
            self.towers, self.rejected_towers
        )?;
        writeln!(
            f,
            "enemies: {} spawned, {} killed, {} alive",
            self.enemies_spawned, self.kills, self.enemies_alive
        )?;
        write!(
            f,
            "projectiles: {} fired, {} hit, {} expired",
            self.shots, self.hits, self.expired
        )
    }
}
