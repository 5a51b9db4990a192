#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave-based spawning system responsible for emitting unit spawn commands.

use std::{collections::VecDeque, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tank_battle_core::{CellCoord, Command, WaveEntry};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// State machine that consumes the wave plan one unit at a time.
///
/// At most one spawn is emitted per call, and only once the simulated clock
/// has reached the next spawn time. Each spawn schedules the next one a full
/// interval after the tick that produced it, so a late tick never causes a
/// catch-up burst.
#[derive(Debug)]
pub struct SpawnScheduler {
    plan: VecDeque<WaveEntry>,
    spawn_interval: Duration,
    next_spawn: Duration,
    rng: ChaCha8Rng,
}

impl SpawnScheduler {
    /// Creates a scheduler for the provided wave plan.
    ///
    /// Entries without units are dropped up front. The first spawn is due at
    /// time zero.
    #[must_use]
    pub fn new(config: Config, plan: &[WaveEntry]) -> Self {
        Self {
            plan: plan.iter().copied().filter(|entry| entry.count > 0).collect(),
            spawn_interval: config.spawn_interval,
            next_spawn: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits a `Command::SpawnUnit` when a spawn is due at `now`.
    pub fn handle(&mut self, now: Duration, spawn_points: &[CellCoord], out: &mut Vec<Command>) {
        if now < self.next_spawn || spawn_points.is_empty() {
            return;
        }

        let Some(entry) = self.plan.front_mut() else {
            return;
        };

        let tier = entry.tier;
        entry.count -= 1;
        if entry.count == 0 {
            let _ = self.plan.pop_front();
        }

        let index = self.rng.gen_range(0..spawn_points.len());
        self.next_spawn = now.saturating_add(self.spawn_interval);
        out.push(Command::SpawnUnit {
            tier,
            cell: spawn_points[index],
        });
    }

    /// Reports whether every scheduled unit has been spawned.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.plan.is_empty()
    }

    /// Wave entries that still have units to spawn, in spawn order.
    #[must_use]
    pub fn remaining(&self) -> Vec<WaveEntry> {
        self.plan.iter().copied().collect()
    }

    /// Simulated time at which the next spawn becomes due, if any remain.
    #[must_use]
    pub fn next_spawn_at(&self) -> Option<Duration> {
        if self.plan.is_empty() {
            None
        } else {
            Some(self.next_spawn)
        }
    }
}
