//! Jittered spawn scheduling for obstacles and power-ups
//!
//! Each spawner re-arms itself for `base + uniform(0, jitter)` after every
//! firing, so obstacles arrive on an irregular rhythm.

use rand::Rng;

use super::arena::EntityId;
use super::state::GameState;
use crate::bounded;
use crate::settings::Tuning;

/// Re-arm cadence of one spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    pub base_ms: u64,
    pub jitter_ms: u64,
}

impl Spawner {
    pub fn obstacles(tuning: &Tuning) -> Self {
        Self {
            base_ms: tuning.obstacle_spawn_ms,
            jitter_ms: tuning.obstacle_jitter_ms,
        }
    }

    pub fn powerups(tuning: &Tuning) -> Self {
        Self {
            base_ms: tuning.powerup_spawn_ms,
            jitter_ms: tuning.powerup_jitter_ms,
        }
    }

    /// Delay until the next firing
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.base_ms.saturating_add(bounded(rng, self.jitter_ms))
    }
}

/// What a spawner firing produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnResult {
    /// New entity, if one was created
    pub spawned: Option<EntityId>,
    /// Delay before this spawner fires again
    pub rearm_ms: u64,
}

/// Obstacle spawner firing: always spawns one obstacle
pub fn fire_obstacle_spawner<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> SpawnResult {
    let id = state.spawn_obstacle(tuning);
    log::debug!("Spawned obstacle {:?} ({} live)", id, state.obstacles.len());
    SpawnResult {
        spawned: Some(id),
        rearm_ms: Spawner::obstacles(tuning).next_delay(rng),
    }
}

/// Power-up spawner firing: does nothing while a power-up is live
pub fn fire_powerup_spawner<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> SpawnResult {
    let spawned = if state.powerup.is_some() {
        log::trace!("Power-up spawn skipped, one is already live");
        None
    } else {
        let index = bounded(rng, tuning.powerup_tags.len() as u64) as usize;
        // validate() guarantees the table is non-empty
        let tag = tuning.powerup_tags.get(index).copied();
        let spawned = tag.and_then(|tag| state.spawn_powerup(tuning, tag));
        if let (Some(id), Some(tag)) = (spawned, tag) {
            log::debug!("Spawned power-up {:?} ({})", id, tag.as_str());
        }
        spawned
    };
    SpawnResult {
        spawned,
        rearm_ms: Spawner::powerups(tuning).next_delay(rng),
    }
}
