//! Fixed timestep simulation tick
//!
//! One tick: player integration, scroll, off-screen culling, then collision.

use glam::IVec2;

use super::arena::EntityId;
use super::collision;
use super::state::{GameEvent, GameState};
use crate::settings::Tuning;

/// What the tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session keeps running
    Continue,
    /// Player hit this obstacle; the caller must end the session
    Collided(EntityId),
    /// Nothing happened because the session is not running
    Skipped,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, tuning: &Tuning) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Skipped;
    }

    state.time_ticks += 1;

    if state.player.integrate(tuning) {
        state.events.push(GameEvent::Moved {
            id: EntityId::Player,
            rect: state.player.rect(),
        });
    }

    scroll_obstacles(state);
    scroll_powerup(state);

    let hits = collision::check(state);
    if let Some(id) = hits.obstacle {
        log::debug!("Tick {}: obstacle {:?} hit the player", state.time_ticks, id);
        return TickOutcome::Collided(id);
    }
    if hits.powerup {
        if let Some(tag) = state.collect_powerup(tuning) {
            log::debug!(
                "Tick {}: collected {} (speed now {})",
                state.time_ticks,
                tag.as_str(),
                state.obstacle_speed
            );
        }
    }

    log::trace!(
        "Tick {}: y={} v={} obstacles={}",
        state.time_ticks,
        state.player.pos.y,
        state.player.velocity,
        state.obstacles.len()
    );
    TickOutcome::Continue
}

fn scroll_obstacles(state: &mut GameState) {
    let delta = IVec2::new(-state.obstacle_speed, 0);
    for id in state.obstacles.ids() {
        let Some(obstacle) = state.obstacles.get_mut(id) else {
            continue;
        };
        obstacle.rect = obstacle.rect.translated(delta);
        let rect = obstacle.rect;
        if rect.is_past_left_edge() {
            state.obstacles.remove(id);
            state.events.push(GameEvent::Despawned { id });
        } else {
            state.events.push(GameEvent::Moved { id, rect });
        }
    }
}

fn scroll_powerup(state: &mut GameState) {
    let delta = IVec2::new(-state.obstacle_speed, 0);
    let Some(powerup) = state.powerup.as_mut() else {
        return;
    };
    powerup.rect = powerup.rect.translated(delta);
    let (id, rect) = (powerup.id, powerup.rect);
    if rect.is_past_left_edge() {
        // Expired: discarded with no effect
        state.take_powerup();
    } else {
        state.events.push(GameEvent::Moved { id, rect });
    }
}
