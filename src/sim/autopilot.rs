//! Idle/demo mode - a bot that jumps over obstacles
//!
//! Purely a function of the visible state, so runs stay deterministic.

use super::state::GameState;
use crate::settings::Tuning;

/// Ticks after take-off before the player's feet clear an obstacle's top
/// edge, or `None` if the jump never gets that high.
pub fn ticks_to_clear(tuning: &Tuning) -> Option<u32> {
    let mut rise = 0;
    let mut velocity = tuning.jump_velocity;
    let mut ticks = 0;
    while velocity < 0 {
        rise -= velocity;
        velocity += tuning.gravity;
        ticks += 1;
        if rise >= tuning.obstacle_height {
            return Some(ticks);
        }
    }
    None
}

/// Decide whether to jump before the next tick
pub fn should_jump(state: &GameState, tuning: &Tuning) -> bool {
    if !state.is_running() || state.player.jumping {
        return false;
    }
    let Some(clear) = ticks_to_clear(tuning) else {
        return false;
    };
    let player = state.player.rect();
    let speed = state.obstacle_speed.max(1);
    // Closest obstacle whose leading edge hasn't reached the player yet
    let gap = state
        .obstacles
        .iter()
        .map(|(_, o)| o.rect.x() - player.right())
        .filter(|&gap| gap >= 0)
        .min();

    // The obstacle reaches the player in gap / speed + 1 ticks; jump so the
    // feet are clear by then.
    gap.is_some_and(|gap| gap < clear as i32 * speed)
}
