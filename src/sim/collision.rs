//! Collision detection between the player and scrolling entities
//!
//! Everything is an axis-aligned rectangle, so detection is a plain overlap
//! test. There is no response: an obstacle hit ends the session and a
//! power-up hit is a pickup.

use super::arena::EntityId;
use super::state::GameState;

/// Result of checking the player against everything on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// First obstacle (in spawn order) overlapping the player
    pub obstacle: Option<EntityId>,
    /// Whether the player overlaps the live power-up
    pub powerup: bool,
}

/// First obstacle overlapping the player. Later obstacles are not examined.
pub fn first_obstacle_hit(state: &GameState) -> Option<EntityId> {
    let player = state.player.rect();
    state
        .obstacles
        .iter()
        .find(|(_, obstacle)| obstacle.rect.intersects(&player))
        .map(|(id, _)| id)
}

pub fn powerup_hit(state: &GameState) -> bool {
    let player = state.player.rect();
    state
        .powerup
        .as_ref()
        .is_some_and(|p| p.rect.intersects(&player))
}

/// Run both checks. The power-up check does not depend on the obstacle check.
pub fn check(state: &GameState) -> CollisionResult {
    CollisionResult {
        obstacle: first_obstacle_hit(state),
        powerup: powerup_hit(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{PowerupTag, Tuning};
    use crate::sim::rect::Rect;
    use crate::sim::state::SessionPhase;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, &tuning);
        state.phase = SessionPhase::Running;
        (state, tuning)
    }

    #[test]
    fn test_no_entities_no_hit() {
        let (state, _) = state();
        assert_eq!(check(&state), CollisionResult::default());
    }

    #[test]
    fn test_obstacle_on_player() {
        let (mut state, tuning) = state();
        let id = state.spawn_obstacle(&tuning);
        state.obstacles.get_mut(id).unwrap().rect = Rect::new(60, 180, 20, 20);
        assert_eq!(first_obstacle_hit(&state), Some(id));
        assert_eq!(check(&state).obstacle, Some(id));
    }

    #[test]
    fn test_first_hit_in_spawn_order() {
        let (mut state, tuning) = state();
        let far = state.spawn_obstacle(&tuning);
        let first = state.spawn_obstacle(&tuning);
        let second = state.spawn_obstacle(&tuning);
        state.obstacles.get_mut(first).unwrap().rect = Rect::new(70, 180, 20, 20);
        state.obstacles.get_mut(second).unwrap().rect = Rect::new(40, 180, 20, 20);
        assert_eq!(first_obstacle_hit(&state), Some(first));
        assert!(state.obstacles.get(far).is_some());
    }

    #[test]
    fn test_obstacle_touching_player_edge_is_not_a_hit() {
        let (mut state, tuning) = state();
        let id = state.spawn_obstacle(&tuning);
        // Player spans x 50..82
        state.obstacles.get_mut(id).unwrap().rect = Rect::new(82, 180, 20, 20);
        assert_eq!(first_obstacle_hit(&state), None);
    }

    #[test]
    fn test_airborne_player_clears_obstacle() {
        let (mut state, tuning) = state();
        let id = state.spawn_obstacle(&tuning);
        state.obstacles.get_mut(id).unwrap().rect = Rect::new(60, 180, 20, 20);
        // Bottom edge exactly on the obstacle's top edge
        state.player.pos.y = 180 - 32;
        assert_eq!(first_obstacle_hit(&state), None);
    }

    #[test]
    fn test_powerup_independent_of_obstacles() {
        let (mut state, tuning) = state();
        state.spawn_powerup(&tuning, PowerupTag::Bomb);
        state.powerup.as_mut().unwrap().rect = Rect::new(55, 150, 32, 32);
        let id = state.spawn_obstacle(&tuning);
        state.obstacles.get_mut(id).unwrap().rect = Rect::new(60, 180, 20, 20);
        let result = check(&state);
        assert_eq!(result.obstacle, Some(id));
        assert!(result.powerup);
    }

    #[test]
    fn test_grounded_player_misses_hovering_powerup() {
        let (mut state, tuning) = state();
        state.spawn_powerup(&tuning, PowerupTag::Bomb);
        // Spawn height, slid over the player's column
        state.powerup.as_mut().unwrap().rect = Rect::new(50, tuning.powerup_y(), 32, 32);
        assert!(!powerup_hit(&state));
    }
}
