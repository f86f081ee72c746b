//! Game state and core simulation types
//!
//! Everything a session mutates lives here. The timers and RNG that drive it
//! are owned by [`super::Session`].

use glam::IVec2;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use super::arena::{Arena, EntityId, PowerupKey};
use super::rect::Rect;
use crate::settings::{PowerupTag, Tuning};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Built but not started; no timers armed
    Idle,
    /// Clock and spawners active
    Running,
    /// Terminal. Nothing ticks, spawns or accepts input.
    Ended,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner. x never changes.
    pub pos: IVec2,
    pub size: IVec2,
    /// Vertical velocity in pixels per tick (negative = up)
    pub velocity: i32,
    pub jumping: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: IVec2::new(tuning.player_x, tuning.resting_y()),
            size: IVec2::new(tuning.player_width, tuning.player_height),
            velocity: 0,
            jumping: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_grounded(&self, tuning: &Tuning) -> bool {
        !self.jumping && self.pos.y == tuning.resting_y()
    }

    /// One tick of vertical motion. Returns true if the player moved.
    pub fn integrate(&mut self, tuning: &Tuning) -> bool {
        if !self.jumping {
            return false;
        }
        self.pos.y = self.pos.y.saturating_add(self.velocity);
        self.velocity = self.velocity.saturating_add(tuning.gravity);
        let resting_y = tuning.resting_y();
        if self.pos.y >= resting_y {
            self.pos.y = resting_y;
            self.velocity = 0;
            self.jumping = false;
        }
        true
    }
}

/// A ground hazard scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// The single collectible that permanently raises the scroll speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: EntityId,
    pub rect: Rect,
    pub tag: PowerupTag,
}

/// How a host should draw an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Player,
    Obstacle,
    Powerup(PowerupTag),
}

/// End-of-session summary handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub jump_count: u32,
    pub permanent_powerups: u32,
    pub obstacle_speed: i32,
    pub ticks: u64,
    pub title: String,
    pub message: String,
}

/// Output for the host, drained after each `advance`/`jump`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId, visual: Visual, rect: Rect },
    Moved { id: EntityId, rect: Rect },
    Despawned { id: EntityId },
    Jumped { jump_count: u32 },
    PowerupCollected {
        tag: PowerupTag,
        permanent_powerups: u32,
        obstacle_speed: i32,
    },
    SessionEnded { report: SessionReport },
    /// Host closed the session before a collision
    SessionClosed,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: SessionPhase,
    pub player: Player,
    /// Live obstacles, iterated in spawn order
    pub obstacles: Arena<Obstacle>,
    /// At most one live power-up
    pub powerup: Option<Powerup>,
    /// Accepted jumps; never decreases
    pub jump_count: u32,
    /// Power-ups collected; never decreases
    pub permanent_powerups: u32,
    /// Scroll rate in pixels per tick; non-decreasing, capped at `Tuning::max_speed`
    pub obstacle_speed: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending host output
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Issues a fresh key for every power-up
    powerup_keys: SlotMap<PowerupKey, ()>,
}

impl GameState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: SessionPhase::Idle,
            player: Player::new(tuning),
            obstacles: Arena::new(),
            powerup: None,
            jump_count: 0,
            permanent_powerups: 0,
            obstacle_speed: tuning.base_speed,
            time_ticks: 0,
            events: Vec::new(),
            powerup_keys: SlotMap::with_key(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Start a jump if the player is on the ground. Returns whether it was accepted.
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if !self.is_running() || self.player.jumping {
            return false;
        }
        self.player.jumping = true;
        self.player.velocity = tuning.jump_velocity;
        self.jump_count += 1;
        self.events.push(GameEvent::Jumped {
            jump_count: self.jump_count,
        });
        true
    }

    /// Place a new obstacle on the ground at the right edge
    pub fn spawn_obstacle(&mut self, tuning: &Tuning) -> EntityId {
        let rect = Rect::new(
            tuning.arena_width,
            tuning.obstacle_y(),
            tuning.obstacle_width,
            tuning.obstacle_height,
        );
        let id = self.obstacles.insert(Obstacle { rect });
        self.events.push(GameEvent::Spawned {
            id,
            visual: Visual::Obstacle,
            rect,
        });
        id
    }

    /// Place a power-up unless one is already live
    pub fn spawn_powerup(&mut self, tuning: &Tuning, tag: PowerupTag) -> Option<EntityId> {
        if self.powerup.is_some() {
            return None;
        }
        let id = EntityId::Powerup(self.powerup_keys.insert(()));
        let rect = Rect::new(
            tuning.powerup_x(),
            tuning.powerup_y(),
            tuning.powerup_size,
            tuning.powerup_size,
        );
        self.powerup = Some(Powerup { id, rect, tag });
        self.events.push(GameEvent::Spawned {
            id,
            visual: Visual::Powerup(tag),
            rect,
        });
        Some(id)
    }

    /// Consume the live power-up and apply the permanent speed boost
    pub fn collect_powerup(&mut self, tuning: &Tuning) -> Option<PowerupTag> {
        let powerup = self.take_powerup()?;
        self.apply_speed_boost(tuning);
        self.events.push(GameEvent::PowerupCollected {
            tag: powerup.tag,
            permanent_powerups: self.permanent_powerups,
            obstacle_speed: self.obstacle_speed,
        });
        Some(powerup.tag)
    }

    pub fn apply_speed_boost(&mut self, tuning: &Tuning) {
        self.permanent_powerups += 1;
        self.obstacle_speed = tuning
            .speed_after(self.permanent_powerups)
            .max(self.obstacle_speed);
    }

    /// Despawn every obstacle and the power-up
    pub fn clear_entities(&mut self) {
        for (id, _) in self.obstacles.drain() {
            self.events.push(GameEvent::Despawned { id });
        }
        self.take_powerup();
    }

    /// Remove the live power-up without applying its effect
    pub fn take_powerup(&mut self) -> Option<Powerup> {
        let powerup = self.powerup.take()?;
        if let EntityId::Powerup(key) = powerup.id {
            self.powerup_keys.remove(key);
        }
        self.events.push(GameEvent::Despawned { id: powerup.id });
        Some(powerup)
    }

    /// Total live entities besides the player
    pub fn live_entities(&self) -> usize {
        self.obstacles.len() + usize::from(self.powerup.is_some())
    }
}
