//! Game tuning
//!
//! Every gameplay constant and lookup table lives in [`Tuning`]. Hosts use
//! the defaults or override individual fields from a JSON file; missing
//! fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Symbolic reward marker shown on a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupTag {
    Diamond,
    Bomb,
    Mango,
    Egg,
    Moai,
    Firecracker,
}

impl PowerupTag {
    pub const ALL: [PowerupTag; 6] = [
        PowerupTag::Diamond,
        PowerupTag::Bomb,
        PowerupTag::Mango,
        PowerupTag::Egg,
        PowerupTag::Moai,
        PowerupTag::Firecracker,
    ];

    /// Glyph a text-capable host can draw
    pub fn glyph(&self) -> &'static str {
        match self {
            PowerupTag::Diamond => "💠",
            PowerupTag::Bomb => "💣",
            PowerupTag::Mango => "🥭",
            PowerupTag::Egg => "🥚",
            PowerupTag::Moai => "🗿",
            PowerupTag::Firecracker => "🧨",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupTag::Diamond => "Diamond",
            PowerupTag::Bomb => "Bomb",
            PowerupTag::Mango => "Mango",
            PowerupTag::Egg => "Egg",
            PowerupTag::Moai => "Moai",
            PowerupTag::Firecracker => "Firecracker",
        }
    }
}

/// Default end-of-session messages. `{jumps}` is replaced by the jump count.
pub const DEFAULT_END_MESSAGES: [&str; 6] = [
    "You failed spectacularly! Total jumps: {jumps}",
    "Well… that was short-lived. Jumps: {jumps}",
    "Gravity says hi. You managed {jumps} jumps.",
    "Epic fail unlocked! Score: {jumps}",
    "Ouch. Only {jumps} jumps before disaster.",
    "Congratulations, you’ve invented a new way to lose. Jumps: {jumps}",
];

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub arena_width: i32,
    pub arena_height: i32,
    /// Screen y of the ground line; grounded entities have their bottom edge here
    pub ground_y: i32,

    // === Player ===
    pub player_x: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub gravity: i32,
    pub jump_velocity: i32,

    // === Obstacles ===
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    pub base_speed: i32,
    pub max_speed: i32,
    pub obstacle_spawn_ms: u64,
    pub obstacle_jitter_ms: u64,

    // === Power-ups ===
    pub powerup_size: i32,
    pub powerup_inset: i32,
    pub powerup_gap: i32,
    pub powerup_spawn_ms: u64,
    pub powerup_jitter_ms: u64,
    pub speed_boost: f64,
    pub powerup_tags: Vec<PowerupTag>,

    // === Timing ===
    pub tick_ms: u64,
    pub max_frame_ms: u64,

    // === Messages ===
    pub end_title: String,
    pub end_messages: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            base_speed: BASE_OBSTACLE_SPEED,
            max_speed: MAX_OBSTACLE_SPEED,
            obstacle_spawn_ms: OBSTACLE_SPAWN_MS,
            obstacle_jitter_ms: OBSTACLE_JITTER_MS,

            powerup_size: POWERUP_SIZE,
            powerup_inset: POWERUP_INSET,
            powerup_gap: POWERUP_GAP,
            powerup_spawn_ms: POWERUP_SPAWN_MS,
            powerup_jitter_ms: POWERUP_JITTER_MS,
            speed_boost: SPEED_BOOST,
            powerup_tags: PowerupTag::ALL.to_vec(),

            tick_ms: TICK_MS,
            max_frame_ms: MAX_FRAME_MS,

            end_title: "Game Over".to_string(),
            end_messages: DEFAULT_END_MESSAGES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let intervals = [
            ("tick_ms", self.tick_ms),
            ("max_frame_ms", self.max_frame_ms),
            ("obstacle_spawn_ms", self.obstacle_spawn_ms),
            ("obstacle_jitter_ms", self.obstacle_jitter_ms),
            ("powerup_spawn_ms", self.powerup_spawn_ms),
            ("powerup_jitter_ms", self.powerup_jitter_ms),
        ];
        for (field, ms) in intervals {
            if ms > MAX_INTERVAL_MS {
                return Err(invalid(field, format!("must not exceed {MAX_INTERVAL_MS} ms")));
            }
        }
        let extents = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ground_y", self.ground_y),
            ("player_x", self.player_x),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("max_speed", self.max_speed),
            ("powerup_size", self.powerup_size),
            ("powerup_inset", self.powerup_inset),
            ("powerup_gap", self.powerup_gap),
        ];
        for (field, value) in extents {
            if value.unsigned_abs() > MAX_EXTENT.unsigned_abs() {
                return Err(invalid(field, format!("must lie within ±{MAX_EXTENT}")));
            }
        }

        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be at least 1 ms"));
        }
        if self.max_frame_ms < self.tick_ms {
            return Err(invalid("max_frame_ms", "must be at least one tick"));
        }
        if self.obstacle_spawn_ms == 0 {
            return Err(invalid("obstacle_spawn_ms", "must be at least 1 ms"));
        }
        if self.powerup_spawn_ms == 0 {
            return Err(invalid("powerup_spawn_ms", "must be at least 1 ms"));
        }
        if self.arena_width <= 0 || self.arena_height <= 0 {
            return Err(invalid("arena_width", "play area must have a positive size"));
        }
        if self.player_width <= 0 || self.player_height <= 0 {
            return Err(invalid("player_width", "player must have a positive size"));
        }
        if self.obstacle_width <= 0 || self.obstacle_height <= 0 {
            return Err(invalid("obstacle_width", "obstacles must have a positive size"));
        }
        if self.powerup_size <= 0 {
            return Err(invalid("powerup_size", "must be positive"));
        }
        if self.ground_y < self.player_height || self.ground_y > self.arena_height {
            return Err(invalid(
                "ground_y",
                format!(
                    "must lie between the player height ({}) and the arena height ({})",
                    self.player_height, self.arena_height
                ),
            ));
        }
        if self.gravity <= 0 || self.gravity > self.arena_height {
            return Err(invalid(
                "gravity",
                format!("must pull downward by at most the arena height ({})", self.arena_height),
            ));
        }
        let too_strong = self.jump_velocity.unsigned_abs() > self.arena_height.unsigned_abs();
        if self.jump_velocity >= 0 || too_strong {
            return Err(invalid(
                "jump_velocity",
                format!(
                    "must be an upward (negative) impulse no stronger than the arena height ({})",
                    self.arena_height
                ),
            ));
        }
        if self.base_speed <= 0 {
            return Err(invalid("base_speed", "must be positive"));
        }
        if self.max_speed < self.base_speed {
            return Err(invalid(
                "max_speed",
                format!("must not be below base_speed ({})", self.base_speed),
            ));
        }
        if !self.speed_boost.is_finite() || self.speed_boost < 1.0 {
            return Err(invalid("speed_boost", "must be a finite factor of at least 1.0"));
        }
        if self.powerup_tags.is_empty() {
            return Err(invalid("powerup_tags", "needs at least one tag"));
        }
        if self.end_messages.is_empty() {
            return Err(invalid("end_messages", "needs at least one message"));
        }
        Ok(())
    }

    /// Top of the player rectangle while grounded
    pub fn resting_y(&self) -> i32 {
        self.ground_y - self.player_height
    }

    /// Top of a freshly spawned obstacle (it sits on the ground line)
    pub fn obstacle_y(&self) -> i32 {
        self.ground_y - self.obstacle_height
    }

    /// Top of a freshly spawned power-up, hovering above a grounded player's head
    pub fn powerup_y(&self) -> i32 {
        self.resting_y() - self.powerup_gap - self.powerup_size
    }

    /// Left edge of a freshly spawned power-up
    pub fn powerup_x(&self) -> i32 {
        self.arena_width - self.powerup_size - self.powerup_inset
    }

    /// Scroll speed after `pickups` permanent boosts.
    ///
    /// The boost compounds on the exact product and is truncated once, so two
    /// pickups at 1.5x from 5 give 11 (not 10).
    pub fn speed_after(&self, pickups: u32) -> i32 {
        let exact = self.base_speed as f64 * self.speed_boost.powi(pickups.min(i32::MAX as u32) as i32);
        if exact >= self.max_speed as f64 {
            self.max_speed
        } else {
            (exact as i32).max(self.base_speed)
        }
    }
}
