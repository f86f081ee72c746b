//! Neospace Runner - the dashboard's hidden endless-runner mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, spawning, physics, collisions, session state)
//! - `platform`: Host abstraction that renders entities and shows the end-of-session message
//! - `settings`: Data-driven tuning, loadable from JSON

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{Host, Hud, LogHost, dispatch};
pub use settings::{PowerupTag, SettingsError, Tuning};
pub use sim::{GameEvent, Session, SessionPhase, SessionReport};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation tick period
    pub const TICK_MS: u64 = 30;
    /// Longest stretch of elapsed time one `advance` call will simulate.
    /// Anything beyond it is dropped rather than caught up.
    pub const MAX_FRAME_MS: u64 = 250;

    /// Play area dimensions (screen pixels, y grows downward)
    pub const ARENA_WIDTH: i32 = 700;
    pub const ARENA_HEIGHT: i32 = 260;
    pub const GROUND_Y: i32 = 200;

    /// Player defaults
    pub const PLAYER_X: i32 = 50;
    pub const PLAYER_WIDTH: i32 = 32;
    pub const PLAYER_HEIGHT: i32 = 32;
    /// Downward acceleration per tick
    pub const GRAVITY: i32 = 1;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: i32 = -12;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: i32 = 20;
    pub const OBSTACLE_HEIGHT: i32 = 20;
    /// Scroll speed in pixels per tick
    pub const BASE_OBSTACLE_SPEED: i32 = 5;
    pub const MAX_OBSTACLE_SPEED: i32 = 40;
    pub const OBSTACLE_SPAWN_MS: u64 = 1400;
    pub const OBSTACLE_JITTER_MS: u64 = 800;

    /// Power-up defaults
    pub const POWERUP_SIZE: i32 = 32;
    pub const POWERUP_INSET: i32 = 10;
    /// Gap between the top of a grounded player and the bottom of a power-up
    pub const POWERUP_GAP: i32 = 4;
    pub const POWERUP_SPAWN_MS: u64 = 9000;
    pub const POWERUP_JITTER_MS: u64 = 6000;
    /// Permanent scroll speed multiplier per pickup
    pub const SPEED_BOOST: f64 = 1.5;

    /// Upper bound for any configured interval (one hour)
    pub const MAX_INTERVAL_MS: u64 = 3_600_000;
    /// Upper bound for any configured coordinate, size or speed
    pub const MAX_EXTENT: i32 = 10_000;
}

/// Placeholder replaced by the jump count in end-of-session messages
pub const JUMPS_PLACEHOLDER: &str = "{jumps}";

/// Fill an end-of-session template with the jump count
#[inline]
pub fn format_message(template: &str, jump_count: u32) -> String {
    template.replace(JUMPS_PLACEHOLDER, &jump_count.to_string())
}

/// Draw a uniform integer in `[0, upper)`, or 0 when the range is empty
#[inline]
pub fn bounded<R: rand::Rng + ?Sized>(rng: &mut R, upper: u64) -> u64 {
    if upper == 0 {
        0
    } else {
        rng.random_range(0..upper)
    }
}
