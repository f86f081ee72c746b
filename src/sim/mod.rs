//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond time only, advanced by the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use arena::{Arena, EntityId, EntityKind, ObstacleKey, PowerupKey};
pub use collision::CollisionResult;
pub use rect::Rect;
pub use session::Session;
pub use spawn::{SpawnResult, Spawner};
pub use state::{
    GameEvent, GameState, Obstacle, Player, Powerup, SessionPhase, SessionReport, Visual,
};
pub use tick::{TickOutcome, tick};
pub use timer::{Timer, TimerKind, Timers};
