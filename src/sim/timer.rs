//! Millisecond timers driven by the session's event pump
//!
//! Time is virtual: the host reports elapsed milliseconds and the session
//! fires whichever timers fell due, in deadline order.

use serde::{Deserialize, Serialize};

/// The three timer sources of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerKind {
    /// Periodic physics tick
    Clock,
    /// One-shot, re-armed with jitter on every firing
    ObstacleSpawn,
    /// One-shot, re-armed with jitter on every firing
    PowerupSpawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timer {
    deadline_ms: Option<u64>,
    /// Set for periodic timers
    period_ms: Option<u64>,
}

impl Timer {
    pub fn periodic(now_ms: u64, period_ms: u64) -> Self {
        Self {
            deadline_ms: Some(now_ms.saturating_add(period_ms)),
            period_ms: Some(period_ms),
        }
    }

    pub fn one_shot(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            deadline_ms: Some(now_ms.saturating_add(delay_ms)),
            period_ms: None,
        }
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|d| d <= now_ms)
    }

    /// Arm (or re-arm) to fire `delay_ms` after `from_ms`
    pub fn arm(&mut self, from_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(from_ms.saturating_add(delay_ms));
    }

    pub fn stop(&mut self) {
        self.deadline_ms = None;
    }

    /// Consume one firing. Periodic timers move to their next deadline;
    /// one-shot timers disarm and wait to be re-armed.
    pub fn fire(&mut self) -> Option<u64> {
        let fired_at = self.deadline_ms?;
        self.deadline_ms = self.period_ms.map(|p| fired_at.saturating_add(p));
        Some(fired_at)
    }
}

/// Clock plus both spawners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timers {
    pub clock: Timer,
    pub obstacle: Timer,
    pub powerup: Timer,
}

impl Timers {
    pub fn get(&self, kind: TimerKind) -> &Timer {
        match kind {
            TimerKind::Clock => &self.clock,
            TimerKind::ObstacleSpawn => &self.obstacle,
            TimerKind::PowerupSpawn => &self.powerup,
        }
    }

    pub fn get_mut(&mut self, kind: TimerKind) -> &mut Timer {
        match kind {
            TimerKind::Clock => &mut self.clock,
            TimerKind::ObstacleSpawn => &mut self.obstacle,
            TimerKind::PowerupSpawn => &mut self.powerup,
        }
    }

    /// Earliest timer due at or before `now_ms`. Ties go to the clock, then
    /// the obstacle spawner, then the power-up spawner.
    pub fn next_due(&self, now_ms: u64) -> Option<(TimerKind, u64)> {
        [TimerKind::Clock, TimerKind::ObstacleSpawn, TimerKind::PowerupSpawn]
            .into_iter()
            .filter(|&kind| self.get(kind).is_due(now_ms))
            .filter_map(|kind| self.get(kind).deadline().map(|d| (kind, d)))
            .min_by_key(|&(kind, d)| (d, kind))
    }

    /// Stop all three at once
    pub fn stop_all(&mut self) {
        self.clock.stop();
        self.obstacle.stop();
        self.powerup.stop();
    }

    pub fn any_armed(&self) -> bool {
        self.clock.is_armed() || self.obstacle.is_armed() || self.powerup.is_armed()
    }
}
