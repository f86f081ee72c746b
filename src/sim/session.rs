//! Session controller
//!
//! Owns the state, the three timers and the RNG. The host drives it with
//! `advance` (elapsed wall time) and `jump` (input), then drains events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::EntityId;
use super::spawn::{self, Spawner};
use super::state::{GameEvent, GameState, SessionPhase, SessionReport, Visual};
use super::tick::{TickOutcome, tick};
use super::timer::{Timer, TimerKind, Timers};
use crate::settings::Tuning;
use crate::{bounded, format_message};

pub struct Session {
    tuning: Tuning,
    state: GameState,
    timers: Timers,
    rng: Pcg32,
    now_ms: u64,
    report: Option<SessionReport>,
}

impl Session {
    /// Build an idle session. Nothing runs until [`Session::begin`].
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(seed, &tuning);
        Self {
            tuning,
            state,
            timers: Timers::default(),
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0,
            report: None,
        }
    }

    /// Build a session and start it straight away
    pub fn start(tuning: Tuning, seed: u64) -> Self {
        let mut session = Self::new(tuning, seed);
        session.begin();
        session
    }

    /// Idle -> Running: show the player and arm the clock and both spawners
    pub fn begin(&mut self) {
        if self.state.phase != SessionPhase::Idle {
            return;
        }
        self.state.phase = SessionPhase::Running;
        self.state.events.push(GameEvent::Spawned {
            id: EntityId::Player,
            visual: Visual::Player,
            rect: self.state.player.rect(),
        });

        let now = self.now_ms;
        let first_powerup = Spawner::powerups(&self.tuning).next_delay(&mut self.rng);
        self.timers = Timers {
            clock: Timer::periodic(now, self.tuning.tick_ms),
            // First obstacle comes after the plain base interval
            obstacle: Timer::one_shot(now, self.tuning.obstacle_spawn_ms),
            powerup: Timer::one_shot(now, first_powerup),
        };
        log::info!(
            "Session started (seed {}, tick {} ms, first power-up in {} ms)",
            self.state.seed,
            self.tuning.tick_ms,
            first_powerup
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Virtual milliseconds simulated so far
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Set once the session ended by collision
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    /// Take pending host output
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Jump input. Ignored while airborne or when not running.
    pub fn jump(&mut self) -> bool {
        let accepted = self.state.try_jump(&self.tuning);
        if accepted {
            log::debug!("Jump #{}", self.state.jump_count);
        }
        accepted
    }

    /// Event pump: simulate `elapsed_ms` of wall time, firing due timers in
    /// deadline order. Time beyond `max_frame_ms` is dropped, not caught up.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if !self.is_running() {
            return;
        }
        let elapsed = elapsed_ms.min(self.tuning.max_frame_ms);
        if elapsed < elapsed_ms {
            log::debug!("Dropped {} ms of lag", elapsed_ms - elapsed);
        }
        let target = self.now_ms.saturating_add(elapsed);

        while self.is_running() {
            let Some((kind, deadline)) = self.timers.next_due(target) else {
                break;
            };
            self.now_ms = deadline;
            self.timers.get_mut(kind).fire();
            self.handle_timer(kind);
        }

        if self.is_running() {
            self.now_ms = target;
        }
    }

    /// Fire one timer's handler immediately, as a host with its own timers
    /// would. The timer is re-armed relative to the current time.
    pub fn on_timer(&mut self, kind: TimerKind) {
        if !self.is_running() {
            return;
        }
        if kind == TimerKind::Clock {
            self.timers.clock = Timer::periodic(self.now_ms, self.tuning.tick_ms);
        }
        self.handle_timer(kind);
    }

    fn handle_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Clock => {
                if let TickOutcome::Collided(id) = tick(&mut self.state, &self.tuning) {
                    log::debug!("Obstacle {:?} ended the session", id);
                    self.end();
                }
            }
            TimerKind::ObstacleSpawn => {
                let result =
                    spawn::fire_obstacle_spawner(&mut self.state, &self.tuning, &mut self.rng);
                self.timers.obstacle.arm(self.now_ms, result.rearm_ms);
            }
            TimerKind::PowerupSpawn => {
                let result =
                    spawn::fire_powerup_spawner(&mut self.state, &self.tuning, &mut self.rng);
                self.timers.powerup.arm(self.now_ms, result.rearm_ms);
            }
        }
    }

    /// Running -> Ended on collision
    fn end(&mut self) {
        self.halt();

        let templates = &self.tuning.end_messages;
        let index = bounded(&mut self.rng, templates.len() as u64) as usize;
        let template = templates.get(index).map(String::as_str).unwrap_or_default();
        let report = SessionReport {
            jump_count: self.state.jump_count,
            permanent_powerups: self.state.permanent_powerups,
            obstacle_speed: self.state.obstacle_speed,
            ticks: self.state.time_ticks,
            title: self.tuning.end_title.clone(),
            message: format_message(template, self.state.jump_count),
        };
        log::info!(
            "Session over after {} ticks: {} jumps, {} power-ups",
            report.ticks,
            report.jump_count,
            report.permanent_powerups
        );
        self.state.events.push(GameEvent::SessionEnded {
            report: report.clone(),
        });
        self.report = Some(report);
    }

    /// Host closed the dialog. Stops everything without a report.
    pub fn close(&mut self) {
        if self.state.phase == SessionPhase::Ended {
            return;
        }
        self.halt();
        self.state.events.push(GameEvent::SessionClosed);
        log::info!("Session closed after {} ticks", self.state.time_ticks);
    }

    /// Stop all timers in one step, then clear the board
    fn halt(&mut self) {
        self.timers.stop_all();
        self.state.phase = SessionPhase::Ended;
        self.state.clear_entities();
    }
}
