//! Platform abstraction layer
//!
//! The simulation never touches a UI. A host implements [`Host`] to:
//! - Create, move and destroy visuals at screen rectangles
//! - Show the jump/power-up counters
//! - Present the end-of-session message

use crate::sim::{EntityId, GameEvent, Rect, Visual};

/// Counters a host shows while a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub jumps: u32,
    pub powerups: u32,
}

impl Hud {
    pub fn jumps_label(&self) -> String {
        format!("Jumps: {}", self.jumps)
    }

    pub fn powerups_label(&self) -> String {
        format!("Powerups: {}", self.powerups)
    }
}

pub trait Host {
    fn spawn(&mut self, id: EntityId, visual: Visual, rect: Rect);
    fn moved(&mut self, id: EntityId, rect: Rect);
    fn despawn(&mut self, id: EntityId);
    fn present_message(&mut self, title: &str, message: &str);

    /// Counter update. Hosts without a HUD can ignore it.
    fn hud(&mut self, _hud: Hud) {}

    /// Session closed without a collision
    fn closed(&mut self) {}
}

/// Route a batch of drained events to a host, keeping `hud` current
pub fn dispatch<H, I>(host: &mut H, hud: &mut Hud, events: I)
where
    H: Host + ?Sized,
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        match event {
            GameEvent::Spawned { id, visual, rect } => host.spawn(id, visual, rect),
            GameEvent::Moved { id, rect } => host.moved(id, rect),
            GameEvent::Despawned { id } => host.despawn(id),
            GameEvent::Jumped { jump_count } => {
                hud.jumps = jump_count;
                host.hud(*hud);
            }
            GameEvent::PowerupCollected {
                permanent_powerups, ..
            } => {
                hud.powerups = permanent_powerups;
                host.hud(*hud);
            }
            GameEvent::SessionEnded { report } => {
                host.present_message(&report.title, &report.message)
            }
            GameEvent::SessionClosed => host.closed(),
        }
    }
}

/// Headless host that logs everything and keeps a count of live visuals
#[derive(Debug, Default)]
pub struct LogHost {
    pub live: usize,
    pub hud: Hud,
    pub message: Option<String>,
}

impl Host for LogHost {
    fn spawn(&mut self, id: EntityId, visual: Visual, rect: Rect) {
        self.live += 1;
        log::debug!(
            "spawn {:?} {:?} at ({}, {}) {}x{}",
            visual,
            id,
            rect.x(),
            rect.y(),
            rect.size.x,
            rect.size.y
        );
    }

    fn moved(&mut self, id: EntityId, rect: Rect) {
        log::trace!("move {:?} to ({}, {})", id, rect.x(), rect.y());
    }

    fn despawn(&mut self, id: EntityId) {
        self.live = self.live.saturating_sub(1);
        log::debug!("despawn {:?}", id);
    }

    fn hud(&mut self, hud: Hud) {
        self.hud = hud;
        log::info!("{} | {}", hud.jumps_label(), hud.powerups_label());
    }

    fn present_message(&mut self, title: &str, message: &str) {
        log::info!("{title}: {message}");
        self.message = Some(message.to_string());
    }

    fn closed(&mut self) {
        log::info!("Session closed by host");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::{Session, TimerKind};

    #[test]
    fn test_hud_labels() {
        let hud = Hud {
            jumps: 3,
            powerups: 1,
        };
        assert_eq!(hud.jumps_label(), "Jumps: 3");
        assert_eq!(hud.powerups_label(), "Powerups: 1");
    }

    #[test]
    fn test_dispatch_tracks_visuals() {
        let mut session = Session::start(Tuning::default(), 9);
        let mut host = LogHost::default();
        let mut hud = Hud::default();

        session.on_timer(TimerKind::ObstacleSpawn);
        session.on_timer(TimerKind::PowerupSpawn);
        session.jump();
        dispatch(&mut host, &mut hud, session.drain_events());
        // Player, obstacle, power-up
        assert_eq!(host.live, 3);
        assert_eq!(hud.jumps, 1);
        assert_eq!(host.hud.jumps, 1);

        session.close();
        dispatch(&mut host, &mut hud, session.drain_events());
        // Only the player visual is left for the host to tear down
        assert_eq!(host.live, 1);
        assert!(host.message.is_none());
    }
}
