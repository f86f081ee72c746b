//! Whole-session scenarios driven through the public API

use neospace_runner::sim::{GameEvent, Session, SessionPhase, TimerKind, autopilot};
use neospace_runner::{Host, Hud, Tuning, dispatch};
use neospace_runner::sim::{EntityId, Rect, Visual};

fn leading_gap(session: &Session) -> Option<i32> {
    let player_right = session.state().player.rect().right();
    session
        .state()
        .obstacles
        .iter()
        .next()
        .map(|(_, o)| o.rect.x() - player_right)
}

/// Tick the clock directly until the live power-up is collected, jumping
/// just before it reaches the player's column.
fn collect_powerup(session: &mut Session) {
    session.on_timer(TimerKind::PowerupSpawn);
    assert!(session.state().powerup.is_some());
    for _ in 0..400 {
        let Some(powerup) = session.state().powerup.as_ref() else {
            return;
        };
        let gap = powerup.rect.x() - session.state().player.rect().right();
        if gap < 30 {
            session.jump();
        }
        session.on_timer(TimerKind::Clock);
    }
    panic!("power-up was never collected");
}

#[test]
fn never_jumping_ends_on_first_obstacle() {
    let mut session = Session::start(Tuning::default(), 2024);
    let mut ticks = 0;
    while session.is_running() {
        session.advance(30);
        ticks += 1;
        assert!(ticks < 1000, "session never ended");
    }

    let report = session.report().expect("collision produces a report").clone();
    assert_eq!(report.jump_count, 0);
    assert_eq!(report.title, "Game Over");
    assert!(report.message.contains('0'), "{}", report.message);
    assert!(!report.message.contains("{jumps}"));
    assert_eq!(session.state().live_entities(), 0);
    assert!(!session.timers().any_armed());

    // Frozen from here on
    let frozen_ticks = session.state().time_ticks;
    let frozen_ms = session.now_ms();
    session.drain_events();
    session.advance(5_000);
    assert!(!session.jump());
    session.on_timer(TimerKind::ObstacleSpawn);
    session.on_timer(TimerKind::PowerupSpawn);
    assert_eq!(session.state().time_ticks, frozen_ticks);
    assert_eq!(session.now_ms(), frozen_ms);
    assert_eq!(session.state().jump_count, 0);
    assert_eq!(session.state().live_entities(), 0);
    assert!(session.drain_events().is_empty());
}

#[test]
fn timed_jump_clears_obstacle() {
    let mut session = Session::start(Tuning::default(), 7);
    session.on_timer(TimerKind::ObstacleSpawn);

    // Wait until the leading edge is about to enter the player's column
    let speed = session.state().obstacle_speed;
    while leading_gap(&session).is_some_and(|gap| gap >= 2 * speed) {
        session.on_timer(TimerKind::Clock);
    }
    assert!(session.jump());

    for _ in 0..200 {
        session.on_timer(TimerKind::Clock);
        assert_eq!(session.phase(), SessionPhase::Running);
    }
    assert_eq!(session.state().jump_count, 1);
    assert!(session.state().obstacles.is_empty());
    assert!(session.state().player.is_grounded(session.tuning()));
}

#[test]
fn late_jump_still_collides() {
    let mut session = Session::start(Tuning::default(), 7);
    session.on_timer(TimerKind::ObstacleSpawn);
    while leading_gap(&session).is_some_and(|gap| gap >= session.state().obstacle_speed) {
        session.on_timer(TimerKind::Clock);
    }
    assert!(session.jump());
    session.on_timer(TimerKind::Clock);
    assert_eq!(session.phase(), SessionPhase::Ended);
    assert_eq!(session.report().map(|r| r.jump_count), Some(1));
}

#[test]
fn two_pickups_compound_speed() {
    let mut session = Session::start(Tuning::default(), 99);
    collect_powerup(&mut session);
    assert_eq!(session.state().obstacle_speed, 7);
    while !session.state().player.is_grounded(session.tuning()) {
        session.on_timer(TimerKind::Clock);
    }
    collect_powerup(&mut session);
    assert_eq!(session.state().obstacle_speed, 11);
    assert_eq!(session.state().permanent_powerups, 2);
    assert_eq!(session.state().jump_count, 2);
    assert_eq!(session.phase(), SessionPhase::Running);
}

#[test]
fn speed_caps_at_maximum() {
    let mut session = Session::start(Tuning::default(), 3);
    for _ in 0..8 {
        while !session.state().player.is_grounded(session.tuning()) {
            session.on_timer(TimerKind::Clock);
        }
        collect_powerup(&mut session);
    }
    assert_eq!(session.state().obstacle_speed, 40);
    assert_eq!(session.state().permanent_powerups, 8);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut session = Session::start(Tuning::default(), seed);
        let mut events = Vec::new();
        for _ in 0..4000 {
            if autopilot::should_jump(session.state(), session.tuning()) {
                session.jump();
            }
            session.advance(30);
            events.extend(session.drain_events());
            if !session.is_running() {
                break;
            }
        }
        events
    };
    assert_eq!(run(31337), run(31337));
}

#[test]
fn autopilot_survives_a_minute() {
    let mut session = Session::start(Tuning::default(), 42);
    while session.now_ms() < 60_000 {
        if autopilot::should_jump(session.state(), session.tuning()) {
            session.jump();
        }
        session.advance(30);
        assert_eq!(session.phase(), SessionPhase::Running, "crashed at {} ms", session.now_ms());
    }
    assert!(session.state().jump_count > 10);
}

#[derive(Default)]
struct RecordingHost {
    visuals: std::collections::HashMap<EntityId, (Visual, Rect)>,
    huds: Vec<Hud>,
    messages: Vec<(String, String)>,
}

impl Host for RecordingHost {
    fn spawn(&mut self, id: EntityId, visual: Visual, rect: Rect) {
        assert!(self.visuals.insert(id, (visual, rect)).is_none(), "duplicate id {id:?}");
    }

    fn moved(&mut self, id: EntityId, rect: Rect) {
        let entry = self.visuals.get_mut(&id).expect("move of unknown entity");
        entry.1 = rect;
    }

    fn despawn(&mut self, id: EntityId) {
        assert!(self.visuals.remove(&id).is_some(), "despawn of unknown entity");
    }

    fn hud(&mut self, hud: Hud) {
        self.huds.push(hud);
    }

    fn present_message(&mut self, title: &str, message: &str) {
        self.messages.push((title.to_string(), message.to_string()));
    }
}

#[test]
fn host_mirrors_simulation() {
    let mut session = Session::start(Tuning::default(), 8);
    let mut host = RecordingHost::default();
    let mut hud = Hud::default();
    let mut jumps = 0;
    while session.is_running() {
        // Jump every 40 ticks, regardless of what is coming
        if session.state().time_ticks % 40 == 0 && session.jump() {
            jumps += 1;
        }
        session.advance(30);
        dispatch(&mut host, &mut hud, session.drain_events());

        if session.is_running() {
            let state = session.state();
            assert_eq!(host.visuals.len(), 1 + state.live_entities());
            for (id, obstacle) in state.obstacles.iter() {
                assert_eq!(host.visuals[&id].1, obstacle.rect);
            }
            assert_eq!(host.visuals[&EntityId::Player].1, state.player.rect());
        }
        assert!(session.now_ms() < 600_000);
    }

    assert_eq!(hud.jumps, jumps);
    assert_eq!(host.messages.len(), 1);
    assert_eq!(host.messages[0].0, "Game Over");
    // Only the player remains once the board is cleared
    assert_eq!(host.visuals.len(), 1);
    assert!(host.visuals.contains_key(&EntityId::Player));
}

#[test]
fn session_ended_event_carries_report() {
    let mut session = Session::start(Tuning::default(), 2);
    while session.is_running() {
        session.advance(250);
    }
    let events = session.drain_events();
    let Some(GameEvent::SessionEnded { report }) = events.last() else {
        panic!("last event should be the session end, got {:?}", events.last());
    };
    assert_eq!(Some(report), session.report());
}
