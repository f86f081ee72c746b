//! Neospace Runner headless entry point
//!
//! Runs one session against a logging host, with input from the autopilot
//! or a fixed jump cadence, and prints the end-of-session message.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use neospace_runner::sim::{Session, SessionPhase, autopilot};
use neospace_runner::{Hud, LogHost, Tuning, dispatch};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding tuning values
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Let the bot do the jumping
    #[arg(long)]
    autopilot: bool,
    /// Jump on a fixed cadence instead (milliseconds)
    #[arg(long, value_name = "MILLISECONDS", conflicts_with = "autopilot")]
    jump_every_ms: Option<u64>,
    /// Sleep between ticks so the run takes wall-clock time
    #[arg(long)]
    realtime: bool,
    /// Close the session after this much simulated time
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 120_000)]
    max_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Neospace Runner starting with seed {seed}");

    let frame_ms = tuning.tick_ms;
    let mut session = Session::start(tuning, seed);
    let mut host = LogHost::default();
    let mut hud = Hud::default();
    let mut next_jump_ms = args.jump_every_ms;

    while session.phase() == SessionPhase::Running {
        if args.autopilot && autopilot::should_jump(session.state(), session.tuning()) {
            session.jump();
        }
        if let (Some(every), Some(at)) = (args.jump_every_ms, next_jump_ms) {
            if session.now_ms() >= at {
                session.jump();
                next_jump_ms = Some(at + every.max(1));
            }
        }

        session.advance(frame_ms);
        dispatch(&mut host, &mut hud, session.drain_events());

        if session.now_ms() >= args.max_ms {
            session.close();
            dispatch(&mut host, &mut hud, session.drain_events());
        }
        if args.realtime {
            std::thread::sleep(Duration::from_millis(frame_ms));
        }
    }

    match session.report() {
        Some(report) => println!("{}: {}", report.title, report.message),
        None => println!(
            "Survived {} ms: {} jumps, {} power-ups",
            session.now_ms(),
            session.state().jump_count,
            session.state().permanent_powerups
        ),
    }
    Ok(())
}
