//! Flip Rocks entry point
//!
//! Headless native driver: ticks come from a timer thread, keys from stdin.
//! One command per line:
//! - `left`, `right`, `thrust`: toggle holding that key
//! - `fire`: short tap on the action key
//! - `quit`: press and release back

use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::{self, Sender};
use std::time::Instant;

use flip_rocks::render::{DrawCommand, frame};
use flip_rocks::session::{Event, KeyCommands, Session, spawn_ticker};
use flip_rocks::settings::Settings;

const DEFAULT_SETTINGS_PATH: &str = "flip-rocks.json";

/// Translate stdin commands into timestamped key events
fn spawn_keyboard(events: Sender<Event>, start: Instant) {
    std::thread::spawn(move || {
        let mut keys = KeyCommands::new();
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let t = start.elapsed().as_millis() as u64;
            let sent = keys
                .events_for(&line, t)
                .into_iter()
                .all(|event| events.send(Event::Input(event)).is_ok());
            if !sent || line.trim() == "quit" {
                break;
            }
        }
        let _ = events.send(Event::Quit);
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path)?,
        None => Settings::load_or_default(DEFAULT_SETTINGS_PATH),
    };
    log::info!("Flip Rocks starting at {} ticks/s", settings.tick_hz);

    let mut session = Session::from_settings(&settings);
    let (tx, rx) = mpsc::channel();
    let _ticker = spawn_ticker(tx.clone(), settings.tick_period());
    spawn_keyboard(tx, Instant::now());

    let mut drawn_ticks = u64::MAX;
    session.run(&rx, settings.poll_timeout(), |state| {
        if state.ticks == drawn_ticks {
            return;
        }
        drawn_ticks = state.ticks;
        let commands = frame(state);
        let dots = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Dots(_)))
            .count();
        log::debug!(
            "Frame {}: {} polygons, {} dot clusters",
            state.ticks,
            commands.len() - dots,
            dots
        );
    });

    let state = &session.state;
    println!(
        "Stopped after {} ticks: ship at ({:.1}, {:.1}), {} shots, {} rocks",
        state.ticks,
        state.ship.pos.x,
        state.ship.pos.y,
        state.projectiles.len(),
        state.obstacles.len()
    );
    Ok(())
}
