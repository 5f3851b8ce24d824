//! Event dispatcher
//!
//! Ticks and key events arrive from other threads over one channel and are
//! handled strictly in order on the calling thread. A tick always runs to
//! completion before the next event is looked at, so quitting never cuts a
//! step short.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{GameState, InputTracker, Key, KeyAction, KeyEvent, RandomSource, TickReport, tick};

/// Timeouts between heartbeat log lines
const HEARTBEAT_TIMEOUTS: u64 = 20;

/// Messages the control loop consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    Input(KeyEvent),
    Quit,
}

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One game session: state, input tracking and randomness
pub struct Session<R: RandomSource = Pcg32> {
    pub state: GameState,
    pub input: InputTracker,
    rng: R,
    log_inputs: bool,
}

impl Session<Pcg32> {
    /// Fresh game seeded from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.resolve_seed();
        log::info!("New session, seed {}", seed);
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_rng(settings: &Settings, rng: R) -> Self {
        Self {
            state: GameState::new(),
            input: InputTracker::new(settings.fire_window_ms),
            rng,
            log_inputs: settings.log_inputs,
        }
    }

    /// Run one tick with the current controls, consuming a pending shot
    pub fn step(&mut self) -> TickReport {
        let controls = self.input.take_tick_input();
        tick(&mut self.state, &controls, &mut self.rng)
    }

    /// Handle a single event
    pub fn handle(&mut self, event: Event) -> Control {
        match event {
            Event::Tick => {
                self.step();
                Control::Continue
            }
            Event::Input(key_event) => {
                if self.log_inputs {
                    log::debug!(
                        "Input: {:?} {:?} at {}ms",
                        key_event.key,
                        key_event.action,
                        key_event.timestamp_ms
                    );
                }
                if key_event.key == Key::Back && key_event.action == KeyAction::Release {
                    return Control::Quit;
                }
                self.input.apply(key_event);
                Control::Continue
            }
            Event::Quit => Control::Quit,
        }
    }

    /// Consume events until a quit or until every sender is gone.
    ///
    /// `on_frame` is called after each tick, and after each wait that timed
    /// out, so the screen refreshes even without input.
    pub fn run<F>(&mut self, events: &Receiver<Event>, poll_timeout: Duration, mut on_frame: F)
    where
        F: FnMut(&GameState),
    {
        let mut timeouts: u64 = 0;
        loop {
            match events.recv_timeout(poll_timeout) {
                Ok(event) => {
                    if self.handle(event) == Control::Quit {
                        log::info!("Quit after {} ticks", self.state.ticks);
                        break;
                    }
                    if event == Event::Tick {
                        on_frame(&self.state);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    timeouts += 1;
                    if timeouts % HEARTBEAT_TIMEOUTS == 0 {
                        log::trace!("Loop timeout ({} so far)", timeouts);
                    }
                    on_frame(&self.state);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("Event sources closed after {} ticks", self.state.ticks);
                    break;
                }
            }
        }
    }
}

/// A line-oriented keyboard: `left`, `right` and `thrust` toggle holding
/// that key, `fire` taps the action key, `quit` taps back.
#[derive(Debug, Clone, Default)]
pub struct KeyCommands {
    held_left: bool,
    held_right: bool,
    held_action: bool,
}

impl KeyCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key events for one command. Unknown commands produce none.
    ///
    /// A `fire` tap while thrust is toggled on re-presses the action key
    /// afterwards, so thrust keeps going and the next `thrust` releases it.
    pub fn events_for(&mut self, command: &str, timestamp_ms: u64) -> Vec<KeyEvent> {
        let toggle = |held: &mut bool, key: Key| {
            *held = !*held;
            if *held {
                vec![KeyEvent::press(key, timestamp_ms)]
            } else {
                vec![KeyEvent::release(key, timestamp_ms)]
            }
        };

        match command.trim() {
            "left" => toggle(&mut self.held_left, Key::TurnLeft),
            "right" => toggle(&mut self.held_right, Key::TurnRight),
            "thrust" => toggle(&mut self.held_action, Key::Action),
            "fire" => {
                let mut events = vec![
                    KeyEvent::press(Key::Action, timestamp_ms),
                    KeyEvent::release(Key::Action, timestamp_ms),
                ];
                if self.held_action {
                    events.push(KeyEvent::press(Key::Action, timestamp_ms));
                }
                events
            }
            "quit" => vec![
                KeyEvent::press(Key::Back, timestamp_ms),
                KeyEvent::release(Key::Back, timestamp_ms),
            ],
            "" => Vec::new(),
            other => {
                log::warn!("Unknown command: {}", other);
                Vec::new()
            }
        }
    }
}

/// Send `Event::Tick` every `period` until the receiving side hangs up
pub fn spawn_ticker(events: Sender<Event>, period: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            std::thread::sleep(period);
            if events.send(Event::Tick).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn session() -> Session {
        let settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        Session::from_settings(&settings)
    }

    #[test]
    fn test_tap_fires_on_next_tick() {
        let mut s = session();
        s.handle(Event::Input(KeyEvent::press(Key::Action, 0)));
        s.handle(Event::Input(KeyEvent::release(Key::Action, 120)));
        assert!(s.input.fire_pending());

        let report = s.step();
        assert!(report.fired());
        assert!(!s.input.fire_pending());
        assert!(!s.step().fired());
    }

    #[test]
    fn test_back_release_quits() {
        let mut s = session();
        assert_eq!(s.handle(Event::Input(KeyEvent::press(Key::Back, 0))), Control::Continue);
        assert_eq!(s.handle(Event::Input(KeyEvent::release(Key::Back, 50))), Control::Quit);
        assert_eq!(s.handle(Event::Quit), Control::Quit);
    }

    #[test]
    fn test_run_processes_in_order() {
        let mut s = session();
        let (tx, rx) = mpsc::channel();
        tx.send(Event::Tick).unwrap();
        tx.send(Event::Input(KeyEvent::press(Key::TurnRight, 0))).unwrap();
        tx.send(Event::Tick).unwrap();
        tx.send(Event::Tick).unwrap();
        tx.send(Event::Quit).unwrap();
        // Never reached
        tx.send(Event::Tick).unwrap();

        let mut frames = 0;
        s.run(&rx, Duration::from_millis(10), |_| frames += 1);
        assert_eq!(s.state.ticks, 3);
        assert_eq!(frames, 3);
        let expected = crate::wrap_angle(std::f32::consts::PI + 2.0 * crate::consts::SHIP_TURN_STEP);
        assert!((s.state.ship.heading - expected).abs() < 1e-5);
    }

    #[test]
    fn test_run_stops_when_senders_drop() {
        let mut s = session();
        let (tx, rx) = mpsc::channel();
        tx.send(Event::Tick).unwrap();
        drop(tx);
        s.run(&rx, Duration::from_millis(10), |_| {});
        assert_eq!(s.state.ticks, 1);
    }

    #[test]
    fn test_timeout_redraws() {
        let mut s = session();
        let (tx, rx) = mpsc::channel::<Event>();
        let feeder = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(60));
            let _ = tx.send(Event::Quit);
        });

        let mut frames = 0;
        s.run(&rx, Duration::from_millis(5), |_| frames += 1);
        feeder.join().unwrap();
        assert!(frames > 0);
        assert_eq!(s.state.ticks, 0);
    }

    #[test]
    fn test_fire_keeps_thrust_toggle() {
        let mut keys = KeyCommands::new();
        let mut input = InputTracker::default();
        let mut feed = |command: &str, t: u64, input: &mut InputTracker| {
            for event in keys.events_for(command, t) {
                input.apply(event);
            }
        };

        feed("thrust", 0, &mut input);
        feed("fire", 500, &mut input);
        let controls = input.take_tick_input();
        assert!(controls.fire);
        assert!(controls.thrust);

        // One `thrust` turns it off again
        feed("thrust", 900, &mut input);
        let controls = input.take_tick_input();
        assert!(!controls.thrust);
        assert!(!controls.fire);
    }

    #[test]
    fn test_commands_drive_session() {
        let mut keys = KeyCommands::new();
        let mut s = session();
        for event in keys.events_for("left", 0) {
            assert_eq!(s.handle(Event::Input(event)), Control::Continue);
        }
        assert!(s.input.is_held(Key::TurnLeft));
        for event in keys.events_for("left", 10) {
            s.handle(Event::Input(event));
        }
        assert!(!s.input.is_held(Key::TurnLeft));

        assert!(keys.events_for("jump", 20).is_empty());

        let quit: Vec<Control> = keys
            .events_for("quit", 30)
            .into_iter()
            .map(|e| s.handle(Event::Input(e)))
            .collect();
        assert_eq!(quit, vec![Control::Continue, Control::Quit]);
    }

    #[test]
    fn test_ticker_feeds_loop() {
        let mut s = session();
        let (tx, rx) = mpsc::channel();
        let ticker = spawn_ticker(tx.clone(), Duration::from_millis(1));
        drop(tx);

        let mut ticks_seen = Vec::new();
        while ticks_seen.len() < 5 {
            if let Ok(event) = rx.recv_timeout(Duration::from_secs(1)) {
                assert_eq!(event, Event::Tick);
                s.handle(event);
                ticks_seen.push(s.state.ticks);
            }
        }
        // Hanging up stops the ticker thread
        drop(rx);
        ticker.join().unwrap();
        assert_eq!(ticks_seen, vec![1, 2, 3, 4, 5]);
    }
}
