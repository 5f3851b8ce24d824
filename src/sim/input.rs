//! Key state tracking
//!
//! Turns timestamped press/release events into what a tick needs: which
//! keys are held (level-triggered turn and thrust) and whether a short tap
//! on the action key asked for a shot (edge-triggered fire).

use serde::{Deserialize, Serialize};

use crate::consts::FIRE_WINDOW_MS;

/// The logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    TurnLeft,
    TurnRight,
    /// Thrust while held, fire on a short tap
    Action,
    /// Leaves the game on release
    Back,
}

impl Key {
    fn slot(self) -> usize {
        match self {
            Key::TurnLeft => 0,
            Key::TurnRight => 1,
            Key::Action => 2,
            Key::Back => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

/// A discrete input event with a monotonic timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
    pub timestamp_ms: u64,
}

impl KeyEvent {
    pub fn press(key: Key, timestamp_ms: u64) -> Self {
        Self {
            key,
            action: KeyAction::Press,
            timestamp_ms,
        }
    }

    pub fn release(key: Key, timestamp_ms: u64) -> Self {
        Self {
            key,
            action: KeyAction::Release,
            timestamp_ms,
        }
    }
}

/// Per-key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyState {
    #[default]
    Idle,
    Held { since_ms: u64 },
}

/// Control signals for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Tracks held keys and the pending fire request
#[derive(Debug, Clone)]
pub struct InputTracker {
    keys: [KeyState; 4],
    fire: bool,
    fire_window_ms: u64,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(FIRE_WINDOW_MS)
    }
}

impl InputTracker {
    /// `fire_window_ms`: presses strictly shorter than this fire on release
    pub fn new(fire_window_ms: u64) -> Self {
        Self {
            keys: [KeyState::Idle; 4],
            fire: false,
            fire_window_ms,
        }
    }

    pub fn state(&self, key: Key) -> KeyState {
        self.keys[key.slot()]
    }

    pub fn is_held(&self, key: Key) -> bool {
        matches!(self.state(key), KeyState::Held { .. })
    }

    /// Whether a shot is waiting to be taken
    pub fn fire_pending(&self) -> bool {
        self.fire
    }

    /// Feed one event. Returns true when the event queued a shot.
    ///
    /// A release with no matching press is ignored.
    pub fn apply(&mut self, event: KeyEvent) -> bool {
        let slot = &mut self.keys[event.key.slot()];
        match event.action {
            KeyAction::Press => {
                *slot = KeyState::Held {
                    since_ms: event.timestamp_ms,
                };
                false
            }
            KeyAction::Release => {
                let KeyState::Held { since_ms } = *slot else {
                    return false;
                };
                *slot = KeyState::Idle;
                let held_for = event.timestamp_ms.saturating_sub(since_ms);
                if event.key == Key::Action && held_for < self.fire_window_ms {
                    self.fire = true;
                    return true;
                }
                false
            }
        }
    }

    /// Sample the controls for the next tick, consuming any pending shot
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            turn_left: self.is_held(Key::TurnLeft),
            turn_right: self.is_held(Key::TurnRight),
            thrust: self.is_held(Key::Action),
            fire: std::mem::take(&mut self.fire),
        }
    }
}
