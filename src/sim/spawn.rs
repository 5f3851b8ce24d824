//! Obstacle spawning
//!
//! One roll per tick. The fuller the screen, the less likely a new rock;
//! an empty screen always gets one.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Obstacle};
use crate::consts::*;

/// Uniform randomness consumed by the simulation
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn unit(&mut self) -> f32;
    /// Uniform integer in [0, n); `n` must be non-zero
    fn below(&mut self, n: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn below(&mut self, n: u32) -> u32 {
        self.random_range(0..n)
    }
}

/// Roll for a spawn this tick.
///
/// With `count` rocks alive the odds are `30 / (1 + count)` in 5000
/// (integer division). No roll is drawn for an empty screen.
pub fn should_spawn<R: RandomSource>(count: usize, rng: &mut R) -> bool {
    if count == 0 {
        return true;
    }
    let threshold = SPAWN_ROLL_WEIGHT / (1 + count as u32);
    rng.below(SPAWN_ROLL_RANGE) < threshold
}

/// Create a rock at least `SPAWN_MIN_DISTANCE + size` away from the ship.
///
/// Positions are integer cells sampled until one is far enough; the screen
/// is always large enough for that to terminate. The spin direction follows
/// the parity of the tick counter: even ticks spin positive, odd negative.
/// Returns `None` without drawing anything when the pool is full.
pub fn spawn_obstacle<R: RandomSource>(state: &mut GameState, rng: &mut R) -> Option<Obstacle> {
    if state.obstacles.is_full() {
        return None;
    }

    let size = (SPAWN_MIN_SIZE + rng.below(SPAWN_SIZE_SPAN)) as f32;
    let clearance = SPAWN_MIN_DISTANCE + size;
    let ship = state.ship.pos;
    let pos = loop {
        let candidate = Vec2::new(
            rng.below(SCREEN_WIDTH as u32) as f32,
            rng.below(SCREEN_HEIGHT as u32) as f32,
        );
        if candidate.distance(ship) >= clearance {
            break candidate;
        }
    };

    let vel = Vec2::new(rng.unit(), rng.unit());
    let mut angular_vel = rng.unit() * SPAWN_MAX_SPIN;
    if state.ticks & 1 == 1 {
        angular_vel = -angular_vel;
    }
    let shape_seed = rng.below(256) as u8;

    let obstacle = Obstacle {
        pos,
        vel,
        heading: 0.0,
        angular_vel,
        size,
        shape_seed,
    };
    state.add_obstacle(obstacle.clone());
    log::debug!(
        "Spawned rock #{} at ({}, {}) size {} seed {:#04x}",
        state.obstacles.len(),
        pos.x,
        pos.y,
        size,
        shape_seed
    );
    Some(obstacle)
}

/// Run the per-tick spawn policy. Returns the new rock, if any.
pub fn maybe_spawn<R: RandomSource>(state: &mut GameState, rng: &mut R) -> Option<Obstacle> {
    if should_spawn(state.obstacles.len(), rng) {
        spawn_obstacle(state, rng)
    } else {
        None
    }
}
