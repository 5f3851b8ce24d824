//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one tick. Order matters and is
//! fixed: controls, fire, movement, collisions, spawn, tick counter.

use super::collision::resolve_projectile_hits;
use super::input::TickInput;
use super::physics::{move_obstacles, move_projectiles, move_ship};
use super::spawn::{RandomSource, maybe_spawn};
use super::state::{GameState, Obstacle};
use crate::consts::*;
use crate::wrap_angle;

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    ProjectileFired,
    /// A shot was requested but all projectile slots were busy
    FireDropped,
    ProjectilesExpired(usize),
    ObstacleDestroyed(Obstacle),
    ObstacleSpawned(Obstacle),
}

/// What a tick did, for logging and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick counter value the step ran at
    pub tick: u64,
    pub events: Vec<TickEvent>,
}

impl TickReport {
    pub fn destroyed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::ObstacleDestroyed(_)))
            .count()
    }

    pub fn spawned(&self) -> Option<&Obstacle> {
        self.events.iter().find_map(|e| match e {
            TickEvent::ObstacleSpawned(o) => Some(o),
            _ => None,
        })
    }

    pub fn fired(&self) -> bool {
        self.events.contains(&TickEvent::ProjectileFired)
    }
}

/// Apply held controls to the ship
pub fn steer(state: &mut GameState, input: &TickInput) {
    let ship = &mut state.ship;
    if input.turn_left {
        ship.heading = wrap_angle(ship.heading - SHIP_TURN_STEP);
    }
    if input.turn_right {
        ship.heading = wrap_angle(ship.heading + SHIP_TURN_STEP);
    }
    if input.thrust {
        let push = ship.forward() * SHIP_THRUST;
        ship.vel += push;
    }
}

/// Advance the game state by one tick
pub fn tick<R: RandomSource>(state: &mut GameState, input: &TickInput, rng: &mut R) -> TickReport {
    let mut report = TickReport {
        tick: state.ticks,
        events: Vec::new(),
    };

    steer(state, input);

    if input.fire {
        if state.fire_projectile() {
            log::debug!("Tick {}: fired ({} in flight)", state.ticks, state.projectiles.len());
            report.events.push(TickEvent::ProjectileFired);
        } else {
            report.events.push(TickEvent::FireDropped);
        }
    }

    move_ship(state);

    let expired = move_projectiles(state);
    if expired > 0 {
        report.events.push(TickEvent::ProjectilesExpired(expired));
    }

    move_obstacles(state);

    for rock in resolve_projectile_hits(state) {
        log::debug!("Tick {}: rock destroyed at ({}, {})", state.ticks, rock.pos.x, rock.pos.y);
        report.events.push(TickEvent::ObstacleDestroyed(rock));
    }

    if let Some(rock) = maybe_spawn(state, rng) {
        report.events.push(TickEvent::ObstacleSpawned(rock));
    }

    state.ticks += 1;
    log::trace!(
        "Tick {} done: ship ({:.1}, {:.1}) shots {} rocks {}",
        report.tick,
        state.ship.pos.x,
        state.ship.pos.y,
        state.projectiles.len(),
        state.obstacles.len()
    );
    report
}
