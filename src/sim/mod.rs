//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no internal clock besides the tick counter
//! - Randomness only through [`RandomSource`]
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod input;
pub mod physics;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{overlaps, resolve_projectile_hits};
pub use input::{InputTracker, Key, KeyAction, KeyEvent, KeyState, TickInput};
pub use physics::{advance, spin, wrap_axis};
pub use shape::{Lfsr, OBSTACLE_VERTICES, SHIP_OUTLINE, obstacle_outline, rotate};
pub use spawn::{RandomSource, maybe_spawn, should_spawn, spawn_obstacle};
pub use state::{BoundedPool, CapacityError, GameState, Obstacle, ObstaclePool, Projectile, ProjectilePool, Ship};
pub use tick::{TickEvent, TickReport, steer, tick};
