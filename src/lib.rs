//! Flip Rocks - a tiny asteroid shooter for 128x64 monochrome screens
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, spawning, shapes)
//! - `render`: Draw lists for a line/dot renderer
//! - `session`: Event dispatcher and tick source
//! - `settings`: Session configuration

pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Control, Event, KeyCommands, Session};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 128.0;
    pub const SCREEN_HEIGHT: f32 = 64.0;
    pub const SCREEN_SIZE: Vec2 = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    /// Ticks per second of the reference tick source
    pub const TICK_HZ: u32 = 10;

    /// Bounded pool capacities
    pub const MAX_PROJECTILES: usize = 10;
    pub const MAX_OBSTACLES: usize = 8;

    /// Ship controls (per tick)
    pub const SHIP_TURN_STEP: f32 = 0.35;
    pub const SHIP_THRUST: f32 = 0.35;

    /// Projectiles leave from the ship nose, not its center
    pub const MUZZLE_OFFSET: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 2.0;
    pub const PROJECTILE_LIFE_TICKS: u32 = 50;
    /// Implicit radius used for projectile hit tests
    pub const PROJECTILE_RADIUS: f32 = 1.0;

    /// Spawn policy
    pub const SPAWN_MIN_DISTANCE: f32 = 20.0;
    pub const SPAWN_MIN_SIZE: u32 = 4;
    pub const SPAWN_SIZE_SPAN: u32 = 15;
    pub const SPAWN_ROLL_RANGE: u32 = 5000;
    pub const SPAWN_ROLL_WEIGHT: u32 = 30;
    pub const SPAWN_MAX_SPIN: f32 = 0.1;

    /// Presses shorter than this (ms) fire on release
    pub const FIRE_WINDOW_MS: u64 = 200;
}

/// Unit vector the ship points along for heading `angle`.
///
/// Heading 0 points toward +y, heading π toward -y (the top of the screen).
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
