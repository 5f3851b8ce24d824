//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], which is passed
//! by reference into each step. There is no other shared state.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::*;
use crate::heading_vector;

/// A fixed-capacity, dense collection.
///
/// Live elements always occupy indices `[0, len)`. Removal moves the last
/// live element into the freed slot, so **order is not preserved**: after
/// `swap_remove(i)` the element now at `i` has not been visited yet by a
/// caller walking the pool front to back, and that caller must look at `i`
/// again instead of advancing.
///
/// Pushing into a full pool is a silent no-op.
///
/// Serializes as a plain sequence; loading more than `N` elements fails.
#[derive(Debug, Clone)]
pub struct BoundedPool<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Default for BoundedPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedPool<T, N> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(N),
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= N
    }

    /// Append at index `len`. Returns false (and drops `item`) when full.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the element at `index`, filling the hole with the last live
    /// element. O(1), not order-preserving.
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

/// A sequence too long for the pool it was loaded into
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{len} elements exceed pool capacity {capacity}")]
pub struct CapacityError {
    pub len: usize,
    pub capacity: usize,
}

impl<T, const N: usize> TryFrom<Vec<T>> for BoundedPool<T, N> {
    type Error = CapacityError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.len() > N {
            return Err(CapacityError {
                len: items.len(),
                capacity: N,
            });
        }
        Ok(Self { items })
    }
}

impl<T: Serialize, const N: usize> Serialize for BoundedPool<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BoundedPool<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::try_from(items).map_err(serde::de::Error::custom)
    }
}

impl<T, const N: usize> std::ops::Index<usize> for BoundedPool<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T, const N: usize> std::ops::IndexMut<usize> for BoundedPool<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedPool<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, kept in [0, 2π)
    pub heading: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: SCREEN_SIZE / 2.0,
            vel: Vec2::ZERO,
            heading: std::f32::consts::PI, // Nose toward the top of the screen
        }
    }
}

impl Ship {
    /// Unit vector along the current heading
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.heading)
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before the projectile disappears
    pub life: u32,
}

/// A drifting, spinning rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    /// Signed spin in radians per tick
    pub angular_vel: f32,
    /// Radius-equivalent size
    pub size: f32,
    /// Seed for the procedural outline; fixed for the obstacle's lifetime
    pub shape_seed: u8,
}

pub type ProjectilePool = BoundedPool<Projectile, MAX_PROJECTILES>;
pub type ObstaclePool = BoundedPool<Obstacle, MAX_OBSTACLES>;

/// Complete simulation state (deterministic given the same inputs and RNG)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Simulation tick counter
    pub ticks: u64,
    pub ship: Ship,
    pub projectiles: ProjectilePool,
    pub obstacles: ObstaclePool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a projectile; ignored when the pool is full
    pub fn add_projectile(&mut self, projectile: Projectile) -> bool {
        self.projectiles.push(projectile)
    }

    /// Add an obstacle; ignored when the pool is full
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> bool {
        self.obstacles.push(obstacle)
    }

    /// Spawn a projectile from the ship's nose along its heading.
    ///
    /// The ship's own velocity is added so shots don't lag a moving ship.
    pub fn fire_projectile(&mut self) -> bool {
        let dir = self.ship.forward();
        self.add_projectile(Projectile {
            pos: self.ship.pos + dir * MUZZLE_OFFSET,
            vel: dir * PROJECTILE_SPEED + self.ship.vel,
            life: PROJECTILE_LIFE_TICKS,
        })
    }
}
