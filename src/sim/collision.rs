//! Projectile / obstacle collisions
//!
//! Everything is a circle here. Overlap is tested on squared distances so
//! no square root is needed.

use glam::Vec2;

use super::state::{GameState, Obstacle};
use crate::consts::PROJECTILE_RADIUS;

/// Check whether two circles overlap.
///
/// `factor` rescales the distance between the centers before comparing:
/// below 1 reports a hit before the circles touch, above 1 only once they
/// overlap a little. Stored sizes are never changed.
#[inline]
pub fn overlaps(p1: Vec2, r1: f32, p2: Vec2, r2: f32, factor: f32) -> bool {
    let delta = (p1 - p2) * factor;
    let rsum = r1 + r2;
    delta.length_squared() < rsum * rsum
}

/// Remove every projectile that hits an obstacle, along with the obstacle.
///
/// A projectile destroys at most one obstacle. Returns the destroyed
/// obstacles in the order they were hit.
pub fn resolve_projectile_hits(state: &mut GameState) -> Vec<Obstacle> {
    let mut destroyed = Vec::new();
    let mut j = 0;
    while j < state.projectiles.len() {
        let shot = state.projectiles[j].pos;
        let hit = state
            .obstacles
            .iter()
            .position(|o| overlaps(o.pos, o.size, shot, PROJECTILE_RADIUS, 1.0));

        if let Some(i) = hit {
            destroyed.push(state.obstacles.swap_remove(i));
            state.projectiles.swap_remove(j);
            // Another projectile moved into slot j; check it before advancing
            continue;
        }
        j += 1;
    }
    destroyed
}
