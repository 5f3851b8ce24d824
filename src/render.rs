//! Draw lists for a line-and-dot renderer
//!
//! This module decides what goes on screen: closed polygons for the ship
//! and rocks, small dot clusters for projectiles. Rasterizing them is the
//! renderer's job. Read this between ticks only.

use glam::Vec2;

use crate::sim::shape::{SHIP_OUTLINE, obstacle_outline, rotate};
use crate::sim::state::{GameState, Obstacle, Projectile, Ship};

/// Entities drawn as a rotated closed polygon
pub trait Outlined {
    /// Outline points relative to the entity position, rotated by its heading
    fn rotated_outline(&self) -> Vec<Vec2>;
}

impl Outlined for Ship {
    fn rotated_outline(&self) -> Vec<Vec2> {
        rotate(&SHIP_OUTLINE, self.heading)
    }
}

impl Outlined for Obstacle {
    fn rotated_outline(&self) -> Vec<Vec2> {
        rotate(&obstacle_outline(self.size, self.shape_seed), self.heading)
    }
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Closed polygon; `points` are relative to `origin`
    Polygon { origin: Vec2, points: Vec<Vec2> },
    /// Individual pixels, absolute coordinates
    Dots(Vec<Vec2>),
}

/// A plus-shaped cluster centered on the projectile; one pixel is too
/// small to see
pub fn projectile_marker(projectile: &Projectile) -> [Vec2; 5] {
    let c = projectile.pos;
    [
        c - Vec2::X,
        c + Vec2::X,
        c,
        c - Vec2::Y,
        c + Vec2::Y,
    ]
}

/// Line segments of a closed polygon, including last -> first
pub fn closed_segments(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = points.len();
    (0..n).map(move |j| (points[j], points[(j + 1) % n]))
}

/// Everything on screen: ship, then projectiles, then rocks
pub fn frame(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(1 + state.projectiles.len() + state.obstacles.len());

    commands.push(DrawCommand::Polygon {
        origin: state.ship.pos,
        points: state.ship.rotated_outline(),
    });

    for p in &state.projectiles {
        commands.push(DrawCommand::Dots(projectile_marker(p).to_vec()));
    }

    for rock in &state.obstacles {
        commands.push(DrawCommand::Polygon {
            origin: rock.pos,
            points: rock.rotated_outline(),
        });
    }

    commands
}
