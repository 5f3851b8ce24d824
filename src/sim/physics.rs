//! Position integration on a toroidal screen
//!
//! Objects leaving one edge reappear on the opposite one. The wrap is
//! deliberately coarse: crossing the far edge lands exactly on 0, crossing
//! the near edge lands on `dimension - 1`.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{GameState, Obstacle};
use crate::consts::SCREEN_SIZE;

/// Wrap a single coordinate into the screen along one axis
#[inline]
pub fn wrap_axis(value: f32, dimension: f32) -> f32 {
    if value >= dimension {
        0.0
    } else if value < 0.0 {
        dimension - 1.0
    } else {
        value
    }
}

/// Move `pos` by `vel` and wrap it into a `bounds`-sized screen
#[inline]
pub fn advance(pos: Vec2, vel: Vec2, bounds: Vec2) -> Vec2 {
    let next = pos + vel;
    Vec2::new(wrap_axis(next.x, bounds.x), wrap_axis(next.y, bounds.y))
}

/// Spin an obstacle by its angular velocity.
///
/// The heading snaps to 2π when it goes negative and to 0 once it passes
/// 2π; no modulo is taken.
pub fn spin(obstacle: &mut Obstacle) {
    obstacle.heading += obstacle.angular_vel;
    if obstacle.heading < 0.0 {
        obstacle.heading = TAU;
    } else if obstacle.heading > TAU {
        obstacle.heading = 0.0;
    }
}

/// Advance the ship's position
pub fn move_ship(state: &mut GameState) {
    let ship = &mut state.ship;
    ship.pos = advance(ship.pos, ship.vel, SCREEN_SIZE);
}

/// Advance projectiles and age them. Returns how many expired.
pub fn move_projectiles(state: &mut GameState) -> usize {
    let mut expired = 0;
    let mut j = 0;
    while j < state.projectiles.len() {
        let p = &mut state.projectiles[j];
        p.pos = advance(p.pos, p.vel, SCREEN_SIZE);
        p.life = p.life.saturating_sub(1);
        if p.life == 0 {
            state.projectiles.swap_remove(j);
            expired += 1;
            // Slot j now holds the former last projectile, still unprocessed
            continue;
        }
        j += 1;
    }
    expired
}

/// Advance obstacles and spin them
pub fn move_obstacles(state: &mut GameState) {
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos = advance(obstacle.pos, obstacle.vel, SCREEN_SIZE);
        spin(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::sim::state::Projectile;
    use proptest::prelude::*;

    fn rock(heading: f32, angular_vel: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            heading,
            angular_vel,
            size: 6.0,
            shape_seed: 1,
        }
    }

    #[test]
    fn test_wrap_far_edge_lands_on_zero() {
        let bounds = SCREEN_SIZE;
        let next = advance(Vec2::new(SCREEN_WIDTH - 0.5, 5.0), Vec2::new(1.0, 0.0), bounds);
        assert_eq!(next, Vec2::new(0.0, 5.0));

        let next = advance(Vec2::new(5.0, SCREEN_HEIGHT - 0.25), Vec2::new(0.0, 0.5), bounds);
        assert_eq!(next, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_wrap_near_edge_lands_on_last_pixel() {
        let bounds = SCREEN_SIZE;
        let next = advance(Vec2::new(0.0, 5.0), Vec2::new(-1.0, 0.0), bounds);
        assert_eq!(next, Vec2::new(SCREEN_WIDTH - 1.0, 5.0));

        let next = advance(Vec2::new(5.0, 0.2), Vec2::new(0.0, -0.5), bounds);
        assert_eq!(next, Vec2::new(5.0, SCREEN_HEIGHT - 1.0));
    }

    #[test]
    fn test_wrap_other_bounds() {
        let bounds = Vec2::new(40.0, 30.0);
        assert_eq!(advance(Vec2::new(39.5, 0.0), Vec2::X, bounds).x, 0.0);
        assert_eq!(advance(Vec2::new(0.0, 0.0), -Vec2::X, bounds).x, 39.0);
    }

    #[test]
    fn test_no_wrap_inside() {
        let next = advance(Vec2::new(10.0, 10.0), Vec2::new(1.5, -2.0), SCREEN_SIZE);
        assert_eq!(next, Vec2::new(11.5, 8.0));
    }

    #[test]
    fn test_spin_coarse_wrap() {
        let mut o = rock(0.05, -0.1);
        spin(&mut o);
        assert_eq!(o.heading, TAU);

        let mut o = rock(TAU - 0.05, 0.1);
        spin(&mut o);
        assert_eq!(o.heading, 0.0);

        let mut o = rock(1.0, 0.05);
        spin(&mut o);
        assert!((o.heading - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_projectiles_expire_and_compact() {
        let mut state = GameState::new();
        for life in [1, 5, 1, 1, 7] {
            state.add_projectile(Projectile {
                pos: Vec2::new(20.0, 20.0),
                vel: Vec2::ZERO,
                life,
            });
        }

        let expired = move_projectiles(&mut state);
        assert_eq!(expired, 3);
        assert_eq!(state.projectiles.len(), 2);
        let mut lives: Vec<u32> = state.projectiles.iter().map(|p| p.life).collect();
        lives.sort_unstable();
        assert_eq!(lives, vec![4, 6]);
    }

    proptest! {
        #[test]
        fn prop_advance_stays_on_screen(
            x in 0.0f32..128.0,
            y in 0.0f32..64.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
        ) {
            let next = advance(Vec2::new(x, y), Vec2::new(vx, vy), SCREEN_SIZE);
            prop_assert!(next.x >= 0.0 && next.x < SCREEN_WIDTH);
            prop_assert!(next.y >= 0.0 && next.y < SCREEN_HEIGHT);
        }
    }
}
