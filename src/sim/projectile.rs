//! Projectiles fired by turrets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Entity, Rect, UpdateContext, is_off_screen, off_screen_margin};
use crate::tuning::ProjectileTuning;
use crate::wrap_angle;

/// Straight-flying projectile; only its facing spins, for looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    position: Vec2,
    velocity: Vec2,
    facing: f32,
    alive: bool,
    size: Vec2,
}

impl Projectile {
    /// Launch from `position` along `direction` (radians)
    pub fn new(position: Vec2, direction: f32, tuning: &ProjectileTuning) -> Self {
        Self {
            position,
            velocity: Vec2::from_angle(direction) * tuning.speed,
            facing: direction,
            alive: true,
            size: tuning.size,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }
}

impl Entity for Projectile {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if !self.alive {
            return;
        }
        self.facing = wrap_angle(self.facing + ctx.tuning.projectile.spin_rate * ctx.dt);
        self.position += self.velocity * ctx.dt;

        if is_off_screen(self.position, off_screen_margin(self.size)) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    fn destroy(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::f32::consts::FRAC_PI_2;

    fn step(projectile: &mut Projectile, tuning: &Tuning, dt: f32) {
        let mut fired = Vec::new();
        let mut events = Vec::new();
        let mut ctx = UpdateContext {
            dt,
            target: Vec2::ZERO,
            tuning,
            fired: &mut fired,
            events: &mut events,
        };
        projectile.update(&mut ctx);
    }

    #[test]
    fn test_constant_velocity_with_spin() {
        let tuning = Tuning::default();
        let mut projectile =
            Projectile::new(Vec2::new(400.0, 300.0), FRAC_PI_2, &tuning.projectile);
        let velocity = projectile.velocity();
        assert!((velocity - Vec2::new(0.0, 150.0)).length() < 1e-3);

        step(&mut projectile, &tuning, 0.5);
        assert_eq!(projectile.velocity(), velocity);
        assert!((projectile.position() - Vec2::new(400.0, 375.0)).length() < 1e-3);
        // Facing spins, heading doesn't
        assert!((projectile.facing() - wrap_angle(FRAC_PI_2 + 4.0)).abs() < 1e-5);
    }

    #[test]
    fn test_dies_past_screen_margin() {
        let tuning = Tuning::default();
        // Heading left from just inside the left edge
        let mut projectile =
            Projectile::new(Vec2::new(1.0, 300.0), std::f32::consts::PI, &tuning.projectile);
        step(&mut projectile, &tuning, 0.03125);
        assert!(projectile.is_alive());
        step(&mut projectile, &tuning, 0.03125);
        assert!(!projectile.is_alive(), "at x={} it should be gone", projectile.position().x);
    }
}
