//! Homing ("pill") enemy
//!
//! Steers toward the player for a fixed time, then flies straight on its
//! last heading until it leaves the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Entity, Rect, UpdateContext, is_off_screen, off_screen_margin};
use crate::tuning::HomingTuning;
use crate::{heading, rotate_toward};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomingEnemy {
    position: Vec2,
    velocity: Vec2,
    /// Heading (radians)
    facing: f32,
    tracking_elapsed: f32,
    /// Cleared once `tracking_elapsed` reaches the tracking duration; never set again
    tracking: bool,
    alive: bool,
    size: Vec2,
}

impl HomingEnemy {
    pub fn new(position: Vec2, facing: f32, tuning: &HomingTuning) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing,
            tracking_elapsed: 0.0,
            tracking: true,
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

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn tracking_elapsed(&self) -> f32 {
        self.tracking_elapsed
    }
}

impl Entity for HomingEnemy {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if !self.alive {
            return;
        }
        let tuning = &ctx.tuning.homing;

        self.tracking_elapsed += ctx.dt;
        if self.tracking_elapsed >= tuning.tracking_secs {
            self.tracking = false;
        }

        if self.tracking {
            // Sitting exactly on the target: keep the old heading
            if let Some(desired) = heading(ctx.target - self.position) {
                self.facing = rotate_toward(self.facing, desired, tuning.turn_rate * ctx.dt);
            }
        }

        self.velocity = Vec2::from_angle(self.facing) * tuning.speed;
        self.position += self.velocity * ctx.dt;

        if !self.tracking && is_off_screen(self.position, off_screen_margin(self.size)) {
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
