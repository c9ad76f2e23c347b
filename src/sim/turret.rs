//! Turret enemy
//!
//! Drives in from its spawn edge, parks, turns its short axis toward the
//! player and fires on a fixed cadence, then backs out the way it came.
//! Phases only ever advance: Approaching → Tracking → Retreating → gone.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Entity, Rect, UpdateContext, is_off_screen, off_screen_margin};
use super::projectile::Projectile;
use super::spawn::SpawnSide;
use super::state::GameEvent;
use crate::tuning::{Tuning, TurretTuning};
use crate::{heading, rotate_toward, screen_center, wrap_angle};

/// Turret behavior phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretState {
    /// Driving toward the parking point inside the spawn edge
    Approaching,
    /// Parked, aiming and firing
    Tracking,
    /// Leaving through the spawn edge
    Retreating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretEnemy {
    position: Vec2,
    velocity: Vec2,
    /// Long-axis orientation (radians); the short axis is `facing - π/2`
    facing: f32,
    state: TurretState,
    state_elapsed: f32,
    fire_timer: f32,
    charging: bool,
    charge_elapsed: f32,
    side: SpawnSide,
    spawn_position: Vec2,
    target_position: Vec2,
    /// Fixed when retreat starts so the turret keeps going past its spawn point
    retreat_heading: Vec2,
    alive: bool,
    size: Vec2,
}

impl TurretEnemy {
    pub fn new(position: Vec2, side: SpawnSide, tuning: &TurretTuning) -> Self {
        // Short axis toward the screen center while driving in
        let facing = match heading(screen_center() - position) {
            Some(angle) => wrap_angle(angle + FRAC_PI_2),
            None => side.retreat_facing(),
        };
        Self {
            position,
            velocity: Vec2::ZERO,
            facing,
            state: TurretState::Approaching,
            state_elapsed: 0.0,
            fire_timer: 0.0,
            charging: false,
            charge_elapsed: 0.0,
            side,
            spawn_position: position,
            target_position: side.approach_point(position, tuning.approach_distance),
            retreat_heading: side.outward(),
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

    pub fn state(&self) -> TurretState {
        self.state
    }

    pub fn state_elapsed(&self) -> f32 {
        self.state_elapsed
    }

    /// In the wind-up before a shot (cosmetic)
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Seconds into the current wind-up (cosmetic)
    pub fn charge_elapsed(&self) -> f32 {
        self.charge_elapsed
    }

    pub fn side(&self) -> SpawnSide {
        self.side
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    fn enter(&mut self, state: TurretState, events: &mut Vec<GameEvent>) {
        self.state = state;
        self.state_elapsed = 0.0;
        log::debug!("Turret at {} -> {:?}", self.position, state);
        events.push(GameEvent::TurretPhaseChanged {
            position: self.position,
            state,
        });
    }

    fn update_approaching(&mut self, tuning: &TurretTuning, dt: f32, events: &mut Vec<GameEvent>) {
        let to_target = self.target_position - self.position;
        let distance = to_target.length();
        if distance <= tuning.arrive_tolerance {
            self.velocity = Vec2::ZERO;
            self.enter(TurretState::Tracking, events);
        } else {
            // Don't step past the parking point on long ticks
            let speed = tuning.speed.min(distance / dt);
            self.velocity = to_target / distance * speed;
        }
    }

    fn update_tracking(&mut self, ctx: &mut UpdateContext<'_>) {
        let tuning: &Tuning = ctx.tuning;
        let turret = &tuning.turret;
        self.velocity = Vec2::ZERO;

        if let Some(bearing) = heading(ctx.target - self.position) {
            let desired = wrap_angle(bearing + FRAC_PI_2);
            self.facing = rotate_toward(self.facing, desired, turret.turn_rate * ctx.dt);
        }

        self.fire_timer += ctx.dt;
        if !self.charging && self.fire_timer >= turret.fire_interval - turret.charge_secs {
            self.charging = true;
            self.charge_elapsed = 0.0;
        }
        if self.charging {
            self.charge_elapsed += ctx.dt;
        }
        if self.fire_timer >= turret.fire_interval {
            self.fire(ctx);
            self.fire_timer = 0.0;
            self.charging = false;
            self.charge_elapsed = 0.0;
        }

        if self.state_elapsed >= turret.tracking_secs {
            // Back out along the line we came in on
            let to_spawn = self.spawn_position - self.position;
            self.retreat_heading = if to_spawn == Vec2::ZERO {
                self.side.outward()
            } else {
                to_spawn.normalize()
            };
            self.facing = self.side.retreat_facing();
            self.charging = false;
            self.charge_elapsed = 0.0;
            self.enter(TurretState::Retreating, ctx.events);
        }
    }

    fn fire(&mut self, ctx: &mut UpdateContext<'_>) {
        let direction = wrap_angle(self.facing - FRAC_PI_2);
        let projectile = Projectile::new(self.position, direction, &ctx.tuning.projectile);
        ctx.fired.push(projectile);
        log::trace!("Turret fired from {} at {:.2} rad", self.position, direction);
        ctx.events.push(GameEvent::ProjectileFired {
            position: self.position,
            direction,
        });
    }
}

impl Entity for TurretEnemy {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if !self.alive {
            return;
        }
        self.state_elapsed += ctx.dt;

        match self.state {
            TurretState::Approaching => {
                let tuning: &Tuning = ctx.tuning;
                self.update_approaching(&tuning.turret, ctx.dt, ctx.events);
            }
            TurretState::Tracking => self.update_tracking(ctx),
            TurretState::Retreating => {
                self.velocity = self.retreat_heading * ctx.tuning.turret.speed;
            }
        }

        self.position += self.velocity * ctx.dt;

        if self.state == TurretState::Retreating
            && is_off_screen(self.position, off_screen_margin(self.size))
        {
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
