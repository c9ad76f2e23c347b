//! Data-driven game balance
//!
//! Every gameplay constant lives here so the simulation reads one struct
//! instead of scattered literals. `Tuning::default()` is the shipped balance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Round length and player parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Seconds the player must survive to win
    pub round_secs: f32,
    /// Starting (and maximum) health
    pub max_health: u32,
    /// Side length of the square player box
    pub size: f32,
    /// Movement speed (px/s)
    pub speed: f32,
    /// Scale applied to diagonal input (≈ 1/√2)
    pub diagonal_scale: f32,
}

/// Homing ("pill") enemy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomingTuning {
    pub size: Vec2,
    /// Forward speed (px/s)
    pub speed: f32,
    /// Seconds spent steering toward the player before going ballistic
    pub tracking_secs: f32,
    /// Max turn rate while tracking (rad/s)
    pub turn_rate: f32,
    pub damage: u32,
    /// Spawn distance outside the screen edge
    pub spawn_margin: f32,
}

/// Turret enemy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretTuning {
    pub size: Vec2,
    /// Approach and retreat speed (px/s)
    pub speed: f32,
    /// How far inside its spawn edge the turret parks
    pub approach_distance: f32,
    /// Distance at which the approach counts as arrived
    pub arrive_tolerance: f32,
    /// Seconds spent parked and firing
    pub tracking_secs: f32,
    /// Max turn rate while tracking (rad/s)
    pub turn_rate: f32,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Charge-up lead time before each shot
    pub charge_secs: f32,
    pub damage: u32,
    /// Spawn distance outside the screen edge
    pub spawn_margin: f32,
}

/// Projectile parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTuning {
    pub size: Vec2,
    /// Travel speed (px/s)
    pub speed: f32,
    /// Cosmetic spin (rad/s)
    pub spin_rate: f32,
    pub damage: u32,
}

/// Spawn scheduling and difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Seconds between spawns at the start of a round
    pub initial_interval: f32,
    /// Fastest spawn cadence, reached at the end of the ramp
    pub min_interval: f32,
    /// Seconds of play to go from initial to min interval
    pub ramp_secs: f32,
    /// Telegraph duration before an enemy appears
    pub warning_secs: f32,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub homing: HomingTuning,
    pub turret: TurretTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning {
                round_secs: 120.0,
                max_health: 10,
                size: 20.0,
                speed: 200.0,
                diagonal_scale: 0.707,
            },
            homing: HomingTuning {
                size: Vec2::new(20.0, 10.0),
                speed: 120.0,
                tracking_secs: 5.0,
                turn_rate: 2.0,
                damage: 1,
                spawn_margin: 10.0,
            },
            turret: TurretTuning {
                size: Vec2::new(30.0, 15.0),
                speed: 100.0,
                approach_distance: 50.0,
                arrive_tolerance: 5.0,
                tracking_secs: 8.0,
                turn_rate: 5.0,
                fire_interval: 1.5,
                charge_secs: 0.5,
                damage: 1,
                spawn_margin: 10.0,
            },
            projectile: ProjectileTuning {
                size: Vec2::new(6.0, 4.0),
                speed: 150.0,
                spin_rate: 8.0,
                damage: 1,
            },
            spawn: SpawnTuning {
                initial_interval: 2.0,
                min_interval: 0.3,
                ramp_secs: 90.0,
                warning_secs: 1.0,
            },
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.round_secs", self.player.round_secs)?;
        positive("player.size", self.player.size)?;
        positive("player.speed", self.player.speed)?;
        positive("player.diagonal_scale", self.player.diagonal_scale)?;
        if self.player.max_health == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "player.max_health",
                reason: "must be at least 1",
            });
        }

        positive("homing.speed", self.homing.speed)?;
        positive("homing.turn_rate", self.homing.turn_rate)?;
        positive("homing.tracking_secs", self.homing.tracking_secs)?;
        positive_size("homing.size", self.homing.size)?;

        positive("turret.speed", self.turret.speed)?;
        positive("turret.turn_rate", self.turret.turn_rate)?;
        positive("turret.tracking_secs", self.turret.tracking_secs)?;
        positive("turret.approach_distance", self.turret.approach_distance)?;
        positive("turret.arrive_tolerance", self.turret.arrive_tolerance)?;
        positive("turret.fire_interval", self.turret.fire_interval)?;
        positive_size("turret.size", self.turret.size)?;
        if self.turret.charge_secs < 0.0 || self.turret.charge_secs > self.turret.fire_interval {
            return Err(ConfigError::InvalidTuning {
                field: "turret.charge_secs",
                reason: "must lie within [0, fire_interval]",
            });
        }

        positive("projectile.speed", self.projectile.speed)?;
        positive_size("projectile.size", self.projectile.size)?;

        positive("spawn.min_interval", self.spawn.min_interval)?;
        positive("spawn.ramp_secs", self.spawn.ramp_secs)?;
        positive("spawn.warning_secs", self.spawn.warning_secs)?;
        if self.spawn.initial_interval < self.spawn.min_interval {
            return Err(ConfigError::InvalidTuning {
                field: "spawn.initial_interval",
                reason: "must not be shorter than spawn.min_interval",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            reason: "must be a positive finite number",
        })
    }
}

fn positive_size(field: &'static str, size: Vec2) -> Result<(), ConfigError> {
    positive(field, size.x)?;
    positive(field, size.y)
}
