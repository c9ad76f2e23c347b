//! Spawn telegraphs
//!
//! Enemies never pop in unannounced: a [`SpawnWarning`] sits on the visible
//! edge for a short while, then the coordinator turns it into a live enemy
//! just outside the screen behind it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TELEGRAPH_INSET};

/// Enemy archetypes the scheduler can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Homing,
    Turret,
}

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnSide {
    pub const ALL: [SpawnSide; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Uniformly random edge
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Random point `margin` pixels outside this edge
    pub fn spawn_point<R: Rng + ?Sized>(self, rng: &mut R, margin: f32) -> Vec2 {
        match self {
            Self::Top => Vec2::new(rng.random_range(0.0..SCREEN_WIDTH), -margin),
            Self::Right => Vec2::new(SCREEN_WIDTH + margin, rng.random_range(0.0..SCREEN_HEIGHT)),
            Self::Bottom => Vec2::new(rng.random_range(0.0..SCREEN_WIDTH), SCREEN_HEIGHT + margin),
            Self::Left => Vec2::new(-margin, rng.random_range(0.0..SCREEN_HEIGHT)),
        }
    }

    /// Unit vector pointing off-screen through this edge
    pub fn outward(self) -> Vec2 {
        match self {
            Self::Top => Vec2::NEG_Y,
            Self::Right => Vec2::X,
            Self::Bottom => Vec2::Y,
            Self::Left => Vec2::NEG_X,
        }
    }

    /// Point `distance` pixels inside this edge, level with `from`
    pub fn approach_point(self, from: Vec2, distance: f32) -> Vec2 {
        match self {
            Self::Top => Vec2::new(from.x, distance),
            Self::Right => Vec2::new(SCREEN_WIDTH - distance, from.y),
            Self::Bottom => Vec2::new(from.x, SCREEN_HEIGHT - distance),
            Self::Left => Vec2::new(distance, from.y),
        }
    }

    /// Long-axis orientation for a turret leaving through this edge
    pub fn retreat_facing(self) -> f32 {
        match self {
            Self::Top | Self::Bottom => 0.0,
            Self::Right | Self::Left => std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Clamp an off-screen spawn point onto the visible edge nearest to it
pub fn telegraph_point(spawn: Vec2) -> Vec2 {
    let mut point = spawn;
    if spawn.x < 0.0 {
        point.x = TELEGRAPH_INSET;
    } else if spawn.x > SCREEN_WIDTH {
        point.x = SCREEN_WIDTH - TELEGRAPH_INSET;
    }
    if spawn.y < 0.0 {
        point.y = TELEGRAPH_INSET;
    } else if spawn.y > SCREEN_HEIGHT {
        point.y = SCREEN_HEIGHT - TELEGRAPH_INSET;
    }
    point
}

/// A pending spawn, visible as a telegraph on the screen edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnWarning {
    kind: EnemyKind,
    side: Option<SpawnSide>,
    spawn_position: Vec2,
    telegraph_position: Vec2,
    elapsed: f32,
    duration: f32,
}

impl SpawnWarning {
    pub fn new(
        kind: EnemyKind,
        side: Option<SpawnSide>,
        spawn_position: Vec2,
        duration: f32,
    ) -> Self {
        Self {
            kind,
            side,
            spawn_position,
            telegraph_position: telegraph_point(spawn_position),
            elapsed: 0.0,
            duration,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// 0 when issued, 1 when the enemy appears (for telegraph animation)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Edge recorded for turrets (retreat direction); `None` for homing enemies
    pub fn side(&self) -> Option<SpawnSide> {
        self.side
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn telegraph_position(&self) -> Vec2 {
        self.telegraph_position
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
