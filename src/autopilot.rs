//! Idle/demo mode driver
//!
//! Reads the game state and picks held directions the way a cautious player
//! would: push away from nearby threats, drift back toward the middle when
//! nothing is close.

use glam::Vec2;

use crate::screen_center;
use crate::sim::{GameState, TickInput};

/// Threats further than this are ignored (px)
const THREAT_RADIUS: f32 = 160.0;
/// Projectiles are fast and small; react to them a bit earlier
const PROJECTILE_WEIGHT: f32 = 1.5;
/// Strength of the pull toward the screen center
const CENTER_PULL: f32 = 0.002;
/// Axis components below this don't press a key
const DEAD_ZONE: f32 = 0.2;

/// Summed push away from threats near `from`, plus a weak pull to center
pub fn danger_vector(state: &GameState, from: Vec2) -> Vec2 {
    let enemies = &state.enemies;
    let threats = enemies
        .homing_enemies()
        .iter()
        .map(|e| (e.position(), 1.0))
        .chain(enemies.turret_enemies().iter().map(|e| (e.position(), 1.0)))
        .chain(
            enemies
                .projectiles()
                .iter()
                .map(|p| (p.position(), PROJECTILE_WEIGHT)),
        );

    let mut push = Vec2::ZERO;
    for (position, weight) in threats {
        let away = from - position;
        let distance = away.length();
        if distance >= THREAT_RADIUS {
            continue;
        }
        // Standing on a threat: any direction beats none
        let direction = if distance > f32::EPSILON {
            away / distance
        } else {
            Vec2::X
        };
        let closeness = 1.0 - distance / THREAT_RADIUS;
        push += direction * closeness * closeness * weight;
    }

    push + (screen_center() - from) * CENTER_PULL
}

/// Movement input for the current tick
pub fn steer(state: &GameState) -> TickInput {
    let want = danger_vector(state, state.player.position);
    if want.length() < DEAD_ZONE {
        return TickInput::default();
    }
    let want = want.normalize_or_zero();
    TickInput {
        up: want.y < -DEAD_ZONE,
        down: want.y > DEAD_ZONE,
        left: want.x < -DEAD_ZONE,
        right: want.x > DEAD_ZONE,
        ..Default::default()
    }
}
