//! Bad Week - a single-screen arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemies, spawning, collisions, game clock)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Idle/demo driver that plays the game headless
//! - `runner`: Fixed-step loop that plays a full round and summarizes it

pub mod autopilot;
pub mod error;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions in pixels (origin top-left, +y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Spawn telegraphs sit this far inside the visible edge
    pub const TELEGRAPH_INSET: f32 = 5.0;
}

/// Center of the play field
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}

/// Wrap an angle to (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut angle = angle % TAU;
    if angle <= -PI {
        angle += TAU;
    } else if angle > PI {
        angle -= TAU;
    }
    angle
}

/// Turn `current` toward `target` by at most `max_step` radians, taking the
/// shorter way around. Lands exactly on `target` when within reach.
#[inline]
pub fn rotate_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + delta.signum() * max_step)
    }
}

/// Heading angle of a direction vector, or `None` for a zero vector
#[inline]
pub fn heading(direction: Vec2) -> Option<f32> {
    if direction == Vec2::ZERO {
        None
    } else {
        Some(direction.y.atan2(direction.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap_angle(-FRAC_PI_2 - TAU) + FRAC_PI_2).abs() < 1e-5);
        assert_eq!(wrap_angle(0.25), 0.25);
        // -π maps onto the closed end of the range
        assert!(wrap_angle(-PI) > 0.0);
    }

    #[test]
    fn test_rotate_toward_takes_short_way() {
        // From just below +π to just above -π: crossing the seam is shorter
        let current = PI - 0.1;
        let target = -PI + 0.1;
        let next = rotate_toward(current, target, 0.05);
        assert!(wrap_angle(next - current) > 0.0);
    }

    #[test]
    fn test_rotate_toward_snaps_when_close() {
        assert_eq!(rotate_toward(1.0, 1.02, 0.05), 1.02);
        assert!((rotate_toward(1.0, 0.5, 0.1) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_heading_zero_vector() {
        assert_eq!(heading(Vec2::ZERO), None);
        assert_eq!(heading(Vec2::new(1.0, 0.0)), Some(0.0));
    }

    proptest! {
        #[test]
        fn rotate_toward_never_overshoots(
            current in -PI..PI,
            target in -PI..PI,
            max_step in 0.001f32..0.5,
        ) {
            let before = wrap_angle(target - current).abs();
            let next = rotate_toward(current, target, max_step);
            let after = wrap_angle(target - next).abs();
            prop_assert!(after <= before + 1e-4);
            if before > max_step {
                prop_assert!((before - after - max_step).abs() < 1e-3);
            } else {
                prop_assert!(after < 1e-4);
            }
        }
    }
}
