//! Difficulty ramp
//!
//! Spawn cadence tightens from `initial_interval` to `min_interval` over
//! `ramp_secs` of play, eased in quadratically so the early game stays calm.

use crate::tuning::SpawnTuning;

/// Seconds between spawns after `elapsed` seconds of play
pub fn spawn_interval(elapsed: f32, spawn: &SpawnTuning) -> f32 {
    let progress = (elapsed / spawn.ramp_secs).min(1.0);
    if progress >= 1.0 {
        return spawn.min_interval;
    }
    let eased = progress * progress;
    let interval = spawn.initial_interval - (spawn.initial_interval - spawn.min_interval) * eased;
    // Rounding near the end of the ramp must not dip below the floor
    interval.max(spawn.min_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_initial_interval() {
        let spawn = Tuning::default().spawn;
        assert_eq!(spawn_interval(0.0, &spawn), spawn.initial_interval);
    }

    #[test]
    fn test_clamps_at_min_after_ramp() {
        let spawn = Tuning::default().spawn;
        assert_eq!(spawn_interval(spawn.ramp_secs, &spawn), spawn.min_interval);
        assert_eq!(spawn_interval(spawn.ramp_secs + 0.001, &spawn), spawn.min_interval);
        assert_eq!(spawn_interval(10_000.0, &spawn), spawn.min_interval);
    }

    #[test]
    fn test_ease_in_midpoint() {
        let spawn = Tuning::default().spawn;
        // Halfway through the ramp only a quarter of the drop has happened
        let mid = spawn_interval(spawn.ramp_secs / 2.0, &spawn);
        let expected = 2.0 - 1.7 * 0.25;
        assert!((mid - expected).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn interval_never_increases(a in 0.0f32..200.0, b in 0.0f32..200.0) {
            let spawn = Tuning::default().spawn;
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(spawn_interval(late, &spawn) <= spawn_interval(early, &spawn));
        }

        #[test]
        fn interval_exactly_min_past_ramp(extra in 0.0f32..1000.0) {
            let spawn = Tuning::default().spawn;
            prop_assert_eq!(spawn_interval(spawn.ramp_secs + extra, &spawn), spawn.min_interval);
        }
    }
}
