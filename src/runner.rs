//! Headless round runner
//!
//! Feeds frame times through a fixed-step accumulator and plays one round to
//! the end, either with the autopilot or with no input at all.

use serde::Serialize;

use crate::autopilot;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::sim::{GameEvent, GamePhase, GameState, TickFlow, TickInput, tick};
use crate::tuning::Tuning;

/// Parameters for one headless round
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    /// Wall-clock seconds per rendered frame
    pub frame_dt: f32,
    /// Hard stop, in frames
    pub max_frames: u32,
    /// Drive the player with the autopilot; otherwise stand still
    pub autopilot: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frame_dt: SIM_DT,
            max_frames: 60 * 60 * 5,
            autopilot: true,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_dt.is_finite() || self.frame_dt <= 0.0 {
            return Err(ConfigError::InvalidFrameDt {
                frame_dt: self.frame_dt,
            });
        }
        if self.max_frames == 0 {
            return Err(ConfigError::ZeroFrameBudget);
        }
        Ok(())
    }
}

/// Fixed timestep accumulator
///
/// Banks frame time and pays it out in `SIM_DT` steps, at most
/// `MAX_SUBSTEPS` per frame. Time beyond that is dropped.
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulation steps to run for a frame of `frame_dt` seconds
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Spiral of death: drop what we couldn't simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Won,
    GameOver,
    /// Frame budget ran out first
    Unfinished,
}

/// Result of one headless round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub outcome: Outcome,
    pub ticks: u64,
    pub survived_secs: f32,
    pub health: u32,
    pub enemies_spawned: u32,
    pub shots_fired: u32,
    pub hits_taken: u32,
}

/// Play one round headless and summarize it
pub fn run(config: &RunConfig, tuning: &Tuning) -> Result<RunSummary, ConfigError> {
    config.validate()?;
    tuning.validate()?;

    let mut state = GameState::new(config.seed, tuning.clone());
    let mut stepper = FixedStepper::new();
    let mut enemies_spawned = 0;
    let mut shots_fired = 0;
    let mut hits_taken = 0;

    log::info!(
        "Starting headless round: seed {}, {} frames max, autopilot {}",
        config.seed,
        config.max_frames,
        config.autopilot
    );

    'frames: for _ in 0..config.max_frames {
        for _ in 0..stepper.advance(config.frame_dt) {
            let input = if config.autopilot {
                autopilot::steer(&state)
            } else {
                TickInput::default()
            };
            if tick(&mut state, &input, SIM_DT) == TickFlow::Quit {
                break 'frames;
            }
            for event in state.events() {
                match event {
                    GameEvent::EnemySpawned { .. } => enemies_spawned += 1,
                    GameEvent::ProjectileFired { .. } => shots_fired += 1,
                    GameEvent::PlayerDamaged { .. } => hits_taken += 1,
                    _ => {}
                }
            }
            if !matches!(state.phase(), GamePhase::Playing) {
                break 'frames;
            }
        }
    }

    let outcome = match state.phase() {
        GamePhase::Won => Outcome::Won,
        GamePhase::GameOver => Outcome::GameOver,
        GamePhase::Playing | GamePhase::Paused => Outcome::Unfinished,
    };
    let summary = RunSummary {
        seed: config.seed,
        outcome,
        ticks: state.time_ticks,
        survived_secs: state.clock.duration() - state.clock.time_remaining(),
        health: state.player.health,
        enemies_spawned,
        shots_fired,
        hits_taken,
    };
    log::info!("Round finished: {:?} after {} ticks", summary.outcome, summary.ticks);
    Ok(summary)
}
