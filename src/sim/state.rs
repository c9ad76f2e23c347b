//! Game state types
//!
//! All state needed for deterministic simulation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::coordinator::{EnemyCoordinator, HitSource};
use super::spawn::EnemyKind;
use super::tick::TickInput;
use super::turret::TurretState;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::screen_center;
use crate::tuning::{PlayerTuning, Tuning};

/// Current game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, enemies active
    Playing,
    /// Survived until the clock ran out
    Won,
    /// Health reached zero
    GameOver,
    /// Frozen; resumes to Playing
    Paused,
}

/// Round countdown and phase machine
///
/// `Won` and `GameOver` are terminal until [`GameClock::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    time_remaining: f32,
    phase: GamePhase,
    duration: f32,
}

impl GameClock {
    pub fn new(duration: f32) -> Self {
        Self {
            time_remaining: duration,
            phase: GamePhase::Playing,
            duration,
        }
    }

    /// Count down while playing. Returns the phase change, if any.
    pub fn update(&mut self, dt: f32) -> Option<(GamePhase, GamePhase)> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.phase = GamePhase::Won;
            return Some((GamePhase::Playing, GamePhase::Won));
        }
        None
    }

    /// Playing → GameOver. Returns false (and changes nothing) from any other phase.
    pub fn set_game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Pause if playing, resume if paused; terminal phases ignore it
    pub fn toggle_pause(&mut self) -> Option<(GamePhase, GamePhase)> {
        let from = self.phase;
        let changed = match from {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Won | GamePhase::GameOver => false,
        };
        changed.then_some((from, self.phase))
    }

    pub fn reset(&mut self) {
        self.time_remaining = self.duration;
        self.phase = GamePhase::Playing;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Entities and the countdown only advance while playing
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Whole seconds left, rounded up (HUD)
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining.ceil() as u32
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// The player box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// Last movement direction (radians)
    pub facing: f32,
    pub health: u32,
    pub max_health: u32,
    pub size: f32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            position: screen_center(),
            facing: 0.0,
            health: tuning.max_health,
            max_health: tuning.max_health,
            size: tuning.size,
        }
    }

    /// Move from held directions, keeping the whole box on screen
    pub fn update(&mut self, input: &TickInput, dt: f32, tuning: &PlayerTuning) {
        let mut direction = Vec2::ZERO;
        if input.up {
            direction.y -= 1.0;
        }
        if input.down {
            direction.y += 1.0;
        }
        if input.left {
            direction.x -= 1.0;
        }
        if input.right {
            direction.x += 1.0;
        }
        if direction == Vec2::ZERO {
            return;
        }
        if direction.x != 0.0 && direction.y != 0.0 {
            direction *= tuning.diagonal_scale;
        }

        self.facing = direction.y.atan2(direction.x);
        let half = self.size / 2.0;
        let next = self.position + direction * tuning.speed * dt;
        self.position = next.clamp(
            Vec2::splat(half),
            Vec2::new(SCREEN_WIDTH - half, SCREEN_HEIGHT - half),
        );
    }

    /// Apply damage, flooring health at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(self.size))
    }
}

/// Semantic events for presentation layers (cleared every tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WarningIssued { kind: EnemyKind, telegraph: Vec2 },
    EnemySpawned { kind: EnemyKind, position: Vec2 },
    TurretPhaseChanged { position: Vec2, state: TurretState },
    ProjectileFired { position: Vec2, direction: f32 },
    PlayerDamaged { source: HitSource, amount: u32, health: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; keeps its stream across restarts
    pub rng: Pcg32,
    pub clock: GameClock,
    pub player: Player,
    pub enemies: EnemyCoordinator,
    pub tuning: Tuning,
    /// Active-play ticks since the last restart
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: GameClock::new(tuning.player.round_secs),
            player: Player::new(&tuning.player),
            enemies: EnemyCoordinator::new(),
            tuning,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a fresh round with the same seed stream
    pub fn restart(&mut self) {
        self.clock.reset();
        self.player = Player::new(&self.tuning.player);
        self.enemies.reset();
        self.time_ticks = 0;
        log::info!("Round restarted (seed {})", self.seed);
    }

    pub fn phase(&self) -> GamePhase {
        self.clock.phase()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
