//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only, passed explicitly
//! - Stable update order (spawns, homing, turrets, projectiles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod coordinator;
pub mod difficulty;
pub mod homing;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod turret;

pub use collision::{Entity, Rect, UpdateContext};
pub use coordinator::{EnemyCoordinator, Hit, HitSource};
pub use difficulty::spawn_interval;
pub use homing::HomingEnemy;
pub use projectile::Projectile;
pub use spawn::{EnemyKind, SpawnSide, SpawnWarning};
pub use state::{GameClock, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickFlow, TickInput, tick};
pub use turret::{TurretEnemy, TurretState};
