//! Enemy coordinator
//!
//! Owns every hostile entity and every pending spawn. One `update` call per
//! tick runs, in this order:
//! 1. advance spawn warnings and turn finished ones into enemies
//! 2. maybe issue a new warning (difficulty-ramped cadence)
//! 3. homing enemies, 4. turrets (may fire), 5. projectiles
//!
//! Dead entities are pruned in the same pass that updated them. Collision
//! against the player is a separate call made after the update pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Entity, Rect, UpdateContext};
use super::difficulty::spawn_interval;
use super::homing::HomingEnemy;
use super::projectile::Projectile;
use super::spawn::{EnemyKind, SpawnSide, SpawnWarning};
use super::state::GameEvent;
use super::turret::TurretEnemy;
use crate::tuning::Tuning;
use crate::{heading, screen_center};

/// What hit the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Homing,
    Turret,
    Projectile,
}

/// A resolved player collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub source: HitSource,
    pub damage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyCoordinator {
    homing: Vec<HomingEnemy>,
    turrets: Vec<TurretEnemy>,
    projectiles: Vec<Projectile>,
    warnings: Vec<SpawnWarning>,
    /// Seconds since the last warning was issued
    spawn_timer: f32,
    /// Seconds of active play; drives the difficulty ramp
    elapsed: f32,
}

impl EnemyCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything (round restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance all spawning and entity state by one tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.elapsed += dt;
        self.spawn_timer += dt;

        // 1. Pending spawns
        let mut index = 0;
        while index < self.warnings.len() {
            self.warnings[index].advance(dt);
            if self.warnings[index].is_complete() {
                let warning = self.warnings.remove(index);
                self.spawn_enemy(
                    warning.kind(),
                    warning.spawn_position(),
                    warning.side(),
                    tuning,
                    events,
                );
            } else {
                index += 1;
            }
        }

        // 2. New spawns on the ramped cadence
        if self.spawn_timer >= spawn_interval(self.elapsed, &tuning.spawn) {
            self.issue_warning(tuning, rng, events);
            self.spawn_timer = 0.0;
        }

        // 3-5. Entities, pruned as they die
        let mut fired = Vec::new();
        let mut ctx = UpdateContext {
            dt,
            target: player_pos,
            tuning,
            fired: &mut fired,
            events,
        };
        update_and_prune(&mut self.homing, &mut ctx);
        update_and_prune(&mut self.turrets, &mut ctx);
        self.projectiles.append(ctx.fired);
        update_and_prune(&mut self.projectiles, &mut ctx);
    }

    /// Resolve at most one player collision this tick.
    ///
    /// Checks homing enemies, then turrets, then projectiles, and removes only
    /// the first entity found overlapping `player`.
    pub fn check_collision(&mut self, player: &Rect, tuning: &Tuning) -> Option<Hit> {
        if take_first_hit(&mut self.homing, player) {
            return Some(Hit {
                source: HitSource::Homing,
                damage: tuning.homing.damage,
            });
        }
        if take_first_hit(&mut self.turrets, player) {
            return Some(Hit {
                source: HitSource::Turret,
                damage: tuning.turret.damage,
            });
        }
        if take_first_hit(&mut self.projectiles, player) {
            return Some(Hit {
                source: HitSource::Projectile,
                damage: tuning.projectile.damage,
            });
        }
        None
    }

    fn issue_warning<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let kind = if rng.random_bool(0.5) {
            EnemyKind::Homing
        } else {
            EnemyKind::Turret
        };
        let side = SpawnSide::random(rng);
        let (margin, recorded_side) = match kind {
            EnemyKind::Homing => (tuning.homing.spawn_margin, None),
            EnemyKind::Turret => (tuning.turret.spawn_margin, Some(side)),
        };
        let spawn_position = side.spawn_point(rng, margin);
        let warning = SpawnWarning::new(
            kind,
            recorded_side,
            spawn_position,
            tuning.spawn.warning_secs,
        );
        log::trace!(
            "Spawn warning: {:?} from {:?} at {}",
            kind,
            side,
            warning.telegraph_position()
        );
        events.push(GameEvent::WarningIssued {
            kind,
            telegraph: warning.telegraph_position(),
        });
        self.warnings.push(warning);
    }

    pub(crate) fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        position: Vec2,
        side: Option<SpawnSide>,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        match kind {
            EnemyKind::Homing => {
                let facing = heading(screen_center() - position).unwrap_or(0.0);
                self.homing.push(HomingEnemy::new(position, facing, &tuning.homing));
            }
            EnemyKind::Turret => {
                // Turret warnings always carry a side; derive one from the position otherwise
                let side = side.unwrap_or_else(|| nearest_side(position));
                self.turrets.push(TurretEnemy::new(position, side, &tuning.turret));
            }
        }
        log::debug!("Spawned {:?} at {}", kind, position);
        events.push(GameEvent::EnemySpawned { kind, position });
    }

    pub fn homing_enemies(&self) -> &[HomingEnemy] {
        &self.homing
    }

    pub fn turret_enemies(&self) -> &[TurretEnemy] {
        &self.turrets
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn spawn_warnings(&self) -> &[SpawnWarning] {
        &self.warnings
    }

    /// Live homing enemies plus live turrets
    pub fn live_enemy_count(&self) -> usize {
        self.homing.iter().filter(|e| e.is_alive()).count()
            + self.turrets.iter().filter(|e| e.is_alive()).count()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }
}

fn update_and_prune<E: Entity>(entities: &mut Vec<E>, ctx: &mut UpdateContext<'_>) {
    entities.retain_mut(|entity| {
        if entity.is_alive() {
            entity.update(ctx);
        }
        entity.is_alive()
    });
}

fn take_first_hit<E: Entity>(entities: &mut Vec<E>, player: &Rect) -> bool {
    let Some(entity) = entities.iter_mut().find(|entity| entity.hits(player)) else {
        return false;
    };
    entity.destroy();
    entities.retain(|entity| entity.is_alive());
    true
}

fn nearest_side(position: Vec2) -> SpawnSide {
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    let distances = [
        (SpawnSide::Top, position.y),
        (SpawnSide::Right, SCREEN_WIDTH - position.x),
        (SpawnSide::Bottom, SCREEN_HEIGHT - position.y),
        (SpawnSide::Left, position.x),
    ];
    distances
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(side, _)| side)
        .unwrap_or(SpawnSide::Top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 0.25;

    fn player_box(center: Vec2) -> Rect {
        Rect::from_center(center, Vec2::splat(20.0))
    }

    #[test]
    fn test_first_warning_after_initial_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let player = Vec2::new(400.0, 300.0);

        // Interval starts at ~2.0s: nothing for 7 quarter-ticks
        for _ in 0..7 {
            enemies.update(DT, player, &tuning, &mut rng, &mut events);
            assert!(enemies.spawn_warnings().is_empty());
        }
        enemies.update(DT, player, &tuning, &mut rng, &mut events);
        assert_eq!(enemies.spawn_warnings().len(), 1);
        assert_eq!(enemies.spawn_timer(), 0.0);
        assert!(matches!(events.last(), Some(GameEvent::WarningIssued { .. })));
    }

    #[test]
    fn test_warning_becomes_enemy_after_one_second() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let player = Vec2::new(400.0, 300.0);

        for _ in 0..8 {
            enemies.update(DT, player, &tuning, &mut rng, &mut events);
        }
        assert_eq!(enemies.spawn_warnings().len(), 1);
        let kind = enemies.spawn_warnings()[0].kind();
        let spawn_at = enemies.spawn_warnings()[0].spawn_position();

        // 0.75s later: still pending
        for _ in 0..3 {
            enemies.update(DT, player, &tuning, &mut rng, &mut events);
            assert_eq!(enemies.spawn_warnings().len(), 1);
            assert_eq!(enemies.live_enemy_count(), 0);
        }

        // Exactly 1.0s: converted and removed on the same tick
        events.clear();
        enemies.update(DT, player, &tuning, &mut rng, &mut events);
        assert!(enemies.spawn_warnings().is_empty());
        assert_eq!(enemies.live_enemy_count(), 1);
        assert!(events.contains(&GameEvent::EnemySpawned {
            kind,
            position: spawn_at
        }));
        match kind {
            EnemyKind::Homing => assert_eq!(enemies.homing_enemies().len(), 1),
            EnemyKind::Turret => assert_eq!(enemies.turret_enemies().len(), 1),
        }
    }

    #[test]
    fn test_turret_warning_hands_its_side_to_the_turret() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let spawn_at = Vec2::new(810.0, 250.0);
        enemies.warnings.push(SpawnWarning::new(
            EnemyKind::Turret,
            Some(SpawnSide::Right),
            spawn_at,
            tuning.spawn.warning_secs,
        ));

        for _ in 0..4 {
            enemies.update(DT, Vec2::new(400.0, 300.0), &tuning, &mut rng, &mut events);
        }
        assert!(enemies.spawn_warnings().is_empty());
        let turret = &enemies.turret_enemies()[0];
        assert_eq!(turret.side(), SpawnSide::Right);
        assert_eq!(turret.spawn_position(), spawn_at);
        assert_eq!(turret.target_position(), Vec2::new(750.0, 250.0));
    }

    #[test]
    fn test_only_turret_warnings_carry_a_side() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let (mut homing_seen, mut turret_seen) = (0, 0);
        for _ in 0..400 {
            enemies.update(DT, Vec2::new(400.0, 300.0), &tuning, &mut rng, &mut events);
            for warning in enemies.spawn_warnings() {
                match warning.kind() {
                    EnemyKind::Homing => {
                        homing_seen += 1;
                        assert_eq!(warning.side(), None);
                    }
                    EnemyKind::Turret => {
                        turret_seen += 1;
                        assert!(warning.side().is_some());
                    }
                }
            }
        }
        assert!(homing_seen > 0 && turret_seen > 0);
    }

    #[test]
    fn test_homing_spawn_faces_screen_center() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        enemies.spawn_enemy(EnemyKind::Homing, Vec2::new(-10.0, 300.0), None, &tuning, &mut events);
        assert_eq!(enemies.homing_enemies()[0].facing(), 0.0);
    }

    #[test]
    fn test_single_overlap_resolves_one_hit() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let player = Vec2::new(400.0, 300.0);
        enemies.spawn_enemy(EnemyKind::Homing, player, None, &tuning, &mut events);
        enemies.spawn_enemy(EnemyKind::Homing, Vec2::new(100.0, 100.0), None, &tuning, &mut events);

        let hit = enemies.check_collision(&player_box(player), &tuning);
        assert_eq!(
            hit,
            Some(Hit {
                source: HitSource::Homing,
                damage: 1
            })
        );
        assert_eq!(enemies.homing_enemies().len(), 1);
        assert_eq!(enemies.check_collision(&player_box(player), &tuning), None);
    }

    #[test]
    fn test_one_hit_per_call_in_priority_order() {
        let tuning = Tuning::default();
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        let player = Vec2::new(400.0, 300.0);
        enemies.spawn_enemy(
            EnemyKind::Turret,
            player,
            Some(SpawnSide::Left),
            &tuning,
            &mut events,
        );
        enemies.spawn_enemy(EnemyKind::Homing, player, None, &tuning, &mut events);
        enemies
            .projectiles
            .push(Projectile::new(player, 0.0, &tuning.projectile));

        let order: Vec<HitSource> = std::iter::from_fn(|| {
            enemies
                .check_collision(&player_box(player), &tuning)
                .map(|hit| hit.source)
        })
        .collect();
        assert_eq!(
            order,
            vec![HitSource::Homing, HitSource::Turret, HitSource::Projectile]
        );
        assert_eq!(enemies.live_enemy_count(), 0);
        assert!(enemies.projectiles().is_empty());
    }

    #[test]
    fn test_fired_projectiles_join_the_pool() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        // Turret already at its parking point (left edge, 50px in)
        enemies.spawn_enemy(
            EnemyKind::Turret,
            Vec2::new(50.0, 300.0),
            Some(SpawnSide::Left),
            &tuning,
            &mut events,
        );
        let player = Vec2::new(400.0, 300.0);
        // One tick to arrive, then 1.5s of tracking
        for _ in 0..7 {
            enemies.update(DT, player, &tuning, &mut rng, &mut events);
        }
        assert_eq!(enemies.projectiles().len(), 1);
        // Fired toward the player (+x) and already moved one tick
        let shot = &enemies.projectiles()[0];
        assert!(shot.position().x > 50.0);
        assert!((shot.velocity().normalize() - Vec2::X).length() < 1e-3);
    }

    #[test]
    fn test_reset_clears_everything() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        let mut enemies = EnemyCoordinator::new();
        for _ in 0..40 {
            enemies.update(DT, Vec2::new(400.0, 300.0), &tuning, &mut rng, &mut events);
        }
        assert!(enemies.elapsed() > 0.0);
        enemies.reset();
        assert_eq!(enemies, EnemyCoordinator::new());
    }

    #[test]
    fn test_same_seed_same_waves() {
        let tuning = Tuning::default();
        let run = |seed: u64| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut events = Vec::new();
            let mut enemies = EnemyCoordinator::new();
            for _ in 0..200 {
                enemies.update(DT, Vec2::new(400.0, 300.0), &tuning, &mut rng, &mut events);
            }
            (enemies, events)
        };
        assert_eq!(run(42), run(42));
    }
}
