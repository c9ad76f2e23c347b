//! Fixed timestep simulation tick
//!
//! Core game loop step: clock, then player, then enemies, then collision.

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round
    pub restart: bool,
    /// Leave the game loop
    pub quit: bool,
}

/// Whether the outer loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Quit,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickFlow {
    state.events.clear();

    if input.quit {
        return TickFlow::Quit;
    }

    if input.restart {
        let from = state.phase();
        state.restart();
        if from != GamePhase::Playing {
            phase_changed(state, from, GamePhase::Playing);
        }
    }

    if input.pause {
        if let Some((from, to)) = state.clock.toggle_pause() {
            phase_changed(state, from, to);
        }
    }

    if let Some((from, to)) = state.clock.update(dt) {
        phase_changed(state, from, to);
    }

    // Don't tick if paused or finished
    if !state.clock.is_active() {
        return TickFlow::Continue;
    }

    state.time_ticks += 1;

    state.player.update(input, dt, &state.tuning.player);

    state.enemies.update(
        dt,
        state.player.position,
        &state.tuning,
        &mut state.rng,
        &mut state.events,
    );

    let player_bounds = state.player.bounds();
    if let Some(hit) = state.enemies.check_collision(&player_bounds, &state.tuning) {
        state.player.take_damage(hit.damage);
        log::debug!(
            "Player hit by {:?} for {} ({} left)",
            hit.source,
            hit.damage,
            state.player.health
        );
        state.events.push(GameEvent::PlayerDamaged {
            source: hit.source,
            amount: hit.damage,
            health: state.player.health,
        });
        if state.player.is_dead() && state.clock.set_game_over() {
            phase_changed(state, GamePhase::Playing, GamePhase::GameOver);
        }
    }

    TickFlow::Continue
}

fn phase_changed(state: &mut GameState, from: GamePhase, to: GamePhase) {
    log::info!(
        "Phase {:?} -> {:?} at tick {} ({:.1}s left)",
        from,
        to,
        state.time_ticks,
        state.clock.time_remaining()
    );
    state.events.push(GameEvent::PhaseChanged { from, to });
}
