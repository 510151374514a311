//! One fixed simulation step

use glam::Vec2;

use super::autopilot;
use super::collision;
use super::enemy::HostileCtx;
use super::player::{Effect, MAGNET_PULL_SPEED, MAGNET_RADIUS};
use super::spawn;
use super::state::{GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Normalized movement direction (components in [-1, 1], length <= 1)
    pub movement: Vec2,
    /// Fire held
    pub shooting: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Does nothing unless the game is playing. Order within a tick: player,
/// projectiles, hostiles, enemy bullets, power-ups, particles, spawning,
/// collisions, pending transitions, then pruning of inactive entities.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let input = if input.idle_mode {
        autopilot::drive(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    state.scroll_offset += state.scroll_speed * dt;
    state.level_banner = (state.level_banner - dt).max(0.0);

    update_player(state, &input, dt);

    for bullet in state.bullets.iter_mut() {
        bullet.update(dt, &state.enemies);
    }
    state.bullets.retain(|b| b.is_active());

    let hostile_dt = if state.player.has(Effect::TimeSlow) {
        dt * TIME_SLOW_FACTOR
    } else {
        dt
    };

    let mut ctx = HostileCtx {
        target: state.player.center(),
        rng: &mut state.rng,
        shots: &mut state.enemy_bullets,
        events: &mut state.events,
    };
    for hostile in state.enemies.iter_mut() {
        hostile.update(hostile_dt, &mut ctx);
    }
    state.enemies.retain(|e| e.is_active());

    for bullet in state.enemy_bullets.iter_mut() {
        bullet.update(hostile_dt);
    }
    state.enemy_bullets.retain(|b| b.active);

    for power_up in state.power_ups.iter_mut() {
        power_up.update(dt);
    }
    state.power_ups.retain(|p| p.active);

    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    state.particles.retain(|p| p.is_active());

    spawn::update(state, dt);

    if let Some(timer) = state.level_complete_timer.as_mut() {
        *timer -= dt;
    }

    collision::resolve(state);

    if state.lives == 0 {
        state.enter_game_over();
    } else if state.level_complete_timer.is_some_and(|t| t <= 0.0) {
        state.enter_level_complete();
    }

    state.prune();
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    for effect in state.player.update(dt, input.movement) {
        log::debug!("{effect:?} expired");
    }

    let volley = state.player.try_fire(dt, input.shooting);
    if !volley.is_empty() {
        state.bullets.extend(volley);
        state.play(SoundEffect::Shoot);
    }

    if state.player.has(Effect::Magnet) {
        let center = state.player.center();
        for power_up in state.power_ups.iter_mut() {
            if power_up.center().distance(center) < MAGNET_RADIUS {
                power_up.pull_toward(center, MAGNET_PULL_SPEED * dt);
            }
        }
    }
}
