//! Spawn director: timed waves, trickle spawns and the level boss
//!
//! Each level runs five waves, one every `WAVE_INTERVAL_SECS`. A rising wave
//! index schedules a staggered burst; a trickle keeps enemies coming between
//! waves; the boss appears once the last wave is cleared.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Boss, Enemy, EnemyType, Hostile};
use super::event::GameEvent;
use super::state::GameState;
use crate::audio::SoundEffect;

pub const WAVE_INTERVAL_SECS: f32 = 15.0;
pub const WAVES_PER_LEVEL: u32 = 5;
/// Delay between consecutive enemies of one burst
pub const BURST_SPACING_SECS: f32 = 0.4;
/// Extra x offset per burst member
pub const BURST_X_STEP: f32 = 50.0;
pub const TRICKLE_BASE_SECS: f32 = 2.5;

/// Per-level spawn patterns. Levels past the table reuse the last entry.
const PATTERNS: [&str; 5] = ["AABAA", "BACBA", "CBDCB", "DCEDC", "EDFED"];

/// A burst member waiting for its delay to elapse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSpawn {
    pub delay: f32,
    pub kind: EnemyType,
    pub x_offset: f32,
}

/// Per-level spawning state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Seconds since the level started
    pub elapsed: f32,
    /// Current wave index (0..=5)
    pub wave: u32,
    /// Countdown to the next trickle spawn
    pub spawn_timer: f32,
    pub boss_spawned: bool,
    pub pending: Vec<PendingSpawn>,
}

impl SpawnDirector {
    /// Re-arm for a fresh level
    pub fn start_level(&mut self) {
        *self = Self::default();
    }
}

/// Wave index for the time spent in a level
pub fn wave_index(elapsed: f32) -> u32 {
    ((elapsed.max(0.0) / WAVE_INTERVAL_SECS).floor() as u32).min(WAVES_PER_LEVEL)
}

/// Enemies per wave burst
pub fn burst_size(level: u32) -> u32 {
    3 + level / 2
}

/// Seconds between trickle spawns; shrinks with level down to half
pub fn trickle_interval(level: u32) -> f32 {
    let scale = 1.0 - level.saturating_sub(1) as f32 * 0.1;
    TRICKLE_BASE_SECS * scale.max(0.5)
}

/// The five enemy types a level draws from
pub fn pattern(level: u32) -> Vec<EnemyType> {
    let index = (level.max(1) as usize - 1).min(PATTERNS.len() - 1);
    PATTERNS[index]
        .chars()
        .filter_map(EnemyType::from_symbol)
        .collect()
}

/// The boss appears once the final wave is reached and the field is clear
pub fn boss_due(wave: u32, alive_enemies: usize, boss_spawned: bool) -> bool {
    wave >= WAVES_PER_LEVEL && alive_enemies == 0 && !boss_spawned
}

/// Advance the director by one tick, spawning into `state`
pub fn update(state: &mut GameState, dt: f32) {
    let level = state.level;
    let kinds = pattern(level);
    let alive = state.alive_enemies();
    let director = &mut state.director;

    director.elapsed += dt;
    director.spawn_timer -= dt;

    let wave = wave_index(director.elapsed);
    if wave > director.wave {
        director.wave = wave;
        let count = burst_size(level);
        log::debug!("Level {level} wave {wave}: burst of {count}");
        for i in 0..count {
            let kind = kinds[state.rng.random_range(0..kinds.len())];
            director.pending.push(PendingSpawn {
                delay: i as f32 * BURST_SPACING_SECS,
                kind,
                x_offset: i as f32 * BURST_X_STEP,
            });
        }
    }

    let spawn_boss = boss_due(director.wave, alive, director.boss_spawned);
    if spawn_boss {
        director.boss_spawned = true;
    }

    let mut due = Vec::new();
    director.pending.retain_mut(|p| {
        p.delay -= dt;
        if p.delay <= 0.0 {
            due.push((p.kind, p.x_offset));
            false
        } else {
            true
        }
    });

    if director.wave < WAVES_PER_LEVEL && director.spawn_timer <= 0.0 {
        let kind = kinds[state.rng.random_range(0..kinds.len())];
        due.push((kind, 0.0));
        director.spawn_timer = trickle_interval(level);
    }

    for (kind, x_offset) in due {
        let enemy = Enemy::spawn(kind, x_offset, &mut state.rng);
        state.enemies.push(Hostile::Enemy(enemy));
    }

    if spawn_boss {
        spawn_level_boss(state);
    }
}

fn spawn_level_boss(state: &mut GameState) {
    let boss = Boss::new(state.level);
    log::info!("Boss spawned on level {} with {} hp", state.level, boss.max_hp);
    let banner_pos = Vec2::new(boss.pos.x - 200.0, boss.pos.y);
    state.enemies.push(Hostile::Boss(boss));
    state.play(SoundEffect::BossAppear);
    state.emit(GameEvent::BossHealth(1.0));
    state.notify("WARNING: BOSS", banner_pos);
}
