//! Game state and core simulation types
//!
//! `GameState` is the single context every subsystem receives by `&mut`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::{EnemyBullet, Projectile};
use super::enemy::{Destruction, Hostile};
use super::event::GameEvent;
use super::particle::{self, Particle};
use super::player::{Effect, Player};
use super::powerup::{PowerUp, PowerUpKind};
use super::spawn::SpawnDirector;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Default particle budget (the medium quality preset)
pub const DEFAULT_PARTICLE_CAP: usize = 500;

/// Particles thrown by collecting a power-up
const PICKUP_PARTICLES: usize = 20;
/// Particles thrown by a screen-clearing bomb
const BOMB_PARTICLES: usize = 100;
/// Particles thrown when the shield eats an enemy bullet
const SPARK_PARTICLES: usize = 5;
const SHIELD_COLOR: u32 = 0x00FFFF;
const NOTIFICATION_COLOR: u32 = 0xFFFFFF;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Ticks suspended by the player
    Paused,
    /// Run ended, waiting for restart or menu
    GameOver,
    /// Boss beaten, waiting for the next-level command
    LevelComplete,
}

impl GamePhase {
    /// Phases in which the scheduler drains time without ticking
    pub fn is_suspended(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// 1-based level
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub scroll_speed: f32,
    /// Parallax offset for the renderer
    pub scroll_offset: f32,
    /// Remaining "LEVEL n" banner time
    pub level_banner: f32,
    pub player: Player,
    pub bullets: Vec<Projectile>,
    pub enemies: Vec<Hostile>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particle_cap: usize,
    pub director: SpawnDirector,
    /// Countdown from boss destruction to the level-complete transition
    pub level_complete_timer: Option<f32>,
    /// Outbound notifications since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            time_ticks: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            scroll_offset: 0.0,
            level_banner: 0.0,
            player: Player::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            particle_cap: DEFAULT_PARTICLE_CAP,
            director: SpawnDirector::default(),
            level_complete_timer: None,
            events: Vec::new(),
        }
    }

    /// Take every event buffered since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.emit(GameEvent::Sound(sound));
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    /// Live hostiles (regular enemies and the boss)
    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    pub fn boss(&self) -> Option<&super::enemy::Boss> {
        self.enemies.iter().find_map(|e| match e {
            Hostile::Boss(b) if b.active => Some(b),
            _ => None,
        })
    }

    /// Take one hit. No-op while invulnerable.
    pub fn lose_life(&mut self) {
        if self.player.is_invulnerable() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.player.make_invulnerable();
        self.play(SoundEffect::PlayerHit);
        self.emit(GameEvent::LivesChanged(self.lives));
        log::debug!("Player hit, {} lives left", self.lives);

        if self.lives > 0 {
            self.player.respawn();
        }
    }

    pub fn spawn_explosion(&mut self, center: Vec2, color: u32, count: usize) {
        if self.particle_cap == 0 {
            return;
        }
        particle::spawn_explosion(&mut self.particles, &mut self.rng, center, color, count);
        particle::enforce_cap(&mut self.particles, self.particle_cap);
    }

    /// Side effects of a hostile being destroyed
    pub fn apply_destruction(&mut self, destruction: Destruction) {
        self.add_score(destruction.score);
        self.spawn_explosion(destruction.center, destruction.color, destruction.particles);
        self.play(SoundEffect::Explosion);

        if destruction.boss {
            log::info!("Boss destroyed on level {}", self.level);
            self.emit(GameEvent::BossHealthHidden);
            if self.level_complete_timer.is_none() {
                self.level_complete_timer = Some(LEVEL_COMPLETE_DELAY_SECS);
            }
        } else if self.rng.random::<f32>() < destruction.drop_chance {
            let kind = PowerUpKind::random(&mut self.rng);
            self.power_ups.push(PowerUp::new(kind, destruction.center));
        }
    }

    /// Apply a collected power-up
    pub fn collect_power_up(&mut self, kind: PowerUpKind, center: Vec2) {
        self.play(SoundEffect::PowerUp);
        self.spawn_explosion(center, kind.color(), PICKUP_PARTICLES);

        match kind {
            PowerUpKind::Health => {
                if self.lives < MAX_LIVES {
                    self.lives += 1;
                    self.emit(GameEvent::LivesChanged(self.lives));
                }
            }
            PowerUpKind::Weapon => self.player.upgrade_weapon(),
            PowerUpKind::Bomb => self.detonate_bomb(),
            other => {
                if let Some(effect) = other.effect() {
                    self.player.effects.activate(effect);
                }
            }
        }

        self.add_score(POWER_UP_SCORE);
        self.emit(GameEvent::Notification {
            text: kind.label().to_string(),
            pos: center,
            color: kind.color(),
        });
    }

    /// Destroy every live hostile and clear enemy fire
    pub fn detonate_bomb(&mut self) {
        for i in 0..self.enemies.len() {
            if let Some(destruction) = self.enemies[i].destroy() {
                self.apply_destruction(destruction);
            }
        }
        self.enemy_bullets.clear();
        let center = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
        self.spawn_explosion(center, PowerUpKind::Bomb.color(), BOMB_PARTICLES);
    }

    /// The shield swallowed an enemy bullet
    pub fn shield_spark(&mut self, at: Vec2) {
        self.player.effects.clear(Effect::Shield);
        self.spawn_explosion(at, SHIELD_COLOR, SPARK_PARTICLES);
    }

    /// Floating text with the default color
    pub fn notify(&mut self, text: impl Into<String>, pos: Vec2) {
        self.emit(GameEvent::Notification {
            text: text.into(),
            pos,
            color: NOTIFICATION_COLOR,
        });
    }

    /// Drop every inactive entity
    pub fn prune(&mut self) {
        self.bullets.retain(|b| b.is_active());
        self.enemies.retain(|e| e.is_active());
        self.enemy_bullets.retain(|b| b.active);
        self.power_ups.retain(|p| p.active);
        self.particles.retain(|p| p.is_active());
    }

    /// Remove every transient entity (bullets, hostiles, drops)
    pub fn clear_entities(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
    }
}
