//! Hostiles: the six regular enemy templates and the level boss
//!
//! Both live in the same collection as [`Hostile`] so collision and
//! spawning can treat them uniformly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::EnemyBullet;
use super::collision::Aabb;
use super::event::GameEvent;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Hostiles are dropped once their left edge passes this x
const DESPAWN_X: f32 = -50.0;

/// Enemy template tag. Spawn patterns refer to these by letter (A..F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    /// A: straight flyer
    Scout,
    /// B: sine zig-zag
    Weaver,
    /// C: slow shooter
    Gunner,
    /// D: kamikaze that chases the player
    Diver,
    /// E: cosine looper
    Looper,
    /// F: heavy shooter, generous drop chance
    Brute,
}

/// How a template moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    Straight,
    Sine { amplitude: f32, frequency: f32 },
    Cosine { amplitude: f32, frequency: f32 },
    Pursuit,
}

/// Fixed stat template for an enemy type
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub size: Vec2,
    pub hp: i32,
    /// Horizontal speed (pursuit speed for the diver)
    pub speed: f32,
    pub score: u64,
    pub movement: Movement,
    /// Seconds between shots, if the type shoots
    pub shoot_interval: Option<f32>,
    pub color: u32,
}

impl EnemyType {
    pub const ALL: [EnemyType; 6] = [
        EnemyType::Scout,
        EnemyType::Weaver,
        EnemyType::Gunner,
        EnemyType::Diver,
        EnemyType::Looper,
        EnemyType::Brute,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(EnemyType::Scout),
            'B' => Some(EnemyType::Weaver),
            'C' => Some(EnemyType::Gunner),
            'D' => Some(EnemyType::Diver),
            'E' => Some(EnemyType::Looper),
            'F' => Some(EnemyType::Brute),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            EnemyType::Scout => 'A',
            EnemyType::Weaver => 'B',
            EnemyType::Gunner => 'C',
            EnemyType::Diver => 'D',
            EnemyType::Looper => 'E',
            EnemyType::Brute => 'F',
        }
    }

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyType::Scout => EnemyStats {
                size: Vec2::new(40.0, 30.0),
                hp: 10,
                speed: -100.0,
                score: 100,
                movement: Movement::Straight,
                shoot_interval: None,
                color: 0xFF0000,
            },
            EnemyType::Weaver => EnemyStats {
                size: Vec2::new(45.0, 35.0),
                hp: 20,
                speed: -80.0,
                score: 150,
                movement: Movement::Sine {
                    amplitude: 80.0,
                    frequency: 2.0,
                },
                shoot_interval: None,
                color: 0xFF6600,
            },
            EnemyType::Gunner => EnemyStats {
                size: Vec2::new(50.0, 40.0),
                hp: 30,
                speed: -60.0,
                score: 200,
                movement: Movement::Straight,
                shoot_interval: Some(2.5),
                color: 0xFFFF00,
            },
            EnemyType::Diver => EnemyStats {
                size: Vec2::new(35.0, 35.0),
                hp: 15,
                speed: 120.0,
                score: 120,
                movement: Movement::Pursuit,
                shoot_interval: None,
                color: 0xFF00FF,
            },
            EnemyType::Looper => EnemyStats {
                size: Vec2::new(45.0, 45.0),
                hp: 25,
                speed: -70.0,
                score: 180,
                movement: Movement::Cosine {
                    amplitude: 60.0,
                    frequency: 3.0,
                },
                shoot_interval: None,
                color: 0x00FFFF,
            },
            EnemyType::Brute => EnemyStats {
                size: Vec2::new(75.0, 60.0),
                hp: 80,
                speed: -40.0,
                score: 500,
                movement: Movement::Straight,
                shoot_interval: Some(3.0),
                color: 0x8800FF,
            },
        }
    }

    /// Chance that destroying this type drops a power-up
    pub fn drop_chance(&self) -> f32 {
        match self {
            EnemyType::Brute => 0.7,
            _ => 0.15,
        }
    }
}

/// Shared mutable context handed to hostile updates
pub struct HostileCtx<'a> {
    /// Center of the player ship
    pub target: Vec2,
    pub rng: &'a mut Pcg32,
    pub shots: &'a mut Vec<EnemyBullet>,
    pub events: &'a mut Vec<GameEvent>,
}

impl HostileCtx<'_> {
    fn fire(&mut self, bullet: EnemyBullet) {
        self.shots.push(bullet);
    }

    fn cue(&mut self, sound: SoundEffect) {
        self.events.push(GameEvent::Sound(sound));
    }
}

/// What a destroyed hostile leaves behind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destruction {
    pub center: Vec2,
    pub score: u64,
    pub color: u32,
    pub particles: usize,
    pub drop_chance: f32,
    pub boss: bool,
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyType,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: i32,
    /// Movement pattern clock
    pub timer: f32,
    pub shoot_cooldown: f32,
    pub active: bool,
}

impl Enemy {
    pub fn new(kind: EnemyType, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            vel: Vec2::new(stats.speed, 0.0),
            hp: stats.hp,
            timer: 0.0,
            shoot_cooldown: 0.0,
            active: true,
        }
    }

    /// Enemy entering from the right edge, `x_offset` further out
    pub fn spawn(kind: EnemyType, x_offset: f32, rng: &mut Pcg32) -> Self {
        let y = rng.random_range(20.0..PLAYFIELD_HEIGHT - 60.0);
        Self::new(kind, Vec2::new(PLAYFIELD_WIDTH + x_offset, y))
    }

    pub fn size(&self) -> Vec2 {
        self.kind.stats().size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn update(&mut self, dt: f32, ctx: &mut HostileCtx<'_>) {
        let stats = self.kind.stats();
        self.timer += dt;
        self.shoot_cooldown -= dt;

        match stats.movement {
            Movement::Straight => {
                self.pos.x += self.vel.x * dt;
            }
            Movement::Sine {
                amplitude,
                frequency,
            } => {
                self.pos.x += self.vel.x * dt;
                self.pos.y += (self.timer * frequency).sin() * amplitude * dt;
            }
            Movement::Cosine {
                amplitude,
                frequency,
            } => {
                self.pos.x += self.vel.x * dt;
                self.pos.y += (self.timer * frequency).cos() * amplitude * dt;
            }
            Movement::Pursuit => {
                let dir = (ctx.target - self.center()).normalize_or_zero();
                if dir != Vec2::ZERO {
                    self.vel = dir * stats.speed;
                }
                self.pos += self.vel * dt;
            }
        }

        self.pos.y = self.pos.y.clamp(0.0, PLAYFIELD_HEIGHT - stats.size.y);

        if let Some(interval) = stats.shoot_interval
            && self.shoot_cooldown <= 0.0
        {
            let muzzle = Vec2::new(self.pos.x, self.pos.y + stats.size.y / 2.0);
            ctx.fire(EnemyBullet::aimed(muzzle, ctx.target));
            ctx.cue(SoundEffect::EnemyShoot);
            self.shoot_cooldown = interval;
        }

        if self.pos.x < DESPAWN_X {
            self.active = false;
        }
    }
}

pub const BOSS_SIZE: Vec2 = Vec2::new(80.0, 80.0);
pub const BOSS_BASE_HP: i32 = 200;
pub const BOSS_HP_PER_LEVEL: i32 = 100;
pub const BOSS_SCORE_PER_LEVEL: u64 = 5000;
pub const BOSS_SPEED_Y: f32 = 80.0;
/// Health fractions below which phase 2 and phase 3 begin
pub const PHASE_2_THRESHOLD: f32 = 0.66;
pub const PHASE_3_THRESHOLD: f32 = 0.33;
pub const BOSS_RADIAL_SHOTS: usize = 8;
pub const BOSS_RADIAL_SPEED: f32 = 120.0;
/// Per-tick chance that a phase-3 boss picks a new height
const RETARGET_CHANCE: f64 = 0.02;
const BOSS_COLORS: [u32; 5] = [0xFF0000, 0xFF6600, 0xFFAA00, 0x00FF00, 0x00FFFF];

/// The end-of-level boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub level: u32,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    /// 1, 2 or 3; never decreases
    pub phase: u8,
    /// Movement pattern clock
    pub timer: f32,
    /// Counts down to the next attack
    pub attack_timer: f32,
    pub target_y: f32,
    pub active: bool,
}

impl Boss {
    pub fn new(level: u32) -> Self {
        let level = level.max(1);
        let max_hp = BOSS_BASE_HP + (level as i32 - 1) * BOSS_HP_PER_LEVEL;
        let y = PLAYFIELD_HEIGHT / 2.0 - 40.0;
        Self {
            level,
            pos: Vec2::new(PLAYFIELD_WIDTH - 100.0, y),
            hp: max_hp,
            max_hp,
            phase: 1,
            timer: 0.0,
            attack_timer: 0.0,
            target_y: y,
            active: true,
        }
    }

    pub fn score(&self) -> u64 {
        BOSS_SCORE_PER_LEVEL * self.level as u64
    }

    pub fn color(&self) -> u32 {
        BOSS_COLORS[(self.level as usize - 1) % BOSS_COLORS.len()]
    }

    pub fn center(&self) -> Vec2 {
        self.pos + BOSS_SIZE / 2.0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Seconds between attacks in the current phase
    pub fn attack_cooldown(&self) -> f32 {
        match self.phase {
            1 => 2.0,
            2 => 1.5,
            _ => 1.0,
        }
    }

    /// Step to the next phase if health crossed its threshold (one step per call)
    fn advance_phase(&mut self) {
        let health = self.health_fraction();
        let next = match self.phase {
            1 if health < PHASE_2_THRESHOLD => 2,
            2 if health < PHASE_3_THRESHOLD => 3,
            current => current,
        };
        if next != self.phase {
            log::debug!("Boss enters phase {next}");
            self.phase = next;
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut HostileCtx<'_>) {
        self.advance_phase();
        self.timer += dt;

        let mid = PLAYFIELD_HEIGHT / 2.0;
        match self.phase {
            1 => self.target_y = mid + self.timer.sin() * 100.0,
            2 => self.target_y = mid + (self.timer * 2.0).sin() * 120.0,
            _ => {
                if ctx.rng.random_bool(RETARGET_CHANCE) {
                    self.target_y = ctx.rng.random_range(0.0..PLAYFIELD_HEIGHT - BOSS_SIZE.y);
                }
            }
        }

        let dy = self.target_y - self.pos.y;
        if dy.abs() > 1.0 {
            self.pos.y += dy.signum() * BOSS_SPEED_Y * dt;
        }
        self.pos.y = self.pos.y.clamp(0.0, PLAYFIELD_HEIGHT - BOSS_SIZE.y);

        self.attack_timer -= dt;
        if self.attack_timer <= 0.0 {
            self.attack(ctx);
            self.attack_timer = self.attack_cooldown();
        }
    }

    fn attack(&self, ctx: &mut HostileCtx<'_>) {
        let center = self.center();
        match self.phase {
            1 => ctx.fire(EnemyBullet::aimed(center, ctx.target)),
            2 => {
                for dy in [-20.0, 0.0, 20.0] {
                    let origin = center + Vec2::new(0.0, dy);
                    ctx.fire(EnemyBullet::aimed(origin, ctx.target));
                }
            }
            _ => {
                for i in 0..BOSS_RADIAL_SHOTS {
                    let angle = std::f32::consts::TAU * i as f32 / BOSS_RADIAL_SHOTS as f32;
                    ctx.fire(EnemyBullet::new(
                        center,
                        Vec2::from_angle(angle) * BOSS_RADIAL_SPEED,
                    ));
                }
            }
        }
        ctx.cue(SoundEffect::EnemyShoot);
    }
}

/// Anything the player can shoot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Hostile {
    Enemy(Enemy),
    Boss(Boss),
}

impl Hostile {
    pub fn update(&mut self, dt: f32, ctx: &mut HostileCtx<'_>) {
        match self {
            Hostile::Enemy(e) => e.update(dt, ctx),
            Hostile::Boss(b) => b.update(dt, ctx),
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Hostile::Enemy(e) => Aabb::new(e.pos, e.size()),
            Hostile::Boss(b) => Aabb::new(b.pos, BOSS_SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Hostile::Enemy(e) => e.center(),
            Hostile::Boss(b) => b.center(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Hostile::Enemy(e) => e.active,
            Hostile::Boss(b) => b.active,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Hostile::Boss(_))
    }

    pub fn hp(&self) -> i32 {
        match self {
            Hostile::Enemy(e) => e.hp,
            Hostile::Boss(b) => b.hp,
        }
    }

    /// Apply damage; destroys the hostile once hp reaches zero
    pub fn take_damage(&mut self, damage: i32) -> Option<Destruction> {
        debug_assert!(damage > 0, "non-positive damage {damage}");
        if !self.is_active() {
            return None;
        }
        let hp = match self {
            Hostile::Enemy(e) => &mut e.hp,
            Hostile::Boss(b) => &mut b.hp,
        };
        *hp -= damage;
        if *hp <= 0 { self.destroy() } else { None }
    }

    /// Deactivate and report the destruction. Only the first call returns `Some`.
    pub fn destroy(&mut self) -> Option<Destruction> {
        match self {
            Hostile::Enemy(e) if e.active => {
                e.active = false;
                let stats = e.kind.stats();
                Some(Destruction {
                    center: e.center(),
                    score: stats.score,
                    color: stats.color,
                    particles: 10,
                    drop_chance: e.kind.drop_chance(),
                    boss: false,
                })
            }
            Hostile::Boss(b) if b.active => {
                b.active = false;
                Some(Destruction {
                    center: b.center(),
                    score: b.score(),
                    color: b.color(),
                    particles: 40,
                    drop_chance: 0.0,
                    boss: true,
                })
            }
            _ => None,
        }
    }
}
