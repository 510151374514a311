//! The player ship: movement, weapon tiers, timed power-up effects

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, Homing, Laser, Projectile};
use super::collision::Aabb;
use crate::consts::*;

pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 40.0);
/// Base movement speed (units/s)
pub const PLAYER_SPEED: f32 = 250.0;
pub const SPEED_BOOST_MULTIPLIER: f32 = 1.8;
pub const RAGE_SPEED_MULTIPLIER: f32 = 1.3;

pub const MAX_WEAPON_TIER: u8 = 4;
pub const BASE_FIRE_INTERVAL: f32 = 0.25;
pub const RAPID_FIRE_INTERVAL: f32 = 0.15;
pub const BULLET_SPEED: f32 = 450.0;
pub const RAGE_BULLET_SPEED: f32 = 600.0;
/// Vertical drift of the outer bullets in the tier-3 spread
pub const SPREAD_VY: f32 = 0.3;
pub const MULTISHOT_COUNT: usize = 8;

/// Magnet pull radius and speed
pub const MAGNET_RADIUS: f32 = 200.0;
pub const MAGNET_PULL_SPEED: f32 = 150.0;
/// Barrier orb orbit speed (rad/s)
pub const BARRIER_SPIN: f32 = 3.0;

/// Timed power-up effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Shield,
    Speed,
    Laser,
    Homing,
    TimeSlow,
    Magnet,
    Multishot,
    Barrier,
    Rage,
}

impl Effect {
    pub const ALL: [Effect; 9] = [
        Effect::Shield,
        Effect::Speed,
        Effect::Laser,
        Effect::Homing,
        Effect::TimeSlow,
        Effect::Magnet,
        Effect::Multishot,
        Effect::Barrier,
        Effect::Rage,
    ];

    /// Seconds granted on pickup
    pub fn duration(&self) -> f32 {
        match self {
            Effect::Shield => 8.0,
            Effect::Speed => 7.0,
            Effect::Laser => 6.0,
            Effect::Homing => 8.0,
            Effect::TimeSlow => 10.0,
            Effect::Magnet => 12.0,
            Effect::Multishot => 6.0,
            Effect::Barrier => 15.0,
            Effect::Rage => 8.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Independent countdown per effect; zero means inactive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    timers: [f32; 9],
}

impl Effects {
    pub fn activate(&mut self, effect: Effect) {
        self.timers[effect.index()] = effect.duration();
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.timers[effect.index()] > 0.0
    }

    pub fn remaining(&self, effect: Effect) -> f32 {
        self.timers[effect.index()]
    }

    pub fn clear(&mut self, effect: Effect) {
        self.timers[effect.index()] = 0.0;
    }

    pub fn clear_all(&mut self) {
        self.timers = [0.0; 9];
    }

    /// Count every timer down; returns the effects that expired on this step
    pub fn tick(&mut self, dt: f32) -> Vec<Effect> {
        let mut expired = Vec::new();
        for effect in Effect::ALL {
            let timer = &mut self.timers[effect.index()];
            if *timer > 0.0 {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = 0.0;
                    expired.push(effect);
                }
            }
        }
        expired
    }

    pub fn active(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|e| self.is_active(*e))
    }
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub weapon_tier: u8,
    /// Seconds since the last volley
    pub shot_timer: f32,
    pub effects: Effects,
    /// Remaining invulnerability (seconds)
    pub invulnerable: f32,
    /// Orbit angle of the barrier orbs (visual only)
    pub barrier_angle: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(100.0, PLAYFIELD_HEIGHT / 2.0),
            weapon_tier: 1,
            shot_timer: 0.0,
            effects: Effects::default(),
            invulnerable: 0.0,
            barrier_angle: 0.0,
        }
    }

    /// Full reset for a new game
    pub fn reset(&mut self) {
        *self = Self::new();
        self.respawn();
    }

    /// Move back to the spawn point
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(RESPAWN_X, PLAYFIELD_HEIGHT / 2.0);
    }

    pub fn center(&self) -> Vec2 {
        self.pos + PLAYER_SIZE / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, PLAYER_SIZE)
    }

    pub fn has(&self, effect: Effect) -> bool {
        self.effects.is_active(effect)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    pub fn make_invulnerable(&mut self) {
        self.invulnerable = INVULNERABILITY_SECS;
    }

    pub fn move_speed(&self) -> f32 {
        let mut speed = PLAYER_SPEED;
        if self.has(Effect::Speed) {
            speed *= SPEED_BOOST_MULTIPLIER;
        }
        if self.has(Effect::Rage) {
            speed *= RAGE_SPEED_MULTIPLIER;
        }
        speed
    }

    pub fn fire_interval(&self) -> f32 {
        let base = if self.weapon_tier >= MAX_WEAPON_TIER {
            RAPID_FIRE_INTERVAL
        } else {
            BASE_FIRE_INTERVAL
        };
        if self.has(Effect::Rage) { base / 2.0 } else { base }
    }

    pub fn bullet_speed(&self) -> f32 {
        if self.has(Effect::Rage) {
            RAGE_BULLET_SPEED
        } else {
            BULLET_SPEED
        }
    }

    pub fn upgrade_weapon(&mut self) {
        self.weapon_tier = (self.weapon_tier + 1).min(MAX_WEAPON_TIER);
        debug_assert!((1..=MAX_WEAPON_TIER).contains(&self.weapon_tier));
    }

    /// Move, clamp to the playfield and count timers down.
    ///
    /// `movement` is a normalized direction. Returns the effects that expired.
    pub fn update(&mut self, dt: f32, movement: Vec2) -> Vec<Effect> {
        self.pos += movement * self.move_speed() * dt;
        self.pos = self.pos.clamp(
            Vec2::ZERO,
            Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) - PLAYER_SIZE,
        );

        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }

        let expired = self.effects.tick(dt);
        if self.has(Effect::Barrier) {
            self.barrier_angle = (self.barrier_angle + BARRIER_SPIN * dt) % TAU;
        }
        expired
    }

    /// Advance the fire cooldown and fire a volley when due
    pub fn try_fire(&mut self, dt: f32, shooting: bool) -> Vec<Projectile> {
        self.shot_timer += dt;
        if shooting && self.shot_timer >= self.fire_interval() {
            self.shot_timer = 0.0;
            self.volley()
        } else {
            Vec::new()
        }
    }

    /// Projectiles for one shot. Exactly one mode applies:
    /// laser, then multishot, then homing, then the weapon tier.
    pub fn volley(&self) -> Vec<Projectile> {
        let muzzle = Vec2::new(self.pos.x + PLAYER_SIZE.x, self.pos.y + PLAYER_SIZE.y / 2.0);
        let speed = self.bullet_speed();

        if self.has(Effect::Laser) {
            return vec![Projectile::Laser(Laser::from_muzzle(muzzle))];
        }

        if self.has(Effect::Multishot) {
            return (0..MULTISHOT_COUNT)
                .map(|i| {
                    let angle = TAU * i as f32 / MULTISHOT_COUNT as f32 - FRAC_PI_2;
                    Projectile::Bullet(Bullet::from_muzzle(muzzle, Vec2::from_angle(angle) * speed))
                })
                .collect();
        }

        if self.has(Effect::Homing) {
            return [0.0, -10.0]
                .into_iter()
                .map(|dy| Projectile::Homing(Homing::from_muzzle(muzzle + Vec2::new(0.0, dy), speed)))
                .collect();
        }

        let straight = |dy: f32, vy: f32| {
            Projectile::Bullet(Bullet::from_muzzle(
                muzzle + Vec2::new(0.0, dy),
                Vec2::new(speed, vy),
            ))
        };
        match self.weapon_tier {
            0 | 1 => vec![straight(0.0, 0.0)],
            2 => vec![straight(-8.0, 0.0), straight(8.0, 0.0)],
            3 => vec![
                straight(0.0, 0.0),
                straight(-12.0, -SPREAD_VY),
                straight(12.0, SPREAD_VY),
            ],
            _ => vec![
                straight(-10.0, 0.0),
                straight(-3.0, 0.0),
                straight(3.0, 0.0),
                straight(10.0, 0.0),
            ],
        }
    }
}
