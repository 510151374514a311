//! Decorative particles (explosions, sparks)
//!
//! Particles never collide and never influence gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Downward acceleration (units/s²)
pub const GRAVITY: f32 = 100.0;
/// Velocity multiplier applied every update
pub const FRICTION: f32 = 0.98;
pub const RING_LIFETIME: f32 = 0.6;
pub const CORE_LIFETIME: f32 = 0.4;
/// Explosions never use fewer ring particles than this
pub const MIN_RING_PARTICLES: usize = 30;
pub const CORE_PARTICLES: usize = 10;
pub const EXPLOSION_SPEED: f32 = 150.0;

const WHITE: u32 = 0xFFFFFF;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u32, life: f32, size: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += GRAVITY * dt;
        self.vel *= FRICTION;
        self.life -= dt;
    }

    pub fn is_active(&self) -> bool {
        self.life > 0.0
    }

    /// Fade factor for the renderer (1 = fresh, 0 = gone)
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Burst of particles: an evenly spread colored ring plus a white core
pub fn spawn_explosion(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    center: Vec2,
    color: u32,
    count: usize,
) {
    let ring = count.max(MIN_RING_PARTICLES);
    for i in 0..ring {
        let angle = TAU * i as f32 / ring as f32 + rng.random_range(-0.25..0.25);
        let speed = EXPLOSION_SPEED * rng.random_range(0.5..1.0);
        let size = rng.random_range(2.0..4.0);
        particles.push(Particle::new(
            center,
            Vec2::from_angle(angle) * speed,
            color,
            RING_LIFETIME,
            size,
        ));
    }

    for _ in 0..CORE_PARTICLES {
        let angle = rng.random_range(0.0..TAU);
        let speed = EXPLOSION_SPEED * rng.random_range(0.3..0.7);
        let size = rng.random_range(2.0..4.0);
        particles.push(Particle::new(
            center,
            Vec2::from_angle(angle) * speed,
            WHITE,
            CORE_LIFETIME,
            size,
        ));
    }
}

/// Drop the oldest particles until at most `cap` remain
pub fn enforce_cap(particles: &mut Vec<Particle>, cap: usize) {
    if particles.len() > cap {
        let excess = particles.len() - cap;
        particles.drain(..excess);
    }
}
