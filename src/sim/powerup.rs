//! Floating power-up capsules dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::player::Effect;
use crate::consts::*;

pub const POWER_UP_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const POWER_UP_SPEED_X: f32 = -60.0;
pub const FLOAT_AMPLITUDE: f32 = 20.0;
pub const FLOAT_FREQUENCY: f32 = 4.0;
/// Seconds before an uncollected power-up expires
pub const POWER_UP_LIFETIME: f32 = 10.0;
/// Remaining lifetime below which the capsule blinks
pub const BLINK_THRESHOLD: f32 = 3.0;
/// Despawn once the capsule drifts this far past the left edge
const DESPAWN_X: f32 = -50.0;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Weapon,
    Shield,
    Speed,
    Laser,
    Homing,
    TimeSlow,
    Bomb,
    Magnet,
    Multishot,
    Barrier,
    Rage,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 12] = [
        PowerUpKind::Health,
        PowerUpKind::Weapon,
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::Laser,
        PowerUpKind::Homing,
        PowerUpKind::TimeSlow,
        PowerUpKind::Bomb,
        PowerUpKind::Magnet,
        PowerUpKind::Multishot,
        PowerUpKind::Barrier,
        PowerUpKind::Rage,
    ];

    /// Uniform pick over every kind
    pub fn random(rng: &mut Pcg32) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// The timed effect this kind grants, if any
    pub fn effect(&self) -> Option<Effect> {
        match self {
            PowerUpKind::Shield => Some(Effect::Shield),
            PowerUpKind::Speed => Some(Effect::Speed),
            PowerUpKind::Laser => Some(Effect::Laser),
            PowerUpKind::Homing => Some(Effect::Homing),
            PowerUpKind::TimeSlow => Some(Effect::TimeSlow),
            PowerUpKind::Magnet => Some(Effect::Magnet),
            PowerUpKind::Multishot => Some(Effect::Multishot),
            PowerUpKind::Barrier => Some(Effect::Barrier),
            PowerUpKind::Rage => Some(Effect::Rage),
            PowerUpKind::Health | PowerUpKind::Weapon | PowerUpKind::Bomb => None,
        }
    }

    /// Notification text shown on pickup
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Health => "+1 Life",
            PowerUpKind::Weapon => "Weapon Upgrade",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::Laser => "Laser Beam",
            PowerUpKind::Homing => "Homing Missiles",
            PowerUpKind::TimeSlow => "Slow Time",
            PowerUpKind::Bomb => "Screen Clear",
            PowerUpKind::Magnet => "Item Magnet",
            PowerUpKind::Multishot => "8-Way Shot",
            PowerUpKind::Barrier => "Rotating Barrier",
            PowerUpKind::Rage => "Rage Mode",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Health => 0xFF0066,
            PowerUpKind::Weapon => 0x00FF00,
            PowerUpKind::Shield => 0x00FFFF,
            PowerUpKind::Speed => 0xFFFF00,
            PowerUpKind::Laser => 0xFF00FF,
            PowerUpKind::Homing => 0xFF6600,
            PowerUpKind::TimeSlow => 0x9966FF,
            PowerUpKind::Bomb => 0xFF3333,
            PowerUpKind::Magnet => 0x00AAFF,
            PowerUpKind::Multishot => 0xFFAA00,
            PowerUpKind::Barrier => 0x00FFAA,
            PowerUpKind::Rage => 0xFF0000,
        }
    }
}

/// A power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Float animation clock
    pub timer: f32,
    pub lifetime: f32,
    pub active: bool,
}

impl PowerUp {
    /// Capsule centered on `center`
    pub fn new(kind: PowerUpKind, center: Vec2) -> Self {
        Self {
            kind,
            pos: center - POWER_UP_SIZE / 2.0,
            timer: 0.0,
            lifetime: POWER_UP_LIFETIME,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        self.lifetime -= dt;

        self.pos.x += POWER_UP_SPEED_X * dt;
        self.pos.y += (self.timer * FLOAT_FREQUENCY).sin() * FLOAT_AMPLITUDE * dt;
        self.pos.y = self.pos.y.clamp(0.0, PLAYFIELD_HEIGHT - POWER_UP_SIZE.y);

        if self.lifetime <= 0.0 || self.pos.x < DESPAWN_X {
            self.active = false;
        }
    }

    /// Move toward `target` by up to `step` units
    pub fn pull_toward(&mut self, target: Vec2, step: f32) {
        let delta = target - self.center();
        let dist = delta.length();
        if dist > f32::EPSILON {
            self.pos += delta / dist * step.min(dist);
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.lifetime < BLINK_THRESHOLD
    }

    pub fn center(&self) -> Vec2 {
        self.pos + POWER_UP_SIZE / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, POWER_UP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_expires_after_lifetime_without_collection() {
        let mut p = PowerUp::new(PowerUpKind::Shield, Vec2::new(1000.0, 360.0));
        let mut ticks = 0;
        while p.active {
            p.update(SIM_DT);
            ticks += 1;
            if ticks == 7 * 60 + 30 {
                assert!(p.is_blinking());
            }
        }
        // 10 s at 60 Hz, give or take float drift
        assert!((599..=601).contains(&ticks), "expired after {ticks} ticks");
    }

    #[test]
    fn test_drifts_left_and_stays_on_screen() {
        let mut p = PowerUp::new(PowerUpKind::Bomb, Vec2::new(600.0, 2.0));
        p.update(0.5);
        assert!(p.pos.x < 600.0 - POWER_UP_SIZE.x / 2.0);
        assert!(p.pos.y >= 0.0);
        assert!(!p.is_blinking());
    }

    #[test]
    fn test_despawns_off_left_edge() {
        let mut p = PowerUp::new(PowerUpKind::Rage, Vec2::new(-40.0, 300.0));
        p.update(SIM_DT);
        assert!(!p.active);
    }

    #[test]
    fn test_pull_toward_never_overshoots() {
        let mut p = PowerUp::new(PowerUpKind::Magnet, Vec2::new(100.0, 100.0));
        p.pull_toward(Vec2::new(110.0, 100.0), 50.0);
        assert_eq!(p.center(), Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_random_covers_only_known_kinds() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let kind = PowerUpKind::random(&mut rng);
            assert!(PowerUpKind::ALL.contains(&kind));
        }
        assert_eq!(
            PowerUpKind::ALL.iter().filter(|k| k.effect().is_some()).count(),
            9
        );
    }
}
