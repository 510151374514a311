//! Projectiles: the player's bullet family and enemy bullets
//!
//! All positions are top-left corners; `bounds()` is the hitbox.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::enemy::Hostile;
use crate::consts::*;
use crate::normalize_angle;

pub const BULLET_SIZE: Vec2 = Vec2::new(24.0, 8.0);
pub const BULLET_DAMAGE: i32 = 15;

pub const LASER_SIZE: Vec2 = Vec2::new(PLAYFIELD_WIDTH, 16.0);
pub const LASER_DAMAGE: i32 = 25;
pub const LASER_LIFETIME: f32 = 0.15;

pub const HOMING_SIZE: Vec2 = Vec2::new(20.0, 20.0);
pub const HOMING_DAMAGE: i32 = 20;
/// Max steering rate (rad/s)
pub const HOMING_TURN_RATE: f32 = 5.0;

pub const ENEMY_BULLET_SIZE: Vec2 = Vec2::new(10.0, 10.0);
pub const ENEMY_BULLET_DAMAGE: i32 = 10;
/// Aimed shot speed for enemies and the boss
pub const ENEMY_BULLET_SPEED: f32 = 150.0;

/// How far outside the playfield a projectile may drift before it is dropped
const OFFSCREEN_MARGIN: f32 = 20.0;

fn offscreen(pos: Vec2, size: Vec2) -> bool {
    pos.x > PLAYFIELD_WIDTH + OFFSCREEN_MARGIN
        || pos.x + size.x < -OFFSCREEN_MARGIN
        || pos.y > PLAYFIELD_HEIGHT + OFFSCREEN_MARGIN
        || pos.y + size.y < -OFFSCREEN_MARGIN
}

/// Straight-flying player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Bullet {
    /// Bullet whose left edge sits at `muzzle`, vertically centered on it
    pub fn from_muzzle(muzzle: Vec2, vel: Vec2) -> Self {
        Self {
            pos: muzzle - Vec2::new(0.0, BULLET_SIZE.y / 2.0),
            vel,
            active: true,
        }
    }
}

/// Screen-wide beam that lingers briefly in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    pub lifetime: f32,
    pub active: bool,
}

impl Laser {
    pub fn from_muzzle(muzzle: Vec2) -> Self {
        Self {
            pos: muzzle - Vec2::new(0.0, LASER_SIZE.y / 2.0),
            lifetime: LASER_LIFETIME,
            active: true,
        }
    }
}

/// Missile that steers toward the nearest live hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Homing {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Homing {
    pub fn from_muzzle(muzzle: Vec2, speed: f32) -> Self {
        Self {
            pos: muzzle - HOMING_SIZE / 2.0,
            vel: Vec2::new(speed, 0.0),
            active: true,
        }
    }

    fn center(&self) -> Vec2 {
        self.pos + HOMING_SIZE / 2.0
    }

    /// Rotate velocity toward `target` by at most `HOMING_TURN_RATE * dt`
    fn steer(&mut self, target: Vec2, dt: f32) {
        let to_target = target - self.center();
        if to_target.length_squared() <= f32::EPSILON {
            return;
        }
        let speed = self.vel.length();
        let current = self.vel.y.atan2(self.vel.x);
        let desired = to_target.y.atan2(to_target.x);
        let max_turn = HOMING_TURN_RATE * dt;
        let turn = normalize_angle(desired - current).clamp(-max_turn, max_turn);
        self.vel = Vec2::from_angle(current + turn) * speed;
    }
}

/// The player's projectile family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Projectile {
    Bullet(Bullet),
    Laser(Laser),
    Homing(Homing),
}

impl Projectile {
    pub fn update(&mut self, dt: f32, hostiles: &[Hostile]) {
        match self {
            Projectile::Bullet(b) => {
                b.pos += b.vel * dt;
                if offscreen(b.pos, BULLET_SIZE) {
                    b.active = false;
                }
            }
            Projectile::Laser(l) => {
                l.lifetime -= dt;
                if l.lifetime <= 0.0 {
                    l.active = false;
                }
            }
            Projectile::Homing(h) => {
                if let Some(target) = nearest_hostile(h.center(), hostiles) {
                    h.steer(target, dt);
                }
                h.pos += h.vel * dt;
                if offscreen(h.pos, HOMING_SIZE) {
                    h.active = false;
                }
            }
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Projectile::Bullet(b) => Aabb::new(b.pos, BULLET_SIZE),
            Projectile::Laser(l) => Aabb::new(l.pos, LASER_SIZE),
            Projectile::Homing(h) => Aabb::new(h.pos, HOMING_SIZE),
        }
    }

    pub fn damage(&self) -> i32 {
        match self {
            Projectile::Bullet(_) => BULLET_DAMAGE,
            Projectile::Laser(_) => LASER_DAMAGE,
            Projectile::Homing(_) => HOMING_DAMAGE,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Projectile::Bullet(b) => b.active,
            Projectile::Laser(l) => l.active,
            Projectile::Homing(h) => h.active,
        }
    }

    pub fn deactivate(&mut self) {
        match self {
            Projectile::Bullet(b) => b.active = false,
            Projectile::Laser(l) => l.active = false,
            Projectile::Homing(h) => h.active = false,
        }
    }
}

/// Center of the closest active hostile, by Euclidean distance
pub fn nearest_hostile(from: Vec2, hostiles: &[Hostile]) -> Option<Vec2> {
    hostiles
        .iter()
        .filter(|h| h.is_active())
        .map(|h| h.center())
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Projectile fired by enemies and the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl EnemyBullet {
    /// Bullet centered on `origin` flying with `vel`
    pub fn new(origin: Vec2, vel: Vec2) -> Self {
        Self {
            pos: origin - ENEMY_BULLET_SIZE / 2.0,
            vel,
            active: true,
        }
    }

    /// Bullet from `origin` heading at `target` with `ENEMY_BULLET_SPEED`
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        let dir = (target - origin).normalize_or_zero();
        let dir = if dir == Vec2::ZERO { Vec2::NEG_X } else { dir };
        Self::new(origin, dir * ENEMY_BULLET_SPEED)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if offscreen(self.pos, ENEMY_BULLET_SIZE) {
            self.active = false;
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + ENEMY_BULLET_SIZE / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_BULLET_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyType};

    #[test]
    fn test_bullet_leaves_playfield() {
        let mut p = Projectile::Bullet(Bullet::from_muzzle(
            Vec2::new(PLAYFIELD_WIDTH - 5.0, 100.0),
            Vec2::new(450.0, 0.0),
        ));
        p.update(0.1, &[]);
        assert!(!p.is_active());
    }

    #[test]
    fn test_laser_expires_after_lifetime() {
        let mut p = Projectile::Laser(Laser::from_muzzle(Vec2::new(110.0, 300.0)));
        assert_eq!(p.bounds().size, LASER_SIZE);
        for _ in 0..8 {
            p.update(SIM_DT, &[]);
        }
        assert!(p.is_active());
        for _ in 0..2 {
            p.update(SIM_DT, &[]);
        }
        assert!(!p.is_active());
    }

    #[test]
    fn test_homing_turns_toward_nearest_enemy() {
        let above = Enemy::new(EnemyType::Scout, Vec2::new(400.0, 100.0));
        let far = Enemy::new(EnemyType::Scout, Vec2::new(1200.0, 600.0));
        let hostiles = vec![Hostile::Enemy(far), Hostile::Enemy(above)];

        let mut missile = Homing::from_muzzle(Vec2::new(300.0, 400.0), 450.0);
        let mut p = Projectile::Homing(missile.clone());
        p.update(SIM_DT, &hostiles);
        if let Projectile::Homing(h) = &p {
            // Turned upward, but never more than the turn rate allows
            assert!(h.vel.y < 0.0);
            let turned = h.vel.y.atan2(h.vel.x).abs();
            assert!(turned <= HOMING_TURN_RATE * SIM_DT + 1e-4);
            assert!((h.vel.length() - 450.0).abs() < 1e-2);
        }

        // Without targets it flies straight
        missile.pos = Vec2::new(300.0, 400.0);
        let mut p = Projectile::Homing(missile);
        p.update(SIM_DT, &[]);
        if let Projectile::Homing(h) = &p {
            assert_eq!(h.vel, Vec2::new(450.0, 0.0));
        }
    }

    #[test]
    fn test_nearest_hostile_skips_inactive() {
        let mut close = Enemy::new(EnemyType::Scout, Vec2::new(10.0, 10.0));
        close.active = false;
        let far = Enemy::new(EnemyType::Scout, Vec2::new(500.0, 500.0));
        let hostiles = vec![Hostile::Enemy(close), Hostile::Enemy(far.clone())];
        let target = nearest_hostile(Vec2::ZERO, &hostiles);
        assert_eq!(target, Some(far.center()));
    }

    #[test]
    fn test_enemy_bullet_aimed_speed() {
        let b = EnemyBullet::aimed(Vec2::new(500.0, 300.0), Vec2::new(100.0, 0.0));
        assert!((b.vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-3);
        assert!(b.vel.x < 0.0 && b.vel.y < 0.0);
        assert_eq!(b.center(), Vec2::new(500.0, 300.0));
    }
}
