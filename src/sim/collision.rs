//! Axis-aligned hit tests and the per-tick collision passes
//!
//! Passes run in a fixed order and each walks its whole collection:
//! 1. player projectiles against hostiles
//! 2. the player against hostiles
//! 3. the player against enemy bullets
//! 4. the player against power-ups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::player::Effect;
use super::state::GameState;

/// Axis-aligned bounding box (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap; boxes that only touch do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.x
            && self.min.x + self.size.x > other.min.x
            && self.min.y < other.min.y + other.size.y
            && self.min.y + self.size.y > other.min.y
    }
}

/// Run every collision pass for this tick
pub fn resolve(state: &mut GameState) {
    projectiles_vs_hostiles(state);
    player_vs_hostiles(state);
    player_vs_enemy_bullets(state);
    player_vs_power_ups(state);
}

/// Each overlapping projectile applies its damage; a projectile that is
/// already in the hostile loop keeps hitting whatever else it overlaps.
fn projectiles_vs_hostiles(state: &mut GameState) {
    let mut destroyed = Vec::new();
    let mut boss_health = None;

    for bullet in state.bullets.iter_mut() {
        if !bullet.is_active() {
            continue;
        }
        let bounds = bullet.bounds();
        let damage = bullet.damage();
        for hostile in state.enemies.iter_mut() {
            if !hostile.is_active() || !bounds.intersects(&hostile.bounds()) {
                continue;
            }
            bullet.deactivate();
            if let Some(destruction) = hostile.take_damage(damage) {
                destroyed.push(destruction);
            }
            if let super::enemy::Hostile::Boss(boss) = hostile {
                boss_health = Some(boss.health_fraction());
            }
        }
    }

    if let Some(fraction) = boss_health {
        state.emit(GameEvent::BossHealth(fraction));
    }
    for destruction in destroyed {
        state.apply_destruction(destruction);
    }
}

fn player_vs_hostiles(state: &mut GameState) {
    if state.player.is_invulnerable() {
        return;
    }
    // Hitbox is fixed for the whole pass, even if the player respawns mid-way
    let player = state.player.bounds();
    for i in 0..state.enemies.len() {
        let hostile = &state.enemies[i];
        if !hostile.is_active() || !player.intersects(&hostile.bounds()) {
            continue;
        }
        if state.player.has(Effect::Shield) {
            state.player.effects.clear(Effect::Shield);
            log::debug!("Shield absorbed a ram");
        } else {
            state.lose_life();
        }
        if let Some(destruction) = state.enemies[i].destroy() {
            state.apply_destruction(destruction);
        }
    }
}

fn player_vs_enemy_bullets(state: &mut GameState) {
    if state.player.is_invulnerable() {
        return;
    }
    let player = state.player.bounds();
    for i in 0..state.enemy_bullets.len() {
        let bullet = &state.enemy_bullets[i];
        if !bullet.active || !player.intersects(&bullet.bounds()) {
            continue;
        }
        let at = bullet.center();
        state.enemy_bullets[i].active = false;
        if state.player.has(Effect::Shield) {
            state.shield_spark(at);
        } else {
            state.lose_life();
        }
    }
}

fn player_vs_power_ups(state: &mut GameState) {
    // Drops spawned by a bomb pickup wait for the next tick
    let count = state.power_ups.len();
    let player = state.player.bounds();
    for i in 0..count {
        let power_up = &state.power_ups[i];
        if !power_up.active || !player.intersects(&power_up.bounds()) {
            continue;
        }
        let (kind, center) = (power_up.kind, power_up.center());
        state.power_ups[i].active = false;
        log::debug!("Collected {kind:?}");
        state.collect_power_up(kind, center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::*;
    use crate::sim::bullet::{Bullet, EnemyBullet, Laser, Projectile};
    use crate::sim::enemy::{Boss, Enemy, EnemyType, Hostile};
    use crate::sim::player::PLAYER_SIZE;
    use crate::sim::powerup::{PowerUp, PowerUpKind};
    use crate::sim::state::GamePhase;

    fn playing() -> GameState {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.player.pos = Vec2::new(100.0, 300.0);
        state
    }

    fn enemy_on_player(state: &GameState, kind: EnemyType) -> Hostile {
        Hostile::Enemy(Enemy::new(kind, state.player.pos + Vec2::new(10.0, 5.0)))
    }

    fn bullet_at(pos: Vec2) -> Projectile {
        Projectile::Bullet(Bullet::from_muzzle(pos, Vec2::new(450.0, 0.0)))
    }

    fn bullet_on_player(state: &GameState) -> EnemyBullet {
        EnemyBullet::new(state.player.center(), Vec2::new(-150.0, 0.0))
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(a.intersects(&Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(5.0, 5.0))));
        assert!(!a.intersects(&Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0))));
        assert!(!a.intersects(&Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(5.0, 5.0))));
        assert_eq!(a.center(), Vec2::new(5.0, 5.0));
        assert_eq!(a.max(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_multiple_bullets_each_damage_then_stop_after_destroy() {
        let mut state = playing();
        let target = Enemy::new(EnemyType::Gunner, Vec2::new(600.0, 200.0));
        let inside = target.pos + Vec2::new(5.0, 20.0);
        state.enemies.push(Hostile::Enemy(target));
        // Gunner has 30 hp: two bullets kill it, the third must pass through untouched
        for _ in 0..3 {
            state.bullets.push(bullet_at(inside));
        }

        resolve(&mut state);

        assert_eq!(state.score, 200);
        assert!(!state.enemies[0].is_active());
        let spent: Vec<bool> = state.bullets.iter().map(|b| b.is_active()).collect();
        assert_eq!(spent, vec![false, false, true]);
        let explosions = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundEffect::Explosion))
            .count();
        assert_eq!(explosions, 1);
    }

    #[test]
    fn test_laser_sweeps_a_row() {
        let mut state = playing();
        let y = 400.0;
        state
            .enemies
            .push(Hostile::Enemy(Enemy::new(EnemyType::Scout, Vec2::new(500.0, y - 10.0))));
        state
            .enemies
            .push(Hostile::Enemy(Enemy::new(EnemyType::Scout, Vec2::new(900.0, y - 10.0))));
        state.bullets.push(Projectile::Laser(Laser::from_muzzle(Vec2::new(160.0, y))));

        resolve(&mut state);
        assert_eq!(state.alive_enemies(), 0);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_ram_costs_a_life_and_destroys_enemy() {
        let mut state = playing();
        let enemy = enemy_on_player(&state, EnemyType::Scout);
        state.enemies.push(enemy);

        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(!state.enemies[0].is_active());
        assert!(state.player.is_invulnerable());
        assert_eq!(state.player.pos, Vec2::new(RESPAWN_X, PLAYFIELD_HEIGHT / 2.0));
    }

    #[test]
    fn test_invulnerable_player_ignores_hostiles_and_bullets() {
        let mut state = playing();
        state.player.make_invulnerable();
        let enemy = enemy_on_player(&state, EnemyType::Scout);
        state.enemies.push(enemy);
        let bullet = bullet_on_player(&state);
        state.enemy_bullets.push(bullet);

        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.enemies[0].is_active());
        assert!(state.enemy_bullets[0].active);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let mut state = playing();
        state.player.effects.activate(Effect::Shield);
        let first = enemy_on_player(&state, EnemyType::Scout);
        let second = enemy_on_player(&state, EnemyType::Looper);
        state.enemies.push(first);
        state.enemies.push(second);

        resolve(&mut state);
        // First ram eats the shield, the second one costs a life
        assert!(!state.player.has(Effect::Shield));
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.alive_enemies(), 0);
    }

    #[test]
    fn test_shield_absorbs_enemy_bullet() {
        let mut state = playing();
        state.player.effects.activate(Effect::Shield);
        let bullet = bullet_on_player(&state);
        state.enemy_bullets.push(bullet);

        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.player.has(Effect::Shield));
        assert!(!state.enemy_bullets[0].active);
        assert!(!state.player.is_invulnerable());
    }

    #[test]
    fn test_bullet_hit_sets_invulnerability_for_rest_of_tick() {
        let mut state = playing();
        let first = bullet_on_player(&state);
        let second = bullet_on_player(&state);
        state.enemy_bullets.push(first);
        state.enemy_bullets.push(second);

        resolve(&mut state);
        // The second bullet still lands on the old hitbox but the hit is swallowed
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(state.enemy_bullets.iter().all(|b| !b.active));
    }

    #[test]
    fn test_power_up_collected_without_invulnerability_gate() {
        let mut state = playing();
        state.player.make_invulnerable();
        state.player.weapon_tier = 3;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Weapon, state.player.center()));

        resolve(&mut state);
        assert_eq!(state.player.weapon_tier, 4);
        assert_eq!(state.score, POWER_UP_SCORE);
        assert!(!state.power_ups[0].active);
        assert!(state.events.contains(&GameEvent::Sound(SoundEffect::PowerUp)));
    }

    #[test]
    fn test_boss_hits_report_health() {
        let mut state = playing();
        let boss = Boss::new(1);
        let inside = boss.pos + Vec2::new(5.0, 40.0);
        state.enemies.push(Hostile::Boss(boss));
        state.bullets.push(bullet_at(inside));

        resolve(&mut state);
        let expected = (200.0 - 15.0) / 200.0;
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::BossHealth(f) if (*f - expected).abs() < 1e-6
        )));
        assert!(state.level_complete_timer.is_none());
    }

    #[test]
    fn test_far_entities_do_not_collide() {
        let mut state = playing();
        state
            .enemies
            .push(Hostile::Enemy(Enemy::new(EnemyType::Scout, Vec2::new(1000.0, 600.0))));
        state.enemy_bullets.push(EnemyBullet::new(
            state.player.pos + Vec2::new(PLAYER_SIZE.x + 20.0, 0.0),
            Vec2::ZERO,
        ));
        state.bullets.push(bullet_at(Vec2::new(300.0, 100.0)));

        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.alive_enemies(), 1);
        assert!(state.bullets[0].is_active());
    }
}
