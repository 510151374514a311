//! Idle/demo mode: a simple pilot that plays the game

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Preferred cruising x (left edge of the ship)
const CRUISE_X: f32 = 150.0;
/// Enemy bullets closer than this are dodged
const DANGER_RADIUS: f32 = 120.0;
/// Ignore small offsets so the ship does not jitter
const DEADZONE: f32 = 4.0;

/// Pick the input a cautious player would give this tick
pub fn drive(state: &GameState) -> TickInput {
    let center = state.player.center();

    // Closest threatening enemy bullet
    let threat = state
        .enemy_bullets
        .iter()
        .filter(|b| b.active)
        .map(|b| b.center())
        .filter(|c| c.distance(center) < DANGER_RADIUS)
        .min_by(|a, b| {
            a.distance(center)
                .partial_cmp(&b.distance(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = if let Some(bullet) = threat {
        // Step away from the bullet, mostly vertically
        let away = center - bullet;
        let dy = if away.y.abs() < 1.0 { 1.0 } else { away.y.signum() };
        Some(Vec2::new(center.x + away.x.signum() * 20.0, center.y + dy * 80.0))
    } else if let Some(pickup) = state
        .power_ups
        .iter()
        .filter(|p| p.active)
        .min_by(|a, b| {
            a.center()
                .distance(center)
                .partial_cmp(&b.center().distance(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    {
        Some(pickup.center())
    } else {
        // Line up with the nearest hostile, with a slow weave for variety
        let weave = (state.time_ticks as f32 * 0.02).sin() * 30.0;
        state
            .enemies
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.center())
            .min_by(|a, b| {
                a.distance(center)
                    .partial_cmp(&b.distance(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|c| Vec2::new(CRUISE_X + super::player::PLAYER_SIZE.x / 2.0, c.y + weave))
    };

    let movement = match target {
        Some(target) => {
            let mut delta = target - center;
            if threat.is_none() && delta.x.abs() < DEADZONE {
                delta.x = 0.0;
            }
            if delta.y.abs() < DEADZONE {
                delta.y = 0.0;
            }
            delta.normalize_or_zero()
        }
        None => {
            let home_x = CRUISE_X - state.player.pos.x;
            if home_x.abs() < DEADZONE {
                Vec2::ZERO
            } else {
                Vec2::new(home_x.signum(), 0.0)
            }
        }
    };

    TickInput {
        movement,
        shooting: true,
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::EnemyBullet;
    use crate::sim::enemy::{Enemy, EnemyType, Hostile};
    use crate::sim::powerup::{PowerUp, PowerUpKind};

    #[test]
    fn test_always_shoots_with_bounded_movement() {
        let state = GameState::new(1);
        let input = drive(&state);
        assert!(input.shooting);
        assert!(input.movement.length() <= 1.0 + 1e-6);
    }

    #[test]
    fn test_dodges_nearby_bullet() {
        let mut state = GameState::new(1);
        let center = state.player.center();
        // Bullet just above the ship: move down
        state
            .enemy_bullets
            .push(EnemyBullet::new(center + Vec2::new(40.0, -20.0), Vec2::new(-150.0, 0.0)));
        let input = drive(&state);
        assert!(input.movement.y > 0.0);
    }

    #[test]
    fn test_goes_for_power_up_when_safe() {
        let mut state = GameState::new(1);
        let center = state.player.center();
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Shield, center + Vec2::new(200.0, -100.0)));
        let input = drive(&state);
        assert!(input.movement.x > 0.0);
        assert!(input.movement.y < 0.0);
    }

    #[test]
    fn test_lines_up_with_enemy() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(CRUISE_X, 100.0);
        state
            .enemies
            .push(Hostile::Enemy(Enemy::new(EnemyType::Brute, Vec2::new(900.0, 500.0))));
        let input = drive(&state);
        assert!(input.movement.y > 0.0);
        assert!(input.movement.length() <= 1.0 + 1e-6);
    }
}
