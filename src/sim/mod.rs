//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every entity list)
//! - No rendering, audio or platform dependencies; side effects leave as events

pub mod autopilot;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod event;
pub mod particle;
pub mod phase;
pub mod player;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, EnemyBullet, Homing, Laser, Projectile};
pub use collision::Aabb;
pub use enemy::{Boss, Enemy, EnemyType, Hostile};
pub use event::GameEvent;
pub use particle::Particle;
pub use phase::Command;
pub use player::{Effect, Effects, Player};
pub use powerup::{PowerUp, PowerUpKind};
pub use spawn::SpawnDirector;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
