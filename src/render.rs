//! Render seam
//!
//! The host hands a renderer a borrowed, read-only snapshot once per frame.

use serde::Serialize;

use crate::sim::{
    EnemyBullet, GamePhase, GameState, Hostile, Particle, Player, PowerUp, Projectile,
};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub scroll_offset: f32,
    /// Boss health fraction while a boss is alive
    pub boss_health: Option<f32>,
    /// Remaining "LEVEL n" banner time; zero when hidden
    pub level_banner: f32,
    pub player: &'a Player,
    pub bullets: &'a [Projectile],
    pub enemies: &'a [Hostile],
    pub enemy_bullets: &'a [EnemyBullet],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
}

impl<'a> RenderView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            level: state.level,
            score: state.score,
            lives: state.lives,
            scroll_offset: state.scroll_offset,
            boss_health: state.boss().map(|b| b.health_fraction()),
            level_banner: state.level_banner,
            player: &state.player,
            bullets: &state.bullets,
            enemies: &state.enemies,
            enemy_bullets: &state.enemy_bullets,
            power_ups: &state.power_ups,
            particles: &state.particles,
        }
    }

    /// Whether the player ship should be drawn this frame (blinks while invulnerable)
    pub fn player_visible(&self, time_ms: f64) -> bool {
        !self.player.is_invulnerable() || (time_ms / 100.0) as u64 % 2 == 0
    }
}

/// Draws a frame
pub trait Renderer {
    fn draw(&mut self, view: &RenderView<'_>);
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _view: &RenderView<'_>) {}
}
