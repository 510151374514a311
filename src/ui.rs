//! HUD and overlay seam
//!
//! Every method has a no-op default so a sink only implements what it shows.

use glam::Vec2;

use crate::sim::GamePhase;

pub trait UiSink {
    fn update_score(&mut self, _score: u64) {}
    fn update_lives(&mut self, _lives: u8) {}
    fn update_level(&mut self, _level: u32) {}
    /// Boss bar fill, 0 - 100
    fn show_boss_health(&mut self, _percent: f32) {}
    fn hide_boss_health(&mut self) {}
    /// Floating text at a playfield position
    fn notify(&mut self, _text: &str, _pos: Vec2, _color: u32) {}
    fn show_game_over(&mut self, _score: u64, _level: u32, _is_new_top: bool) {}
    fn show_level_complete(&mut self, _level: u32, _bonus: u64) {}
    fn phase_changed(&mut self, _phase: GamePhase) {}
}

/// Sink that reports overlays through the log
#[derive(Debug, Default)]
pub struct LogUi;

impl UiSink for LogUi {
    fn update_level(&mut self, level: u32) {
        log::info!("LEVEL {level}");
    }

    fn show_game_over(&mut self, score: u64, level: u32, is_new_top: bool) {
        if is_new_top {
            log::info!("GAME OVER - new high score {score} (level {level})");
        } else {
            log::info!("GAME OVER - score {score} (level {level})");
        }
    }

    fn show_level_complete(&mut self, level: u32, bonus: u64) {
        log::info!("LEVEL {level} COMPLETE - bonus {bonus}");
    }
}
