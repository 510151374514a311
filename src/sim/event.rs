//! One-way notifications from the simulation to its collaborators
//!
//! The simulation only buffers these; the session host drains them after
//! each frame and routes them to audio, UI and storage.

use glam::Vec2;
use serde::Serialize;

use super::state::GamePhase;
use crate::audio::SoundEffect;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Fire-and-forget sound cue
    Sound(SoundEffect),
    ScoreChanged(u64),
    LivesChanged(u8),
    LevelChanged(u32),
    PhaseChanged(GamePhase),
    /// Boss health as a fraction of max (0..=1)
    BossHealth(f32),
    BossHealthHidden,
    /// Floating text at a playfield position
    Notification { text: String, pos: Vec2, color: u32 },
    LevelComplete { level: u32, bonus: u64, weapon_tier: u8 },
    GameOver { score: u64, level: u32 },
}
