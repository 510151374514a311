//! Space Impact - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, state machine)
//! - `timing`: Fixed-timestep scheduler
//! - `game`: Session host wiring the simulation to its collaborators
//! - `audio`, `ui`, `render`, `input`: Collaborator seams
//! - `persistence`: High scores, settings and progress storage
//! - `platform`: Process environment (data dir, seed, clock)

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod timing;
pub mod ui;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Same step in milliseconds, for the scheduler's accumulator
    pub const SIM_STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1280.0;
    pub const PLAYFIELD_HEIGHT: f32 = 720.0;

    /// Player bookkeeping
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 10;
    pub const INVULNERABILITY_SECS: f32 = 2.0;
    /// Where the player reappears after losing a life or starting a level
    pub const RESPAWN_X: f32 = 50.0;

    /// Background scroll
    pub const BASE_SCROLL_SPEED: f32 = 2.0;
    pub const SCROLL_SPEED_PER_LEVEL: f32 = 0.3;

    /// Boss defeat to level-complete delay
    pub const LEVEL_COMPLETE_DELAY_SECS: f32 = 1.0;
    /// Bonus per remaining life on level complete
    pub const LIFE_BONUS: u64 = 500;
    /// Score for collecting a power-up
    pub const POWER_UP_SCORE: u64 = 100;
    /// "LEVEL n" banner duration
    pub const LEVEL_BANNER_SECS: f32 = 2.0;
    /// Time scale applied to hostiles while time-slow is active
    pub const TIME_SLOW_FACTOR: f32 = 0.3;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        // 3π lands on the wrap boundary; either end is the same heading
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-4);
        assert!((normalize_angle(2.75 * PI) - 0.75 * PI).abs() < 1e-4);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-4);
    }
}
