//! Game state machine: commands and phase transitions
//!
//! ```text
//! menu ──start──▶ playing ◀──resume── paused
//!                  │  │ └──pause──────────▲
//!      lives == 0  │  │ boss countdown done
//!                  ▼  ▼
//!           gameover  levelcomplete ──next level──▶ playing
//! ```
//! Restart and menu are accepted from any phase.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::state::{GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Player-issued commands, the only way back into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    Resume,
    TogglePause,
    NextLevel,
    Restart,
    Menu,
}

impl GameState {
    /// Apply a command. Returns false (and changes nothing) when the command
    /// is not valid in the current phase.
    pub fn apply(&mut self, command: Command) -> bool {
        let accepted = match (command, self.phase) {
            (Command::Start, GamePhase::Menu | GamePhase::GameOver) | (Command::Restart, _) => {
                self.start_game();
                true
            }
            (Command::Pause, GamePhase::Playing) => {
                self.set_phase(GamePhase::Paused);
                true
            }
            (Command::Resume, GamePhase::Paused) => {
                self.set_phase(GamePhase::Playing);
                true
            }
            (Command::TogglePause, GamePhase::Playing) => self.apply(Command::Pause),
            (Command::TogglePause, GamePhase::Paused) => self.apply(Command::Resume),
            (Command::NextLevel, GamePhase::LevelComplete) => {
                self.advance_level();
                true
            }
            (Command::Menu, _) => {
                self.clear_entities();
                self.particles.clear();
                self.level_complete_timer = None;
                self.set_phase(GamePhase::Menu);
                true
            }
            _ => false,
        };
        if !accepted {
            log::debug!("Ignoring {command:?} while {:?}", self.phase);
        }
        accepted
    }

    /// Fresh run from level 1
    pub fn start_game(&mut self) {
        log::info!("Starting new game (seed {})", self.seed);
        self.level = 1;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.scroll_speed = BASE_SCROLL_SPEED;
        self.scroll_offset = 0.0;
        self.clear_entities();
        self.particles.clear();
        self.player.reset();
        self.level_complete_timer = None;

        self.emit(GameEvent::ScoreChanged(self.score));
        self.emit(GameEvent::LivesChanged(self.lives));
        self.emit(GameEvent::BossHealthHidden);
        self.start_level();
        self.set_phase(GamePhase::Playing);
    }

    /// Move on from a completed level
    fn advance_level(&mut self) {
        self.level += 1;
        self.clear_entities();
        self.player.respawn();
        self.scroll_speed = BASE_SCROLL_SPEED + (self.level - 1) as f32 * SCROLL_SPEED_PER_LEVEL;
        self.level_complete_timer = None;
        self.start_level();
        self.set_phase(GamePhase::Playing);
    }

    fn start_level(&mut self) {
        log::info!("Level {} begins", self.level);
        self.director.start_level();
        self.level_banner = LEVEL_BANNER_SECS;
        self.emit(GameEvent::LevelChanged(self.level));
    }

    /// Boss countdown finished: bank the life bonus and suspend
    pub(crate) fn enter_level_complete(&mut self) {
        self.level_complete_timer = None;
        let bonus = self.lives as u64 * LIFE_BONUS;
        self.add_score(bonus);
        self.play(SoundEffect::LevelComplete);
        log::info!("Level {} complete, bonus {bonus}", self.level);
        self.emit(GameEvent::LevelComplete {
            level: self.level,
            bonus,
            weapon_tier: self.player.weapon_tier,
        });
        self.set_phase(GamePhase::LevelComplete);
    }

    pub(crate) fn enter_game_over(&mut self) {
        self.level_complete_timer = None;
        self.play(SoundEffect::GameOver);
        log::info!("Game over: score {} on level {}", self.score, self.level);
        self.emit(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
        self.set_phase(GamePhase::GameOver);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::EnemyBullet;
    use crate::sim::player::Effect;
    use glam::Vec2;

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(9);
        state.score = 1234;
        state.lives = 1;
        state.level = 4;
        state.player.weapon_tier = 4;
        state.player.effects.activate(Effect::Rage);
        state
            .enemy_bullets
            .push(EnemyBullet::new(Vec2::new(10.0, 10.0), Vec2::ZERO));

        assert!(state.apply(Command::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.score, state.lives, state.level), (0, 3, 1));
        assert_eq!(state.scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(state.player.weapon_tier, 1);
        assert!(!state.player.has(Effect::Rage));
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.level_banner, LEVEL_BANNER_SECS);
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut state = GameState::new(9);
        assert!(!state.apply(Command::Pause));
        state.apply(Command::Start);
        assert!(state.apply(Command::TogglePause));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.apply(Command::Pause));
        assert!(state.apply(Command::TogglePause));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.apply(Command::Resume));
    }

    #[test]
    fn test_invalid_commands_are_ignored() {
        let mut state = GameState::new(9);
        assert!(!state.apply(Command::NextLevel));
        state.apply(Command::Start);
        assert!(!state.apply(Command::Start));
        assert!(!state.apply(Command::NextLevel));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_level_complete_bonus_and_advance() {
        let mut state = GameState::new(9);
        state.apply(Command::Start);
        state.score = 5000;
        state.lives = 2;
        state.player.weapon_tier = 3;

        state.enter_level_complete();
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.score, 5000 + 2 * LIFE_BONUS);
        assert!(state.events.contains(&GameEvent::LevelComplete {
            level: 1,
            bonus: 1000,
            weapon_tier: 3
        }));

        state.director.boss_spawned = true;
        state.player.pos = Vec2::new(700.0, 50.0);
        assert!(state.apply(Command::NextLevel));
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.scroll_speed - 2.3).abs() < 1e-6);
        assert!(!state.director.boss_spawned);
        assert_eq!(state.player.pos, Vec2::new(RESPAWN_X, PLAYFIELD_HEIGHT / 2.0));
        // Tier survives level changes
        assert_eq!(state.player.weapon_tier, 3);
        assert_eq!(state.score, 6000);
    }

    #[test]
    fn test_game_over_reports_once() {
        let mut state = GameState::new(9);
        state.apply(Command::Start);
        state.drain_events();
        state.enter_game_over();
        let events = state.drain_events();
        let reports = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(reports, 1);
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));

        assert!(state.apply(Command::Start));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_from_anywhere() {
        let mut state = GameState::new(9);
        state.apply(Command::Start);
        state.apply(Command::Pause);
        assert!(state.apply(Command::Menu));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.apply(Command::Start));
    }
}
