//! Session host
//!
//! Owns the game state, the scheduler and the collaborators. The simulation
//! only buffers events; after each frame's ticks the host routes them to
//! audio, the UI and storage.

use crate::audio::{AudioBackend, AudioManager};
use crate::input::InputSource;
use crate::persistence::Storage;
use crate::render::{RenderView, Renderer};
use crate::settings::{Settings, SettingsPatch};
use crate::sim::{Command, GameEvent, GamePhase, GameState, tick};
use crate::timing::{FixedStep, LoopConfig};
use crate::ui::UiSink;

/// Frames remembered for the FPS readout
const FPS_WINDOW: usize = 60;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    clock: FixedStep,
    audio: AudioManager,
    ui: Option<Box<dyn UiSink>>,
    storage: Storage,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Game {
    pub fn new(seed: u64, storage: Storage) -> Self {
        let mut game = Self {
            state: GameState::new(seed),
            clock: FixedStep::default(),
            audio: AudioManager::new(None),
            ui: None,
            storage,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        };
        game.apply_settings();
        game
    }

    pub fn with_audio(mut self, backend: Box<dyn AudioBackend>) -> Self {
        self.audio = AudioManager::new(Some(backend));
        self.apply_settings();
        self
    }

    pub fn with_ui(mut self, ui: Box<dyn UiSink>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_loop_config(mut self, config: LoopConfig) -> Self {
        let running = self.clock.is_running();
        self.clock = FixedStep::new(config);
        if running {
            self.clock.start();
        }
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tooling and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        self.storage.settings()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Frames per second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forward a player command. Returns false when it was ignored.
    pub fn command(&mut self, command: Command) -> bool {
        let accepted = self.state.apply(command);
        if accepted {
            match command {
                Command::Start | Command::Restart => self.clock.start(),
                Command::Menu => self.clock.stop(),
                _ => {}
            }
        }
        self.dispatch_events();
        accepted
    }

    /// End the current run as if the last life was lost, recording its score
    pub fn forfeit(&mut self) {
        if matches!(self.state.phase, GamePhase::Menu | GamePhase::GameOver) {
            return;
        }
        self.state.enter_game_over();
        self.dispatch_events();
    }

    /// Run one displayed frame: due ticks, event routing, then one draw.
    /// Returns the number of ticks that ran.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        input: &dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> u32 {
        let paused = self.state.phase.is_suspended();
        let state = &mut self.state;
        let ticks = self
            .clock
            .advance(timestamp_ms, paused, |dt| tick(state, &input.tick_input(), dt));

        self.dispatch_events();
        self.track_fps(timestamp_ms);
        renderer.draw(&RenderView::from_state(&self.state));
        ticks
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        self.storage.save_settings(&SettingsPatch {
            muted: Some(muted),
            ..Default::default()
        });
        muted
    }

    pub fn save_settings(&mut self, patch: &SettingsPatch) {
        self.storage.save_settings(patch);
        self.apply_settings();
    }

    fn apply_settings(&mut self) {
        let settings = self.storage.settings();
        self.audio.apply_settings(settings);
        self.state.particle_cap = settings.max_particles();
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits at the next write position
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::GameOver { score, level } => {
                    let is_new_top = self.storage.add_high_score(score, level);
                    self.clock.stop();
                    if let Some(ui) = self.ui.as_deref_mut() {
                        ui.show_game_over(score, level, is_new_top);
                    }
                }
                GameEvent::LevelComplete {
                    level,
                    bonus,
                    weapon_tier,
                } => {
                    self.storage.update_progress(level, weapon_tier);
                    if let Some(ui) = self.ui.as_deref_mut() {
                        ui.show_level_complete(level, bonus);
                    }
                }
                other => {
                    if let Some(ui) = self.ui.as_deref_mut() {
                        show(ui, other);
                    }
                }
            }
        }
    }
}

/// Events that only the UI cares about
fn show(ui: &mut dyn UiSink, event: GameEvent) {
    match event {
        GameEvent::ScoreChanged(score) => ui.update_score(score),
        GameEvent::LivesChanged(lives) => ui.update_lives(lives),
        GameEvent::LevelChanged(level) => ui.update_level(level),
        GameEvent::PhaseChanged(phase) => ui.phase_changed(phase),
        GameEvent::BossHealth(fraction) => ui.show_boss_health(fraction * 100.0),
        GameEvent::BossHealthHidden => ui.hide_boss_health(),
        GameEvent::Notification { text, pos, color } => ui.notify(&text, pos, color),
        GameEvent::Sound(_) | GameEvent::GameOver { .. } | GameEvent::LevelComplete { .. } => {}
    }
}
