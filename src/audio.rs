//! Audio seam
//!
//! The simulation only names sound effects; an `AudioBackend` turns them into
//! actual sound. With no backend attached every call is a no-op.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player volley fired
    Shoot,
    /// Hostile destroyed
    Explosion,
    /// Player lost a life
    PlayerHit,
    /// Power-up collected
    PowerUp,
    /// Boss beaten, level done
    LevelComplete,
    /// Game over
    GameOver,
    /// Enemy or boss fired
    EnemyShoot,
    /// Boss entered the field
    BossAppear,
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Play `effect` at `volume` (0.0 - 1.0, already mixed)
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {effect:?} at {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("backend", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Pick up volume and mute from user settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Played = Rc<RefCell<Vec<(SoundEffect, f32)>>>;

    struct Recorder(Played);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    fn recording() -> (AudioManager, Played) {
        let played = Played::default();
        let manager = AudioManager::new(Some(Box::new(Recorder(played.clone()))));
        (manager, played)
    }

    #[test]
    fn test_play_mixes_volumes() {
        let (mut audio, played) = recording();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Shoot);
        assert_eq!(*played.borrow(), vec![(SoundEffect::Shoot, 0.25)]);
    }

    #[test]
    fn test_mute_silences_everything() {
        let (mut audio, played) = recording();
        assert!(audio.toggle_mute());
        audio.play(SoundEffect::Explosion);
        assert!(played.borrow().is_empty());

        assert!(!audio.toggle_mute());
        audio.play(SoundEffect::Explosion);
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn test_volume_is_clamped() {
        let (mut audio, played) = recording();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::PowerUp);
        assert!(played.borrow().is_empty());
        audio.set_sfx_volume(1.0);
        audio.play(SoundEffect::PowerUp);
        assert_eq!(played.borrow()[0].1, 1.0);
    }

    #[test]
    fn test_missing_backend_is_a_no_op() {
        let mut audio = AudioManager::default();
        audio.play(SoundEffect::BossAppear);
        assert!(!audio.toggle_mute() || audio.is_muted());
    }

    #[test]
    fn test_apply_settings() {
        let (mut audio, played) = recording();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        audio.apply_settings(&settings);
        assert!(audio.is_muted());
        audio.play(SoundEffect::GameOver);
        assert!(played.borrow().is_empty());
    }
}
