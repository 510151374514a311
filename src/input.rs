//! Input seam: sources polled once per tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Joystick travel (px) that maps to full deflection
pub const STICK_RANGE: f32 = 40.0;
/// Stick offsets at or below this are ignored
pub const STICK_DEADZONE: f32 = 15.0;

/// Anything that can steer the ship
pub trait InputSource {
    /// Direction with components in [-1, 1]; diagonals have unit length
    fn movement(&self) -> Vec2;
    fn shooting(&self) -> bool;

    /// Hand the simulation control over to the autopilot
    fn idle_mode(&self) -> bool {
        false
    }

    fn tick_input(&self) -> TickInput {
        TickInput {
            movement: self.movement(),
            shooting: self.shooting(),
            idle_mode: self.idle_mode(),
        }
    }
}

/// Scale a raw direction so diagonals are no faster than straight lines
pub fn normalize_movement(raw: Vec2) -> Vec2 {
    let raw = raw.clamp(Vec2::NEG_ONE, Vec2::ONE);
    if raw.x != 0.0 && raw.y != 0.0 {
        raw.normalize_or_zero()
    } else {
        raw
    }
}

/// Digital keys and an optional touch stick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Touch stick offset from where the touch began (px)
    pub stick: Option<Vec2>,
}

impl KeyState {
    /// Clamp a drag offset to the stick's range
    pub fn set_stick(&mut self, offset: Vec2) {
        self.stick = Some(offset.clamp_length_max(STICK_RANGE));
    }

    pub fn release_stick(&mut self) {
        self.stick = None;
    }
}

impl InputSource for KeyState {
    fn movement(&self) -> Vec2 {
        let mut raw = Vec2::ZERO;
        if self.left {
            raw.x -= 1.0;
        }
        if self.right {
            raw.x += 1.0;
        }
        if self.up {
            raw.y -= 1.0;
        }
        if self.down {
            raw.y += 1.0;
        }

        // The stick overrides keys per axis once past the deadzone
        if let Some(stick) = self.stick {
            if stick.x.abs() > STICK_DEADZONE {
                raw.x = stick.x / STICK_RANGE;
            }
            if stick.y.abs() > STICK_DEADZONE {
                raw.y = stick.y / STICK_RANGE;
            }
        }
        normalize_movement(raw)
    }

    fn shooting(&self) -> bool {
        self.fire
    }
}

/// Lets the autopilot fly
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn movement(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn shooting(&self) -> bool {
        false
    }

    fn idle_mode(&self) -> bool {
        true
    }
}
