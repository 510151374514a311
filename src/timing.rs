//! Fixed-timestep scheduler
//!
//! Frames arrive with increasing timestamps (ms). Elapsed time accumulates and
//! is spent in whole `SIM_STEP_MS` ticks; the caller renders once per frame no
//! matter how many ticks ran.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT, SIM_STEP_MS};

/// Runtime loop tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Catch-up ticks allowed per frame; `None` runs the whole backlog
    pub max_substeps: Option<u32>,
    /// Longest frame delta fed into the accumulator
    pub max_frame_ms: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_substeps: Some(MAX_SUBSTEPS),
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

/// Accumulator-driven tick scheduler
#[derive(Debug, Clone)]
pub struct FixedStep {
    config: LoopConfig,
    accumulator: f64,
    last_timestamp: Option<f64>,
    running: bool,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}

impl FixedStep {
    /// A stopped scheduler; call `start` before feeding frames
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            last_timestamp: None,
            running: false,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// (Re)start from a clean clock. The next frame only sets the baseline.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    /// Stop ticking; takes effect on the next `advance`
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time banked toward the next tick (ms)
    pub fn backlog_ms(&self) -> f64 {
        self.accumulator
    }

    /// Feed one frame. Calls `step(SIM_DT)` once per due tick and returns how
    /// many ran. While `paused` the backlog drains without ticking.
    pub fn advance(&mut self, timestamp_ms: f64, paused: bool, mut step: impl FnMut(f32)) -> u32 {
        if !self.running {
            return 0;
        }

        let delta = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).clamp(0.0, self.config.max_frame_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.accumulator += delta;

        if paused {
            self.accumulator %= SIM_STEP_MS;
            return 0;
        }

        let mut ticks = 0;
        while self.accumulator >= SIM_STEP_MS {
            if self.config.max_substeps.is_some_and(|cap| ticks >= cap) {
                log::debug!(
                    "Dropping {:.1}ms of backlog after {ticks} substeps",
                    self.accumulator
                );
                self.accumulator %= SIM_STEP_MS;
                break;
            }
            step(SIM_DT);
            self.accumulator -= SIM_STEP_MS;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: LoopConfig) -> FixedStep {
        let mut clock = FixedStep::new(config);
        clock.start();
        clock
    }

    #[test]
    fn test_first_frame_only_sets_baseline() {
        let mut clock = started(LoopConfig::default());
        assert_eq!(clock.advance(5000.0, false, |_| {}), 0);
        assert_eq!(clock.backlog_ms(), 0.0);
    }

    #[test]
    fn test_ticks_per_elapsed_time() {
        let mut clock = started(LoopConfig::default());
        clock.advance(0.0, false, |_| {});
        let mut total = 0;
        let mut dts = Vec::new();
        // 110 ms of 10 ms frames: six whole ticks
        for i in 1..=11 {
            total += clock.advance(i as f64 * 10.0, false, |dt| dts.push(dt));
        }
        assert_eq!(total, 6);
        assert!(dts.iter().all(|dt| *dt == SIM_DT));
        assert!(clock.backlog_ms() < SIM_STEP_MS);
    }

    #[test]
    fn test_paused_drains_without_ticking() {
        let mut clock = started(LoopConfig::default());
        clock.advance(0.0, false, |_| {});
        assert_eq!(clock.advance(200.0, true, |_| panic!("ticked while paused")), 0);
        assert!(clock.backlog_ms() < SIM_STEP_MS);
        // Resuming does not burst through the paused time
        assert!(clock.advance(220.0, false, |_| {}) <= 2);
    }

    #[test]
    fn test_substep_cap_discards_backlog() {
        let mut clock = started(LoopConfig::default());
        clock.advance(0.0, false, |_| {});
        assert_eq!(clock.advance(200.0, false, |_| {}), MAX_SUBSTEPS);
        assert!(clock.backlog_ms() < SIM_STEP_MS);
    }

    #[test]
    fn test_uncapped_runs_whole_backlog_up_to_frame_clamp() {
        let mut clock = started(LoopConfig {
            max_substeps: None,
            max_frame_ms: 260.0,
        });
        clock.advance(0.0, false, |_| {});
        // 10 s stall is clamped to 260 ms: 15 ticks
        assert_eq!(clock.advance(10_000.0, false, |_| {}), 15);
    }

    #[test]
    fn test_stop_takes_effect_next_call() {
        let mut clock = started(LoopConfig::default());
        clock.advance(0.0, false, |_| {});
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(100.0, false, |_| panic!("ticked while stopped")), 0);

        clock.start();
        assert_eq!(clock.advance(1000.0, false, |_| {}), 0);
        assert_eq!(clock.advance(1020.0, false, |_| {}), 1);
    }

    #[test]
    fn test_timestamps_going_backwards_are_ignored() {
        let mut clock = started(LoopConfig::default());
        clock.advance(100.0, false, |_| {});
        assert_eq!(clock.advance(50.0, false, |_| {}), 0);
        assert_eq!(clock.backlog_ms(), 0.0);
    }
}
