//! Process environment: data directory, seed, demo length and the wall clock
//!
//! Runtime settings only; gameplay tuning lives in `consts` and the sim modules.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Save file name inside the data directory
pub const SAVE_FILE: &str = "space-impact.json";
/// Simulated seconds the demo binary plays by default
pub const DEFAULT_DEMO_SECS: u32 = 120;

/// Directory holding the save file (`SPACE_IMPACT_DATA`, default `./data`)
pub fn data_dir() -> PathBuf {
    env::var("SPACE_IMPACT_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

pub fn save_path() -> PathBuf {
    data_dir().join(SAVE_FILE)
}

/// Run seed (`SPACE_IMPACT_SEED`), otherwise derived from the clock
pub fn seed() -> u64 {
    env::var("SPACE_IMPACT_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| now_ms() as u64)
}

/// Demo length in simulated seconds (`SPACE_IMPACT_DEMO_SECS`)
pub fn demo_seconds() -> u32 {
    env::var("SPACE_IMPACT_DEMO_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DEMO_SECS)
}

/// Milliseconds since the Unix epoch
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
