//! Data-driven vignette tuning
//!
//! Every timing, speed and probability the simulation consumes, overridable
//! as a block. Defaults mirror `crate::consts`; hosts can load a partial
//! JSON override where only the keys they care about are present.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Timing/probability knobs threaded through tick and render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Protagonist advance per tick, px
    pub walk_speed: f32,
    /// Walking ends within this distance of the target, px
    pub arrive_threshold: f32,
    /// Pickup triggers within this distance of the item, px
    pub pickup_radius: f32,
    /// Walk cycle frame duration, ms
    pub walk_frame_ms: f64,
    /// Companion cycle frame duration, ms
    pub companion_frame_ms: f64,
    /// Divisor of the celebration hover sine, ms
    pub bob_period_ms: f64,
    /// Celebration hover height, px
    pub bob_amplitude: f32,
    /// Chance of one heart per tick while celebrating
    pub heart_spawn_probability: f64,
    /// Heart band center, px right of the companion's left edge
    pub heart_band_offset: f32,
    /// Horizontal jitter around the band center, px
    pub heart_band_half_width: f32,
    /// Heart rise speed range, px per tick
    pub heart_rise_min: f32,
    pub heart_rise_max: f32,
    /// Heart life lost per tick
    pub heart_life_decrement: f32,
    /// Gap between arrival and the congratulation, ms
    pub milestone_delay_ms: f64,
    /// Asset gate gives up waiting after this long, ms
    pub asset_timeout_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            arrive_threshold: ARRIVE_THRESHOLD,
            pickup_radius: PICKUP_RADIUS,
            walk_frame_ms: WALK_FRAME_MS,
            companion_frame_ms: COMPANION_FRAME_MS,
            bob_period_ms: BOB_PERIOD_MS,
            bob_amplitude: BOB_AMPLITUDE,
            heart_spawn_probability: HEART_SPAWN_PROBABILITY,
            heart_band_offset: HEART_BAND_OFFSET,
            heart_band_half_width: HEART_BAND_HALF_WIDTH,
            heart_rise_min: HEART_RISE_MIN,
            heart_rise_max: HEART_RISE_MAX,
            heart_life_decrement: HEART_LIFE_DECREMENT,
            milestone_delay_ms: MILESTONE_DELAY_MS,
            asset_timeout_ms: ASSET_TIMEOUT_MS,
        }
    }
}

impl Tuning {
    /// Parse a full or partial override; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
