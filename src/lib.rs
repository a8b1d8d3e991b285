//! Tulip Walk - A deterministic walk-and-greet scene
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, character phases, particles)
//! - `assets`: Concurrent asset resolution behind a ready-or-timeout gate
//! - `scheduler`: Per-frame driver (clock sample, gate poll, tick, draw)
//! - `render`: Surface seam and state-to-draw-call translation
//! - `platform`: Host clock and viewport abstraction
//! - `tuning`: Data-driven animation balance

pub mod assets;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod sim;
pub mod tuning;

pub use scheduler::{FrameOutcome, FrameScheduler};
pub use tuning::Tuning;

/// Scene configuration constants
pub mod consts {
    /// Asset gate deadline; the scene starts with whatever resolved by then
    pub const ASSET_TIMEOUT_MS: f64 = 2000.0;

    /// Layout, as fractions of the viewport
    pub const GROUND_FRACTION: f32 = 0.81;
    pub const TARGET_FRACTION: f32 = 0.75;
    pub const ITEM_FRACTION: f32 = 0.375;
    /// Character sprite edge relative to viewport height (80 px on a 450 px scene)
    pub const SPRITE_FRACTION: f32 = 80.0 / 450.0;

    /// Protagonist movement (pixels, per tick where rates)
    pub const PROTAGONIST_START_X: f32 = 50.0;
    pub const WALK_SPEED: f32 = 2.5;
    pub const ARRIVE_THRESHOLD: f32 = 60.0;
    pub const PICKUP_RADIUS: f32 = 30.0;

    /// Sprite sheet cycles
    pub const WALK_FRAME_MS: f64 = 150.0;
    pub const WALK_FRAME_COUNT: u32 = 4;
    pub const COMPANION_FRAME_MS: f64 = 200.0;
    pub const COMPANION_FRAME_COUNT: u32 = 7;

    /// Hover bob; |sin(now / period)| scaled by the amplitude
    pub const BOB_PERIOD_MS: f64 = 150.0;
    pub const BOB_AMPLITUDE: f32 = 30.0;

    /// Heart particles
    pub const HEART_SPAWN_PROBABILITY: f64 = 0.05;
    /// Emitter band offset from the companion's left edge
    pub const HEART_BAND_OFFSET: f32 = 40.0;
    pub const HEART_BAND_HALF_WIDTH: f32 = 20.0;
    /// Upward drift per tick, drawn uniformly from [min, max)
    pub const HEART_RISE_MIN: f32 = 1.0;
    pub const HEART_RISE_MAX: f32 = 2.0;
    pub const HEART_LIFE_DECREMENT: f32 = 0.01;

    /// Gap between reaching the target and the milestone notification
    pub const MILESTONE_DELAY_MS: f64 = 500.0;
}
