//! Deterministic simulation module
//!
//! All vignette logic lives here. This module must be pure and deterministic:
//! - One wall-clock sample per tick, threaded in from the scheduler
//! - Seeded RNG only
//! - Stable particle order (in-place filtering)
//! - No rendering or platform dependencies

pub mod animation;
pub mod geometry;
pub mod particles;
pub mod state;
pub mod tick;

pub use geometry::SceneGeometry;
pub use particles::HEART_GLYPH;
pub use state::{CompanionPhase, MotionPhase, Particle, SimEvent, SimulationState};
pub use tick::{companion_anchor, tick};
