//! Simulation state and core types
//!
//! Everything the per-frame tick mutates lives in one aggregate, owned
//! exclusively by the frame scheduler. One-shot transitions are guarded by
//! the phase enums and flags here, never by ad-hoc checks at call sites.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PROTAGONIST_START_X;

/// Protagonist motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Marching toward the target at a fixed per-tick speed
    Walking,
    /// Within the arrive threshold of the target; terminal, x is frozen
    Arrived,
}

/// Companion reaction phase. One-way: once active, never idle again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionPhase {
    /// Standing in place, idle cycle still animating
    Idle,
    /// Celebrating: hovering and emitting hearts
    Active,
}

/// A floating heart glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Per-tick vertical velocity; negative rises in screen coordinates
    pub velocity_y: f32,
    /// Doubles as draw opacity; 1.0 at spawn, decremented each tick,
    /// removed at or below zero
    pub life: f32,
    pub glyph: char,
}

/// One-shot notifications raised by a tick for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The protagonist collected the item off the ground
    ItemPickedUp,
    /// The companion noticed the protagonist and started celebrating
    CompanionActivated,
    /// The delayed congratulation came due
    MilestoneReached,
}

/// Complete simulation state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Left edge of the protagonist sprite; monotonically non-decreasing
    pub protagonist_x: f32,
    pub motion: MotionPhase,
    /// Set exactly once on pickup, mutually exclusive with `item_on_ground`
    pub has_item: bool,
    pub item_on_ground: bool,
    pub companion: CompanionPhase,
    /// The walk reached its target
    pub milestone_reached: bool,
    /// The delayed congratulation has been scheduled; never cleared
    pub milestone_notified: bool,
    /// Pending congratulation deadline, taken exactly once when due.
    /// Survives a scheduler stop/start because it lives here.
    #[serde(default)]
    pub milestone_due_ms: Option<f64>,
    /// Hearts above the companion (cosmetic, rebuilt on the fly)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Tick counter for logging and tests
    pub ticks: u64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            protagonist_x: PROTAGONIST_START_X,
            motion: MotionPhase::Walking,
            has_item: false,
            item_on_ground: true,
            companion: CompanionPhase::Idle,
            milestone_reached: false,
            milestone_notified: false,
            milestone_due_ms: None,
            particles: Vec::new(),
            ticks: 0,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
