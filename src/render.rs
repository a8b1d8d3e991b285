//! Render surface seam and the state → draw-call translation
//!
//! The core never owns a canvas. Hosts implement [`Surface`] and the
//! scheduler calls [`draw_frame`] once per tick with the same clock sample
//! the tick used, so sprite frames and hover offsets always agree with the
//! simulation.

use crate::assets::{AssetKey, AssetSet};
use crate::consts::{COMPANION_FRAME_COUNT, WALK_FRAME_COUNT};
use crate::sim::animation;
use crate::sim::geometry::SceneGeometry;
use crate::sim::state::{MotionPhase, SimulationState};
use crate::sim::tick::companion_anchor;
use crate::tuning::Tuning;

/// Item edge length relative to the character sprite
const ITEM_SCALE: f32 = 0.5;
/// Carried item, scaled down in the protagonist's hand
const CARRIED_SCALE: f32 = 0.3125;
/// Hand position inside the protagonist sprite, as fractions of its size
const HAND_OFFSET_X: f32 = 0.5625;
const HAND_OFFSET_Y: f32 = 0.4375;

/// Host-implemented drawing target, one call set per frame in paint order.
///
/// `draw_background` paints the whole backdrop: an image if the adapter has
/// one, otherwise its procedural sky. Missing art degrades visually, it must
/// never surface as an error.
pub trait Surface {
    type Error: std::fmt::Debug;

    fn draw_background(&mut self) -> Result<(), Self::Error>;
    /// Fill everything below `ground_y`
    fn draw_ground(&mut self, ground_y: f32) -> Result<(), Self::Error>;
    fn draw_sprite(
        &mut self,
        key: AssetKey,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), Self::Error>;
    /// Single glyph with opacity in `[0, 1]`
    fn draw_text(&mut self, glyph: char, x: f32, y: f32, alpha: f32) -> Result<(), Self::Error>;
}

/// Translate one frame of simulation state into draw calls. Sprites whose
/// asset never loaded are skipped; everything else still renders.
pub fn draw_frame<S: Surface>(
    state: &SimulationState,
    geometry: &SceneGeometry,
    assets: &AssetSet,
    now_ms: f64,
    tuning: &Tuning,
    surface: &mut S,
) -> Result<(), S::Error> {
    surface.draw_background()?;
    surface.draw_ground(geometry.ground_y)?;

    let sprite = geometry.sprite_size;

    if state.item_on_ground {
        let size = sprite * ITEM_SCALE;
        let key = AssetKey::Item;
        if assets.is_loaded(key) {
            surface.draw_sprite(key, geometry.item_x, geometry.ground_y - size, size, size)?;
        }
    }

    // Protagonist holds the first frame once arrived
    let walk_frame = match state.motion {
        MotionPhase::Walking => {
            animation::frame_index(now_ms, tuning.walk_frame_ms, WALK_FRAME_COUNT) as u8
        }
        MotionPhase::Arrived => 0,
    };
    let protagonist_y = geometry.ground_y - sprite;
    let protagonist_key = AssetKey::ProtagonistFrame(walk_frame);
    if assets.is_loaded(protagonist_key) {
        surface.draw_sprite(
            protagonist_key,
            state.protagonist_x,
            protagonist_y,
            sprite,
            sprite,
        )?;
    }

    if state.has_item {
        let size = sprite * CARRIED_SCALE;
        let key = AssetKey::Item;
        if assets.is_loaded(key) {
            surface.draw_sprite(
                key,
                state.protagonist_x + sprite * HAND_OFFSET_X,
                protagonist_y + sprite * HAND_OFFSET_Y,
                size,
                size,
            )?;
        }
    }

    // Companion cycles its frames in every phase; only the hover is gated
    let companion_frame =
        animation::frame_index(now_ms, tuning.companion_frame_ms, COMPANION_FRAME_COUNT) as u8;
    let companion_key = AssetKey::CompanionFrame(companion_frame);
    if assets.is_loaded(companion_key) {
        let anchor = companion_anchor(geometry, state.companion, now_ms, tuning);
        surface.draw_sprite(companion_key, anchor.x, anchor.y, sprite, sprite)?;
    }

    // Hearts were retired inside the tick, so every survivor is visible
    for particle in &state.particles {
        surface.draw_text(particle.glyph, particle.pos.x, particle.pos.y, particle.life)?;
    }

    Ok(())
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background,
    Ground { y: f32 },
    Sprite { key: AssetKey, x: f32, y: f32, w: f32, h: f32 },
    Text { glyph: char, x: f32, y: f32, alpha: f32 },
}

/// Headless adapter that records the draw stream, for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn sprite_keys(&self) -> Vec<AssetKey> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Text { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Error = std::convert::Infallible;

    fn draw_background(&mut self) -> Result<(), Self::Error> {
        self.calls.push(DrawCall::Background);
        Ok(())
    }

    fn draw_ground(&mut self, ground_y: f32) -> Result<(), Self::Error> {
        self.calls.push(DrawCall::Ground { y: ground_y });
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        key: AssetKey,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), Self::Error> {
        self.calls.push(DrawCall::Sprite { key, x, y, w, h });
        Ok(())
    }

    fn draw_text(&mut self, glyph: char, x: f32, y: f32, alpha: f32) -> Result<(), Self::Error> {
        self.calls.push(DrawCall::Text { glyph, x, y, alpha });
        Ok(())
    }
}
