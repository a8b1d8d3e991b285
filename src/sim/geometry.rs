//! Scene anchor positions derived from the viewport
//!
//! Nothing here is persisted: the scheduler recomputes the geometry from the
//! latest valid viewport every tick, so a resize lands on the very next frame.

use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_FRACTION, ITEM_FRACTION, SPRITE_FRACTION, TARGET_FRACTION};
use crate::platform::viewport::Viewport;

/// Horizontal/vertical anchors for one frame, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneGeometry {
    /// Ground line the characters stand on
    pub ground_y: f32,
    /// Companion position; walking ends relative to this
    pub target_x: f32,
    /// Where the item waits to be picked up
    pub item_x: f32,
    /// Character sprite edge length, scaled with the viewport height
    pub sprite_size: f32,
}

impl SceneGeometry {
    /// Pure proportions of the viewport; callers guard against degenerate
    /// sizes with `Viewport::is_valid`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            ground_y: viewport.height * GROUND_FRACTION,
            target_x: viewport.width * TARGET_FRACTION,
            item_x: viewport.width * ITEM_FRACTION,
            sprite_size: viewport.height * SPRITE_FRACTION,
        }
    }
}
