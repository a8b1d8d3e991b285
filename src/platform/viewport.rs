//! Viewport dimensions and the polled size provider
//!
//! Resize events are not queued anywhere: the scheduler asks for the latest
//! size once per tick, and only that sample matters.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Drawing surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Degenerate sizes show up mid-resize and while a window is minimized;
    /// callers skip geometry recomputation for those samples.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Latest-size provider, polled once per tick.
pub trait ViewportSource {
    fn size(&self) -> Viewport;
}

/// Constant size, for hosts with a fixed drawing surface.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub Viewport);

impl ViewportSource for FixedViewport {
    fn size(&self) -> Viewport {
        self.0
    }
}

/// Shared size cell. The host keeps one clone and overwrites it from its
/// resize handler; the scheduler polls the other.
#[derive(Debug, Clone)]
pub struct SharedViewport {
    inner: Rc<Cell<Viewport>>,
}

impl SharedViewport {
    pub fn new(initial: Viewport) -> Self {
        Self {
            inner: Rc::new(Cell::new(initial)),
        }
    }

    pub fn set(&self, viewport: Viewport) {
        self.inner.set(viewport);
    }
}

impl ViewportSource for SharedViewport {
    fn size(&self) -> Viewport {
        self.inner.get()
    }
}
