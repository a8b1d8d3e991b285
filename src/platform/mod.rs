//! Host abstraction layer
//!
//! Seams between the deterministic core and whatever is driving it:
//! - Time: monotonic millisecond clock
//! - Viewport: latest drawing-surface size, polled per tick

pub mod clock;
pub mod viewport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use viewport::{FixedViewport, SharedViewport, Viewport, ViewportSource};
