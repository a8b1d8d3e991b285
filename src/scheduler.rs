//! Frame scheduler: the glue between host callbacks and the pure simulation
//!
//! One [`FrameScheduler::frame`] call is one animation frame. The scheduler
//! samples the clock exactly once, feeds the gate / tick / draw pipeline from
//! that single sample, and keeps all simulation state across stop/start so a
//! paused scene resumes exactly where it left off.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetGate, AssetSet};
use crate::platform::clock::Clock;
use crate::platform::viewport::ViewportSource;
use crate::render::{self, Surface};
use crate::sim::geometry::SceneGeometry;
use crate::sim::state::{SimEvent, SimulationState};
use crate::sim::tick;
use crate::tuning::Tuning;

/// What a single [`FrameScheduler::frame`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; nothing was simulated or drawn
    Stopped,
    /// Assets still resolving; the scene is not up yet
    Loading,
    /// No valid viewport sample seen so far, so the scene has no layout
    NoViewport,
    /// One tick ran (and one draw was attempted)
    Ticked {
        /// The delayed milestone notification was delivered this frame
        milestone: bool,
        /// False when the surface returned an error; the error was logged
        draw_ok: bool,
    },
}

/// Owns the clock, viewport source, asset gate, RNG, and simulation state.
///
/// Generic over the host seams so tests drive it with a scripted clock and a
/// recording surface while the binary uses the real ones.
pub struct FrameScheduler<C, V> {
    clock: C,
    viewport: V,
    gate: AssetGate,
    assets: Option<AssetSet>,
    state: SimulationState,
    tuning: Tuning,
    rng: Pcg32,
    geometry: Option<SceneGeometry>,
    running: bool,
}

impl<C: Clock, V: ViewportSource> FrameScheduler<C, V> {
    pub fn new(clock: C, viewport: V, gate: AssetGate, tuning: Tuning, seed: u64) -> Self {
        Self {
            clock,
            viewport,
            gate,
            assets: None,
            state: SimulationState::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            geometry: None,
            running: false,
        }
    }

    /// Begin ticking. Calling it again while running is a no-op; the return
    /// value says whether this call actually transitioned.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        log::info!("frame loop started");
        true
    }

    /// Stop ticking without touching simulation state. Idempotent like
    /// [`start`](Self::start).
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        log::info!("frame loop stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Resolved asset set, `None` until the gate opens.
    pub fn assets(&self) -> Option<&AssetSet> {
        self.assets.as_ref()
    }

    /// Run one frame: poll the asset gate, refresh the layout from the
    /// latest viewport sample, advance the simulation one tick, and draw.
    ///
    /// Surface errors are logged and reported through
    /// [`FrameOutcome::Ticked::draw_ok`], never propagated; one bad frame
    /// must not take the loop down.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let now_ms = self.clock.now_ms();

        if self.assets.is_none() {
            match self.gate.poll(now_ms) {
                Some(set) => self.assets = Some(set),
                None => return FrameOutcome::Loading,
            }
        }
        let Some(assets) = self.assets.as_ref() else {
            return FrameOutcome::Loading;
        };

        // A degenerate sample (minimized window, mid-resize zero) keeps the
        // previous layout; only a valid one recomputes it
        let size = self.viewport.size();
        if size.is_valid() {
            self.geometry = Some(SceneGeometry::for_viewport(size));
        }
        let Some(geometry) = self.geometry else {
            return FrameOutcome::NoViewport;
        };

        let events = tick::tick(&mut self.state, &geometry, now_ms, &self.tuning, &mut self.rng);
        let mut milestone = false;
        for event in &events {
            match event {
                SimEvent::ItemPickedUp => {
                    log::debug!("item picked up on tick {}", self.state.ticks);
                }
                SimEvent::CompanionActivated => {
                    log::debug!("companion activated on tick {}", self.state.ticks);
                }
                SimEvent::MilestoneReached => {
                    log::info!("milestone notification delivered on tick {}", self.state.ticks);
                    milestone = true;
                }
            }
        }

        let draw_ok = match render::draw_frame(
            &self.state,
            &geometry,
            assets,
            now_ms,
            &self.tuning,
            surface,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                false
            }
        };

        FrameOutcome::Ticked { milestone, draw_ok }
    }
}
