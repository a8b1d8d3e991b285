//! Terminal demo host
//!
//! Drives the scene at roughly 60 Hz against a one-line ASCII strip, so the
//! walk, the pickup, and the hearts are visible without a window. Once the
//! milestone lands it runs a short wind-down and prints the final simulation
//! state as JSON.

use std::io::Write as _;
use std::thread;
use std::time::Duration;

use tulip_walk::assets::{AssetGate, AssetKey, LoadOutcome, default_manifest};
use tulip_walk::platform::clock::{Clock, SystemClock};
use tulip_walk::platform::viewport::{FixedViewport, Viewport};
use tulip_walk::render::Surface;
use tulip_walk::{FrameOutcome, FrameScheduler, Tuning};

const SCENE: Viewport = Viewport::new(800.0, 450.0);
const COLUMNS: usize = 80;

/// One terminal row standing in for the scene; sprites collapse to glyphs.
struct TerminalSurface {
    row: [char; COLUMNS],
}

impl TerminalSurface {
    fn new() -> Self {
        Self {
            row: [' '; COLUMNS],
        }
    }

    fn column(&self, x: f32) -> usize {
        let frac = (x / SCENE.width).clamp(0.0, 1.0);
        ((frac * (COLUMNS - 1) as f32) as usize).min(COLUMNS - 1)
    }

    fn flush_row(&self) {
        let line: String = self.row.iter().collect();
        print!("\r{line}");
        let _ = std::io::stdout().flush();
    }
}

impl Surface for TerminalSurface {
    type Error = std::convert::Infallible;

    fn draw_background(&mut self) -> Result<(), Self::Error> {
        self.row = [' '; COLUMNS];
        Ok(())
    }

    fn draw_ground(&mut self, _ground_y: f32) -> Result<(), Self::Error> {
        // Single-row rendition; the ground is the row itself
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        key: AssetKey,
        x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
    ) -> Result<(), Self::Error> {
        let glyph = match key {
            AssetKey::Item => 't',
            AssetKey::ProtagonistFrame(_) => 'P',
            AssetKey::CompanionFrame(_) => 'C',
        };
        let col = self.column(x);
        self.row[col] = glyph;
        Ok(())
    }

    fn draw_text(&mut self, glyph: char, x: f32, _y: f32, _alpha: f32) -> Result<(), Self::Error> {
        let col = self.column(x);
        // Hearts never paint over a sprite on the strip
        if self.row[col] == ' ' {
            self.row[col] = glyph;
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting Tulip Walk");

    let tuning = Tuning::default();
    let clock = SystemClock::new();
    let gate = AssetGate::new(default_manifest(), tuning.asset_timeout_ms, clock.now_ms());

    // Stand-in loaders; a real host would decode image files here
    for (i, descriptor) in default_manifest().into_iter().enumerate() {
        let resolver = gate.resolver();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20 + 10 * i as u64));
            resolver.resolve(descriptor.key, LoadOutcome::Loaded);
        });
    }

    let mut scheduler = FrameScheduler::new(clock, FixedViewport(SCENE), gate, tuning, 0xC0FFEE);
    scheduler.start();

    let mut surface = TerminalSurface::new();
    let mut wind_down: Option<u32> = None;

    // Safety cap well past the longest possible run
    for _ in 0..3600 {
        if let FrameOutcome::Ticked { milestone, .. } = scheduler.frame(&mut surface) {
            surface.flush_row();
            if milestone {
                // Stand-in for the congratulatory UI this event is meant for
                log::info!("The tulip made it across -- happy day!");
                wind_down = Some(120);
            }
        }
        if let Some(frames_left) = wind_down.as_mut() {
            if *frames_left == 0 {
                break;
            }
            *frames_left -= 1;
        }
        thread::sleep(Duration::from_millis(16));
    }

    scheduler.stop();
    println!();

    match serde_json::to_string_pretty(scheduler.state()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("could not serialize final state: {e}"),
    }
}
