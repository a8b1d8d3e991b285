//! Heart particles above the celebrating companion
//!
//! Spawning is a Bernoulli roll per tick from the scheduler's seeded RNG.
//! Hearts rise, fade with their life value and are dropped in place with a
//! stable filter, so surviving hearts keep their insertion order. There is
//! no population cap; decay bounds the list at `probability * lifetime`
//! ticks' worth of hearts, a handful at the default constants.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, SimulationState};
use crate::tuning::Tuning;

/// Glyph every heart renders as
pub const HEART_GLYPH: char = '❤';

/// Roll the spawn chance and emit one heart at the companion's hover band.
pub fn spawn_hearts(
    state: &mut SimulationState,
    emitter: Vec2,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    if !rng.random_bool(tuning.heart_spawn_probability.clamp(0.0, 1.0)) {
        return;
    }

    let half = tuning.heart_band_half_width;
    let jitter = if half > 0.0 {
        rng.random_range(-half..half)
    } else {
        0.0
    };
    let rise = if tuning.heart_rise_min < tuning.heart_rise_max {
        rng.random_range(tuning.heart_rise_min..tuning.heart_rise_max)
    } else {
        tuning.heart_rise_min
    };

    state.particles.push(Particle {
        pos: Vec2::new(emitter.x + tuning.heart_band_offset + jitter, emitter.y),
        velocity_y: -rise,
        life: 1.0,
        glyph: HEART_GLYPH,
    });
}

/// Advance every heart one tick and retire the expired ones in place.
pub fn update_hearts(state: &mut SimulationState, tuning: &Tuning) {
    for particle in state.particles.iter_mut() {
        particle.pos.y += particle.velocity_y;
        particle.life -= tuning.heart_life_decrement;
    }
    state.particles.retain(|p| p.life > 0.0);
}
