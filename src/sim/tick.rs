//! Per-frame simulation step
//!
//! One call advances the whole vignette by one frame. Every time-dependent
//! computation inside uses the single `now_ms` sample the scheduler took at
//! the top of the frame; the tick itself never reads a clock.

use glam::Vec2;
use rand::Rng;

use super::animation;
use super::geometry::SceneGeometry;
use super::particles;
use super::state::{CompanionPhase, MotionPhase, SimEvent, SimulationState};
use crate::tuning::Tuning;

/// Advance the simulation by one frame. Returns the one-shot events this
/// tick raised, in the order they occurred.
pub fn tick(
    state: &mut SimulationState,
    geometry: &SceneGeometry,
    now_ms: f64,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    state.ticks += 1;

    if state.motion == MotionPhase::Walking {
        state.protagonist_x += tuning.walk_speed;

        // Pickup: guarded by the item still lying there, so it can only
        // ever fire once
        if state.item_on_ground
            && (state.protagonist_x - geometry.item_x).abs() < tuning.pickup_radius
        {
            state.item_on_ground = false;
            state.has_item = true;
            events.push(SimEvent::ItemPickedUp);
        }

        // Arrival is checked after the move, in the same tick
        if state.protagonist_x >= geometry.target_x - tuning.arrive_threshold {
            state.motion = MotionPhase::Arrived;
            if state.companion == CompanionPhase::Idle {
                state.companion = CompanionPhase::Active;
                events.push(SimEvent::CompanionActivated);
            }
            state.milestone_reached = true;
            if !state.milestone_notified {
                state.milestone_notified = true;
                state.milestone_due_ms = Some(now_ms + tuning.milestone_delay_ms);
            }
        }
    }

    // Spawn before advancing, so a heart born this tick already decays once
    if state.companion == CompanionPhase::Active {
        let emitter = companion_anchor(geometry, state.companion, now_ms, tuning);
        particles::spawn_hearts(state, emitter, tuning, rng);
    }
    particles::update_hearts(state, tuning);

    // Deliver the pending congratulation once its deadline passes. The
    // deadline stays armed across scheduler stop/start because it lives in
    // the state, and it can only fire here, inside a tick.
    if state.milestone_due_ms.is_some_and(|due| now_ms >= due) {
        state.milestone_due_ms = None;
        events.push(SimEvent::MilestoneReached);
    }

    events
}

/// Top-left corner of the companion sprite, including the celebration hover.
pub fn companion_anchor(
    geometry: &SceneGeometry,
    companion: CompanionPhase,
    now_ms: f64,
    tuning: &Tuning,
) -> Vec2 {
    let bob = match companion {
        CompanionPhase::Idle => 0.0,
        CompanionPhase::Active => {
            animation::bob_offset(now_ms, tuning.bob_amplitude, tuning.bob_period_ms)
        }
    };
    Vec2::new(
        geometry.target_x,
        geometry.ground_y - geometry.sprite_size - bob,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::viewport::Viewport;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Viewport chosen so target_x = 540 and item_x = 270
    fn test_geometry() -> SceneGeometry {
        SceneGeometry::for_viewport(Viewport::new(720.0, 450.0))
    }

    fn run_ticks(
        state: &mut SimulationState,
        geometry: &SceneGeometry,
        tuning: &Tuning,
        rng: &mut Pcg32,
        count: u64,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            let now = state.ticks as f64 * 16.0;
            events.extend(tick(state, geometry, now, tuning, rng));
        }
        events
    }

    #[test]
    fn test_arrival_tick_is_exact() {
        // From x = 50 toward 540 - 60 at 1.2 px per tick:
        // ceil((540 - 60 - 50) / 1.2) = 359 ticks, not one earlier.
        let geometry = test_geometry();
        let tuning = Tuning {
            walk_speed: 1.2,
            ..Tuning::default()
        };
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(1);

        run_ticks(&mut state, &geometry, &tuning, &mut rng, 358);
        assert_eq!(state.motion, MotionPhase::Walking);

        run_ticks(&mut state, &geometry, &tuning, &mut rng, 1);
        assert_eq!(state.motion, MotionPhase::Arrived);
        assert_eq!(state.ticks, 359);
    }

    #[test]
    fn test_x_freezes_after_arrival() {
        let geometry = test_geometry();
        let tuning = Tuning::default();
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(1);

        run_ticks(&mut state, &geometry, &tuning, &mut rng, 400);
        assert_eq!(state.motion, MotionPhase::Arrived);
        let frozen = state.protagonist_x;

        run_ticks(&mut state, &geometry, &tuning, &mut rng, 100);
        assert!((state.protagonist_x - frozen).abs() < 0.001);
    }

    #[test]
    fn test_item_pickup_fires_once() {
        let geometry = test_geometry();
        let tuning = Tuning::default();
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let events = run_ticks(&mut state, &geometry, &tuning, &mut rng, 500);
        let pickups = events
            .iter()
            .filter(|e| **e == SimEvent::ItemPickedUp)
            .count();
        assert_eq!(pickups, 1);
        assert!(state.has_item);
        assert!(!state.item_on_ground);
    }

    #[test]
    fn test_companion_activates_once_at_threshold() {
        let geometry = test_geometry();
        let tuning = Tuning::default();
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let events = run_ticks(&mut state, &geometry, &tuning, &mut rng, 500);
        let activations = events
            .iter()
            .filter(|e| **e == SimEvent::CompanionActivated)
            .count();
        assert_eq!(activations, 1);
        assert_eq!(state.companion, CompanionPhase::Active);
        assert!(state.protagonist_x >= geometry.target_x - tuning.arrive_threshold);
    }

    #[test]
    fn test_milestone_scheduled_then_delivered_after_delay() {
        let geometry = test_geometry();
        let tuning = Tuning::default();
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(1);

        // Walk to arrival; scheduling happens immediately on that tick.
        while state.motion == MotionPhase::Walking {
            let now = state.ticks as f64 * 16.0;
            let events = tick(&mut state, &geometry, now, &tuning, &mut rng);
            assert!(!events.contains(&SimEvent::MilestoneReached));
        }
        assert!(state.milestone_reached);
        assert!(state.milestone_notified);
        let due = state.milestone_due_ms.unwrap();
        let arrival_now = (state.ticks - 1) as f64 * 16.0;
        assert!((due - (arrival_now + tuning.milestone_delay_ms)).abs() < 0.001);

        // Keep ticking; the event must land on the first tick at/after due,
        // exactly once.
        let mut deliveries = 0;
        for _ in 0..200 {
            let now = state.ticks as f64 * 16.0;
            let events = tick(&mut state, &geometry, now, &tuning, &mut rng);
            if events.contains(&SimEvent::MilestoneReached) {
                deliveries += 1;
                assert!(now >= due);
                assert!(now - due < 16.0);
            }
        }
        assert_eq!(deliveries, 1);
        assert!(state.milestone_due_ms.is_none());
    }

    #[test]
    fn test_heart_life_follows_decrement_schedule() {
        // Certain spawning: one heart per tick, oldest decayed k times.
        let geometry = test_geometry();
        let tuning = Tuning {
            heart_spawn_probability: 1.0,
            ..Tuning::default()
        };
        let mut state = SimulationState::new();
        state.motion = MotionPhase::Arrived;
        state.companion = CompanionPhase::Active;
        let mut rng = Pcg32::seed_from_u64(9);

        let k = 40;
        run_ticks(&mut state, &geometry, &tuning, &mut rng, k);
        assert_eq!(state.particles.len(), k as usize);
        let oldest = state.particles[0].life;
        assert!((oldest - (1.0 - tuning.heart_life_decrement * k as f32)).abs() < 0.0001);
        let newest = state.particles.last().unwrap().life;
        assert!((newest - (1.0 - tuning.heart_life_decrement)).abs() < 0.0001);
    }

    #[test]
    fn test_no_hearts_while_companion_idle() {
        let geometry = test_geometry();
        let tuning = Tuning {
            heart_spawn_probability: 1.0,
            ..Tuning::default()
        };
        let mut state = SimulationState::new();
        let mut rng = Pcg32::seed_from_u64(9);

        run_ticks(&mut state, &geometry, &tuning, &mut rng, 50);
        assert_eq!(state.companion, CompanionPhase::Idle);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_companion_anchor_hovers_only_when_active() {
        let geometry = test_geometry();
        let tuning = Tuning::default();
        // Peak of the hover: now = period * pi / 2
        let now = tuning.bob_period_ms * std::f64::consts::FRAC_PI_2;

        let idle = companion_anchor(&geometry, CompanionPhase::Idle, now, &tuning);
        let active = companion_anchor(&geometry, CompanionPhase::Active, now, &tuning);
        assert!((idle.y - (geometry.ground_y - geometry.sprite_size)).abs() < 0.001);
        assert!((idle.y - active.y - tuning.bob_amplitude).abs() < 0.001);
        assert!((idle.x - geometry.target_x).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_protagonist_never_moves_backwards(
            speed in 0.1f32..10.0,
            ticks in 1u64..1200,
        ) {
            let geometry = test_geometry();
            let tuning = Tuning { walk_speed: speed, ..Tuning::default() };
            let mut state = SimulationState::new();
            let mut rng = Pcg32::seed_from_u64(3);

            let mut previous = state.protagonist_x;
            for _ in 0..ticks {
                let now = state.ticks as f64 * 16.0;
                tick(&mut state, &geometry, now, &tuning, &mut rng);
                prop_assert!(state.protagonist_x >= previous);
                previous = state.protagonist_x;
            }
        }

        #[test]
        fn prop_pickup_and_activation_are_one_shot(
            speed in 0.5f32..8.0,
            ticks in 1u64..1500,
        ) {
            let geometry = test_geometry();
            let tuning = Tuning { walk_speed: speed, ..Tuning::default() };
            let mut state = SimulationState::new();
            let mut rng = Pcg32::seed_from_u64(5);

            let mut pickups = 0;
            let mut activations = 0;
            for _ in 0..ticks {
                let now = state.ticks as f64 * 16.0;
                for event in tick(&mut state, &geometry, now, &tuning, &mut rng) {
                    match event {
                        SimEvent::ItemPickedUp => pickups += 1,
                        SimEvent::CompanionActivated => activations += 1,
                        SimEvent::MilestoneReached => {}
                    }
                }
                // Picked up means no longer on the ground, permanently
                prop_assert!(!(state.has_item && state.item_on_ground));
            }
            prop_assert!(pickups <= 1);
            prop_assert!(activations <= 1);
        }

        #[test]
        fn prop_heart_lives_stay_positive(ticks in 1u64..400) {
            let geometry = test_geometry();
            let tuning = Tuning { heart_spawn_probability: 0.5, ..Tuning::default() };
            let mut state = SimulationState::new();
            state.companion = CompanionPhase::Active;
            state.motion = MotionPhase::Arrived;
            let mut rng = Pcg32::seed_from_u64(11);

            for _ in 0..ticks {
                let now = state.ticks as f64 * 16.0;
                tick(&mut state, &geometry, now, &tuning, &mut rng);
                for p in &state.particles {
                    prop_assert!(p.life > 0.0);
                    prop_assert!(p.life <= 1.0);
                }
            }
        }
    }
}
