//! Wall-clock driven animation helpers
//!
//! Frame selection is a pure function of the clock sample, never of the tick
//! count, so animation speed is independent of the display refresh rate and
//! two calls with the same sample always agree.

/// Cyclic frame index for a strip animated at a fixed per-frame duration.
pub fn frame_index(now_ms: f64, frame_ms: f64, frame_count: u32) -> u32 {
    if frame_ms <= 0.0 || frame_count == 0 {
        return 0;
    }
    ((now_ms / frame_ms).floor() as i64).rem_euclid(frame_count as i64) as u32
}

/// Hover offset while the companion celebrates: `amplitude * |sin(now / period)|`.
/// Bounded to `[0, amplitude]` and periodic for any sample.
pub fn bob_offset(now_ms: f64, amplitude: f32, period_ms: f64) -> f32 {
    if period_ms <= 0.0 {
        return 0.0;
    }
    amplitude * ((now_ms / period_ms).sin().abs() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_advances_per_duration() {
        assert_eq!(frame_index(0.0, 150.0, 4), 0);
        assert_eq!(frame_index(149.9, 150.0, 4), 0);
        assert_eq!(frame_index(150.0, 150.0, 4), 1);
        assert_eq!(frame_index(599.0, 150.0, 4), 3);
        assert_eq!(frame_index(600.0, 150.0, 4), 0);
    }

    #[test]
    fn test_frame_cycles_through_all_frames() {
        for frame in 0..7u32 {
            let now = frame as f64 * 200.0 + 50.0;
            assert_eq!(frame_index(now, 200.0, 7), frame);
        }
        assert_eq!(frame_index(7.0 * 200.0, 200.0, 7), 0);
    }

    #[test]
    fn test_frame_wraps_instead_of_going_negative() {
        // Clocks here are monotonic from zero, but a wrapped index beats a
        // panic if a host ever feeds an earlier origin.
        assert_eq!(frame_index(-10.0, 150.0, 4), 3);
        assert_eq!(frame_index(-150.0, 150.0, 4), 3);
        assert_eq!(frame_index(-151.0, 150.0, 4), 2);
    }

    #[test]
    fn test_frame_guards_degenerate_inputs() {
        assert_eq!(frame_index(1000.0, 0.0, 4), 0);
        assert_eq!(frame_index(1000.0, 150.0, 0), 0);
    }

    #[test]
    fn test_bob_is_bounded_and_non_negative() {
        for step in 0..1000 {
            let now = step as f64 * 7.3;
            let bob = bob_offset(now, 30.0, 150.0);
            assert!(bob >= 0.0);
            assert!(bob <= 30.0);
        }
    }

    #[test]
    fn test_bob_peaks_and_returns() {
        assert!(bob_offset(0.0, 30.0, 150.0).abs() < 0.001);
        // Quarter period of the underlying sine: 150 * pi / 2 ms
        let peak = bob_offset(150.0 * std::f64::consts::FRAC_PI_2, 30.0, 150.0);
        assert!((peak - 30.0).abs() < 0.001);
    }
}
