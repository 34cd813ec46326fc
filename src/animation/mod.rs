pub mod state;

pub use state::{AnimationState, Progress, Transition};

use std::f32::consts::PI;

/// Progress left over once the first `i` of `n` segments are consumed.
pub fn max_scale(scale: f32, i: u32, n: u32) -> f32 {
    (scale - i as f32 / n as f32).max(0.0)
}

/// Normalized [0, 1] progress of segment `i` of `n`.
///
/// Segments fill strictly in order: segment `i` stays at 0 until every
/// segment before it is saturated.
pub fn divide_scale(scale: f32, i: u32, n: u32) -> f32 {
    (1.0 / n as f32).min(max_scale(scale, i, n)) * n as f32
}

/// Sine pulse: 0 at both ends of a unit of scale, 1 in the middle.
pub fn sinify(scale: f32) -> f32 {
    (scale * PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_scale_stays_in_unit_range() {
        for n in 1..=6 {
            for i in 0..n {
                for step in -20..=140 {
                    let scale = step as f32 / 100.0;
                    let v = divide_scale(scale, i, n);
                    assert!(
                        (0.0..=1.0 + 1e-5).contains(&v),
                        "divide_scale({scale}, {i}, {n}) = {v}"
                    );
                }
            }
        }
    }

    #[test]
    fn segments_fill_in_order() {
        // Halfway through the second of four segments
        let scale = 0.375;
        assert!((divide_scale(scale, 0, 4) - 1.0).abs() < 1e-5);
        assert!((divide_scale(scale, 1, 4) - 0.5).abs() < 1e-5);
        assert_eq!(divide_scale(scale, 2, 4), 0.0);
        assert_eq!(divide_scale(scale, 3, 4), 0.0);
    }

    #[test]
    fn max_scale_clamps_at_zero() {
        assert_eq!(max_scale(0.1, 2, 4), 0.0);
        assert!((max_scale(0.8, 2, 4) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn sinify_pulse() {
        assert!(sinify(0.0).abs() < 1e-6);
        assert!(sinify(1.0).abs() < 1e-6);
        assert!((sinify(0.5) - 1.0).abs() < 1e-6);
        for step in -300..=300 {
            let v = sinify(step as f32 / 100.0);
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
