//! Outcome resolver: resting angle to winning segment index
//!
//! Pure function of (angle, segment count) with no hidden state, so it can be
//! unit tested against literal angles.

use std::f64::consts::TAU;

use crate::consts::BOUNDARY_EPSILON;
use crate::normalize_angle;

/// Map a resting rotation to the segment under the fixed pointer.
///
/// Segment 0 is drawn starting at the pointer when the rotation is 0, with
/// segments following the render direction, so rotating the wheel forward
/// carries the pointer backwards through the segment list. A rotation exactly
/// on a boundary resolves to the lower-indexed segment via the epsilon
/// tie-break: `resolve(0.0, 4) == 0`, and a half turn lands on the opposite
/// segment, `resolve(PI, 4) == 2`. Total for any real angle and `segments`;
/// an empty wheel degenerates to a single segment.
pub fn resolve(angle: f64, segments: usize) -> usize {
    let segs = segments.max(1);
    let arc = TAU / segs as f64;
    let a = normalize_angle(angle);
    let mut index = ((TAU - a) / arc + BOUNDARY_EPSILON).floor() as i64 % segs as i64;
    if index < 0 {
        index += segs as i64;
    }
    index as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn boundary_resolves_to_segment_zero() {
        assert_eq!(resolve(0.0, 4), 0);
        assert_eq!(resolve(TAU, 4), 0);
        assert_eq!(resolve(-TAU, 4), 0);
    }

    #[test]
    fn half_rotation_lands_opposite() {
        assert_eq!(resolve(PI, 4), 2);
    }

    #[test]
    fn quarter_rotations() {
        // A quarter turn forward carries the pointer back one segment.
        assert_eq!(resolve(FRAC_PI_2, 4), 3);
        assert_eq!(resolve(3.0 * FRAC_PI_2, 4), 1);
    }

    #[test]
    fn small_forward_rotation_selects_last_segment() {
        assert_eq!(resolve(0.01, 4), 3);
        assert_eq!(resolve(TAU - 0.01, 4), 0);
    }

    #[test]
    fn negative_angles_normalize() {
        assert_eq!(resolve(-PI, 4), 2);
        assert_eq!(resolve(-0.01, 4), 0);
    }

    #[test]
    fn single_segment_always_wins() {
        for angle in [-10.0, 0.0, 1.0, 4.25, 1000.0] {
            assert_eq!(resolve(angle, 1), 0);
        }
        // Empty wheel is guarded upstream but must not panic here.
        assert_eq!(resolve(3.0, 0), 0);
    }

    proptest! {
        #[test]
        fn index_is_always_in_range(angle in -1000.0f64..1000.0, segs in 1usize..=64) {
            let index = resolve(angle, segs);
            prop_assert!(index < segs);
        }

        #[test]
        fn periodic_in_full_rotations(angle in -1000.0f64..1000.0, segs in 1usize..=32) {
            prop_assert_eq!(resolve(angle, segs), resolve(angle + TAU, segs));
        }
    }
}
