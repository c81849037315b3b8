//! Closest-point geometry
//!
//! Narrow-phase distance tests reduce to two primitives: the closest point
//! on a finite segment to a point, and the closest pair of points between
//! two finite segments. Both are clamped-parameter formulations over full 3D
//! coordinates.

use crate::foundation::math::Vec3;

const EPSILON: f32 = 1e-6;

/// Closest point on the finite segment `a..b` to `point`.
pub fn closest_point_on_segment(point: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let length_sq = ab.norm_squared();
    if length_sq < EPSILON {
        // Degenerate segment collapses to its start.
        return a;
    }
    let t = ((point - a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest pair of points between the finite segments `p0..p1` and `q0..q1`.
///
/// Returns `(on_p, on_q)`. Near-parallel segments are resolved without
/// dividing by the vanishing denominator: the first parameter is pinned and
/// the clamp below picks the closest feature.
pub fn closest_points_between_segments(
    p0: Vec3,
    p1: Vec3,
    q0: Vec3,
    q1: Vec3,
) -> (Vec3, Vec3) {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let r = p0 - q0;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    // Both segments degenerate to points.
    if a < EPSILON && e < EPSILON {
        return (p0, q0);
    }

    // First segment degenerates to a point.
    if a < EPSILON {
        let t = (f / e).clamp(0.0, 1.0);
        return (p0, q0 + d2 * t);
    }

    let c = d1.dot(&r);

    // Second segment degenerates to a point.
    if e < EPSILON {
        let s = (-c / a).clamp(0.0, 1.0);
        return (p0 + d1 * s, q0);
    }

    let b = d1.dot(&d2);
    let denom = a * e - b * b;

    let mut s = if denom > EPSILON {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }

    (p0 + d1 * s, q0 + d2 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_lands_inside_the_segment() {
        let closest = closest_point_on_segment(
            Vec3::new(1.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        );
        assert_relative_eq!(closest, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_clamps_to_endpoints() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        assert_relative_eq!(
            closest_point_on_segment(Vec3::new(-3.0, 1.0, 0.0), a, b),
            a,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            closest_point_on_segment(Vec3::new(9.0, -2.0, 0.0), a, b),
            b,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_degenerate_segment_collapses_to_start() {
        let a = Vec3::new(2.0, 2.0, 0.0);
        let closest = closest_point_on_segment(Vec3::new(5.0, 5.0, 0.0), a, a);
        assert_relative_eq!(closest, a, epsilon = 1e-6);
    }

    #[test]
    fn test_crossing_segments_meet_at_the_intersection() {
        let (on_p, on_q) = closest_points_between_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(on_p, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(on_q, Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_skew_segments_in_3d() {
        // Perpendicular skew lines one unit apart along Z.
        let (on_p, on_q) = closest_points_between_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert_relative_eq!((on_q - on_p).norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_disjoint_collinear_segments_pick_facing_endpoints() {
        let (on_p, on_q) = closest_points_between_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        );
        assert_relative_eq!(on_p, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(on_q, Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_segments_report_the_gap() {
        let (on_p, on_q) = closest_points_between_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(4.0, 2.0, 0.0),
        );
        assert_relative_eq!((on_q - on_p).norm(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_like_second_segment() {
        let q = Vec3::new(2.0, 3.0, 0.0);
        let (on_p, on_q) = closest_points_between_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            q,
            q,
        );
        assert_relative_eq!(on_p, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(on_q, q, epsilon = 1e-6);
    }
}
