//! Bearing math shared by the rotation handle and the handle layout.
//!
//! # Convention
//!
//! Angles are compass bearings in degrees: 0° points due north and the angle
//! grows toward the east (clockwise on a north-up map). This matches the
//! direction of a CSS `rotate()` on a y-down screen, so an overlay rotated by
//! the bearing of the cursor visually points at the cursor.
//!
//! The bearing is measured in raw degree space:
//! ```text
//! angle = atan2(Δlng, Δlat)  normalized to [0, 360)
//! ```
//! [`rotate_about`] uses the same frame, so handles placed with it report
//! back the exact angle they were placed at.

use crate::geo::LatLng;

/// Snap increment used when callers opt into snapping without choosing one.
pub const DEFAULT_SNAP_INCREMENT: f64 = 15.0;

/// Wrap an angle into `[0, 360)`.
///
/// Non-finite input is returned as 0 so a bad value can never poison a
/// transform string.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Bearing from `center` to `point` in degrees, in `[0, 360)`.
///
/// Due north is 0°, due east 90°, due south 180°, due west 270°. Coincident
/// points yield 0°.
pub fn calculate_rotation_angle(center: LatLng, point: LatLng) -> f64 {
    let (d_lat, d_lng) = center.delta_to(point);
    normalize_angle(d_lng.atan2(d_lat).to_degrees())
}

/// Round an angle to the nearest multiple of `increment`.
///
/// The result is not wrapped: wrapping would break idempotence for increments
/// that do not divide 360. Overlay setters normalize on their own. A
/// non-positive or non-finite increment returns the angle unchanged.
pub fn snap_angle(angle: f64, increment: f64) -> f64 {
    if !(increment.is_finite() && increment > 0.0) {
        return angle;
    }
    (angle / increment).round() * increment
}

/// Rotate `point` clockwise around `center` by `angle_degrees`, in the same
/// degree space as [`calculate_rotation_angle`].
pub fn rotate_about(center: LatLng, point: LatLng, angle_degrees: f64) -> LatLng {
    if angle_degrees == 0.0 {
        return point;
    }
    let (d_lat, d_lng) = center.delta_to(point);
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    // East is x, north is y; clockwise rotation by theta
    let x = d_lng * cos + d_lat * sin;
    let y = -d_lng * sin + d_lat * cos;

    center.offset(y, x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn origin() -> LatLng {
        LatLng::new(51.505, -0.125)
    }

    #[test]
    fn test_cardinal_bearings() {
        let c = origin();
        let cases = [
            (c.offset(0.01, 0.0), 0.0),
            (c.offset(0.0, 0.01), 90.0),
            (c.offset(-0.01, 0.0), 180.0),
            (c.offset(0.0, -0.01), 270.0),
        ];
        for (point, expected) in cases {
            let angle = calculate_rotation_angle(c, point);
            assert!(
                (angle - expected).abs() < EPS,
                "expected {expected}, got {angle}"
            );
        }
    }

    #[test]
    fn test_diagonal_bearing() {
        let c = origin();
        let angle = calculate_rotation_angle(c, c.offset(0.01, 0.01));
        assert!((angle - 45.0).abs() < EPS);

        let angle = calculate_rotation_angle(c, c.offset(0.01, -0.01));
        assert!((angle - 315.0).abs() < EPS);
    }

    #[test]
    fn test_coincident_points() {
        let c = origin();
        assert_eq!(calculate_rotation_angle(c, c), 0.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_normalize_tiny_negative() {
        let a = normalize_angle(-1e-20);
        assert!((0.0..360.0).contains(&a));
    }

    #[test]
    fn test_snap_angle_default_increment() {
        assert_eq!(snap_angle(7.0, DEFAULT_SNAP_INCREMENT), 0.0);
        assert_eq!(snap_angle(8.0, DEFAULT_SNAP_INCREMENT), 15.0);
        assert_eq!(snap_angle(44.0, DEFAULT_SNAP_INCREMENT), 45.0);
        assert_eq!(snap_angle(359.0, DEFAULT_SNAP_INCREMENT), 360.0);
        assert_eq!(snap_angle(-10.0, DEFAULT_SNAP_INCREMENT), -15.0);
    }

    #[test]
    fn test_snap_angle_uneven_increment() {
        let once = snap_angle(-5.0, 7.0);
        assert_eq!(once, -7.0);
        assert_eq!(snap_angle(once, 7.0), once);
    }

    #[test]
    fn test_snap_angle_disabled() {
        assert_eq!(snap_angle(37.5, 0.0), 37.5);
        assert_eq!(snap_angle(37.5, -15.0), 37.5);
        assert_eq!(snap_angle(-37.5, f64::NAN), -37.5);
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let c = origin();
        let north = c.offset(0.01, 0.0);
        let rotated = rotate_about(c, north, 90.0);
        assert!((rotated.lat - c.lat).abs() < EPS);
        assert!((rotated.lng - (c.lng + 0.01)).abs() < EPS);
    }

    #[test]
    fn test_rotate_about_zero_is_identity() {
        let c = origin();
        let p = c.offset(0.003, -0.007);
        assert_eq!(rotate_about(c, p, 0.0), p);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Offsets large enough that atan2 is well conditioned.
    fn offset_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-1.0f64..=1.0, -1.0f64..=1.0)
            .prop_filter("non-degenerate", |(a, b)| a.abs() + b.abs() > 1e-6)
    }

    proptest! {
        /// Property: bearings are always in [0, 360).
        #[test]
        fn prop_angle_in_range(
            lat in -80.0f64..=80.0,
            lng in -170.0f64..=170.0,
            (d_lat, d_lng) in offset_strategy(),
        ) {
            let c = LatLng::new(lat, lng);
            let angle = calculate_rotation_angle(c, c.offset(d_lat, d_lng));
            prop_assert!((0.0..360.0).contains(&angle), "angle {} out of range", angle);
        }

        /// Property: snapping twice is the same as snapping once.
        #[test]
        fn prop_snap_idempotent(angle in -1000.0f64..=1000.0, increment in 0.5f64..=90.0) {
            let once = snap_angle(angle, increment);
            let twice = snap_angle(once, increment);
            prop_assert_eq!(once.to_bits(), twice.to_bits(), "{} vs {}", once, twice);
        }

        /// Property: a point rotated around a center reports the rotation as its new bearing.
        #[test]
        fn prop_rotate_about_matches_bearing(
            angle in 0.0f64..360.0,
            dist in 0.001f64..=1.0,
        ) {
            let c = LatLng::new(10.0, 20.0);
            let north = c.offset(dist, 0.0);
            let rotated = rotate_about(c, north, angle);
            let bearing = calculate_rotation_angle(c, rotated);
            let diff = (bearing - angle).abs();
            prop_assert!(diff < 1e-6 || (360.0 - diff) < 1e-6, "{} vs {}", bearing, angle);
        }

        /// Property: rotation preserves the distance from the center.
        #[test]
        fn prop_rotate_about_preserves_distance(
            angle in -720.0f64..720.0,
            (d_lat, d_lng) in offset_strategy(),
        ) {
            let c = LatLng::new(0.0, 0.0);
            let p = c.offset(d_lat, d_lng);
            let r = rotate_about(c, p, angle);
            let before = d_lat.hypot(d_lng);
            let after = r.lat.hypot(r.lng);
            prop_assert!((before - after).abs() < 1e-9);
        }
    }
}
