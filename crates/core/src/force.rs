//! Per-point forces: the autonomous drift target and pointer repulsion.
//!
//! Everything here is a pure function of point state, cursor position and
//! simulated time.

use crate::config::MotionConfig;
use crate::point::Point;
use glam::DVec2;

/// Last known pointer position in viewport space.
///
/// Starts far off-screen so nothing reacts before the first real pointer
/// event. Only the latest position matters; moves are never queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub position: DVec2,
}

impl Cursor {
    pub const OFFSCREEN: DVec2 = DVec2::new(-2000.0, -2000.0);

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: Self::OFFSCREEN,
        }
    }
}

/// Position the point is currently springing toward.
///
/// `x` follows a sine and `y` a slower cosine of the simulated clock, each
/// offset by the point's own phase, so neighbouring points trace
/// out-of-sync ellipses around their bases.
pub fn drift_target(point: &Point, time: f64, motion: &MotionConfig) -> DVec2 {
    let speed = point.drift_speed();
    let phase = point.phase();
    point.base()
        + DVec2::new(
            (time * speed + phase.x).sin(),
            (time * motion.vertical_drift_ratio * speed + phase.y).cos(),
        ) * point.amplitude()
}

/// Quadratic falloff `((radius - d) / radius)^2` for `d < radius`, else 0.
pub fn repulsion_magnitude(distance: f64, radius: f64) -> f64 {
    if distance >= radius {
        return 0.0;
    }
    let t = (radius - distance) / radius;
    t * t
}

/// Velocity impulse pushing `position` directly away from `cursor`.
///
/// The direction comes from `atan2`, so a cursor sitting exactly on the
/// point still yields a finite push (along +x) instead of a NaN.
pub fn repulsion(position: DVec2, cursor: DVec2, motion: &MotionConfig) -> DVec2 {
    let away = position - cursor;
    let force = repulsion_magnitude(away.length(), motion.repulsion_radius);
    if force == 0.0 {
        return DVec2::ZERO;
    }
    let angle = away.y.atan2(away.x);
    DVec2::new(angle.cos(), angle.sin()) * force * motion.repulsion_strength
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn point() -> Point {
        Point::new(DVec2::new(100.0, 100.0), DVec2::ZERO, 1.0, 10.0, 0.16)
    }

    #[test]
    fn cursor_starts_offscreen() {
        assert_eq!(Cursor::default().position, Cursor::OFFSCREEN);
    }

    #[test]
    fn drift_target_at_time_zero_with_zero_phase() {
        // sin(0) = 0, cos(0) = 1
        let target = drift_target(&point(), 0.0, &MotionConfig::default());
        assert!((target - DVec2::new(100.0, 110.0)).length() < 1e-12);
    }

    #[test]
    fn drift_target_respects_phase() {
        let p = Point::new(DVec2::ZERO, DVec2::new(FRAC_PI_2, FRAC_PI_2), 1.0, 5.0, 0.2);
        let target = drift_target(&p, 0.0, &MotionConfig::default());
        assert!((target.x - 5.0).abs() < 1e-12);
        assert!(target.y.abs() < 1e-12);
    }

    #[test]
    fn drift_target_stays_within_amplitude_of_base() {
        let p = point();
        let motion = MotionConfig::default();
        for frame in 0..2000 {
            let target = drift_target(&p, frame as f64 * 0.016, &motion);
            let offset = target - p.base();
            assert!(offset.x.abs() <= 10.0 + 1e-9 && offset.y.abs() <= 10.0 + 1e-9);
        }
    }

    #[test]
    fn zero_amplitude_pins_target_to_base() {
        let p = Point::new(DVec2::new(3.0, 4.0), DVec2::new(1.0, 2.0), 1.0, 0.0, 0.16);
        assert_eq!(drift_target(&p, 42.0, &MotionConfig::default()), p.base());
    }

    #[test]
    fn magnitude_is_one_at_cursor_and_zero_at_radius() {
        assert_eq!(repulsion_magnitude(0.0, 250.0), 1.0);
        assert_eq!(repulsion_magnitude(250.0, 250.0), 0.0);
        assert_eq!(repulsion_magnitude(1e6, 250.0), 0.0);
        assert!((repulsion_magnitude(125.0, 250.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn repulsion_points_away_from_cursor() {
        let motion = MotionConfig::default();
        let impulse = repulsion(DVec2::new(100.0, 100.0), DVec2::new(100.0, 50.0), &motion);
        assert!(impulse.x.abs() < 1e-12);
        assert!(impulse.y > 0.0);
        let expected = ((250.0 - 50.0) / 250.0_f64).powi(2) * 1.2;
        assert!((impulse.length() - expected).abs() < 1e-12);
    }

    #[test]
    fn repulsion_outside_radius_is_zero() {
        let motion = MotionConfig::default();
        let impulse = repulsion(DVec2::ZERO, Cursor::OFFSCREEN, &motion);
        assert_eq!(impulse, DVec2::ZERO);
    }

    #[test]
    fn cursor_on_point_pushes_along_positive_x() {
        let motion = MotionConfig::default();
        let impulse = repulsion(DVec2::new(7.0, 7.0), DVec2::new(7.0, 7.0), &motion);
        assert!(impulse.is_finite());
        assert!((impulse - DVec2::new(1.2, 0.0)).length() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn falloff_strictly_decreases_inside_radius(
                a in 0.0_f64..250.0,
                b in 0.0_f64..250.0,
            ) {
                prop_assume!((a - b).abs() > 1e-6);
                let (near, far) = if a < b { (a, b) } else { (b, a) };
                prop_assert!(repulsion_magnitude(near, 250.0) > repulsion_magnitude(far, 250.0));
            }

            #[test]
            fn falloff_is_zero_at_or_beyond_radius(d in 250.0_f64..1e7) {
                prop_assert_eq!(repulsion_magnitude(d, 250.0), 0.0);
            }

            #[test]
            fn impulse_is_finite_and_bounded(
                px in -3000.0_f64..3000.0,
                py in -3000.0_f64..3000.0,
                cx in -3000.0_f64..3000.0,
                cy in -3000.0_f64..3000.0,
            ) {
                let motion = MotionConfig::default();
                let impulse = repulsion(DVec2::new(px, py), DVec2::new(cx, cy), &motion);
                prop_assert!(impulse.is_finite());
                prop_assert!(impulse.length() <= motion.repulsion_strength + 1e-9);
            }
        }
    }
}
