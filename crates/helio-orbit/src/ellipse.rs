//! Closed-form polar ellipse motion with the central body at one focus.

use glam::DVec2;

/// Planar offset of a body from the focus at the given true anomaly.
///
/// Evaluates `r = a(1 - e²) / (1 + e·cos θ)` and returns `(r·cos θ, r·sin θ)`.
/// Total for `a > 0` and `0 <= e < 1`: the denominator never reaches zero.
#[inline]
pub fn position_at(angle: f64, semi_major_axis: f64, eccentricity: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let r = semi_major_axis * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * cos);
    DVec2::new(r * cos, r * sin)
}

/// True anomaly after `time` units at a uniform angular rate.
///
/// Real orbits sweep faster near periapsis; this model deliberately does not.
#[inline]
pub fn angle_at(time: f64, angular_speed: f64) -> f64 {
    angular_speed * time
}

/// Offset of a satellite circling its parent, driven by the parent's spin angle.
///
/// The result lies in the plane perpendicular to the parent's spin axis and
/// always has length `distance`.
#[inline]
pub fn satellite_offset(parent_rotation: f64, speed_factor: f64, distance: f64) -> DVec2 {
    let (sin, cos) = (parent_rotation * speed_factor).sin_cos();
    DVec2::new(cos * distance, sin * distance)
}

/// Focal distance at `angle = 0`, the closest point of the ellipse.
pub fn periapsis(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity)
}

/// Focal distance at `angle = π`, the farthest point of the ellipse.
pub fn apoapsis(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 + eccentricity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    const ECCENTRICITIES: [f64; 6] = [0.0, 0.0085, 0.09, 0.21, 0.5, 0.999];

    #[test]
    fn test_position_is_finite_across_domain() {
        for &e in &ECCENTRICITIES {
            for &a in &[0.001, 1.0, 30.0, 300.0, 1.0e9] {
                for i in -50..=50 {
                    let angle = i as f64 * 0.37;
                    let p = position_at(angle, a, e);
                    assert!(p.is_finite(), "a={a} e={e} angle={angle} -> {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_position_is_periodic() {
        for &e in &ECCENTRICITIES {
            for i in 0..32 {
                let angle = i as f64 * 0.2;
                let p0 = position_at(angle, 190.0, e);
                let p1 = position_at(angle + TAU, 190.0, e);
                let r = p0.length().max(1.0);
                assert!(
                    (p0 - p1).length() < r * 1e-9,
                    "e={e} angle={angle}: {p0:?} vs {p1:?}"
                );
            }
        }
    }

    #[test]
    fn test_circular_orbit_has_constant_radius() {
        for i in 0..64 {
            let angle = i as f64 / 64.0 * TAU;
            let p = position_at(angle, 80.0, 0.0);
            assert!(
                (p.length_squared() - 80.0 * 80.0).abs() < 1e-9,
                "angle={angle}, r²={}",
                p.length_squared()
            );
        }
    }

    #[test]
    fn test_mercury_at_zero_angle() {
        let p = position_at(0.0, 30.0, 0.21);
        assert!((p.x - 23.70).abs() < 0.01, "x = {}", p.x);
        assert_eq!(p.y, 0.0);
        assert!((p.x - periapsis(30.0, 0.21)).abs() < 1e-12);
    }

    #[test]
    fn test_far_side_is_apoapsis() {
        let p = position_at(PI, 150.0, 0.0489);
        assert!((p.length() - apoapsis(150.0, 0.0489)).abs() < 1e-9);
        assert!(p.x < 0.0);
    }

    #[test]
    fn test_angle_is_zero_at_time_zero() {
        assert_eq!(angle_at(0.0, 0.0005), 0.0);
        assert_eq!(angle_at(0.0, 0.002), 0.0);
    }

    #[test]
    fn test_angle_strictly_increases_with_time() {
        let speed = 0.000003;
        let mut prev = angle_at(0.0, speed);
        for frame in 1..500 {
            let now = angle_at(frame as f64 * 16.0, speed);
            assert!(now > prev, "frame {frame}: {now} <= {prev}");
            prev = now;
        }
    }

    #[test]
    fn test_earth_reference_positions() {
        let (a, e, speed) = (80.0, 0.017, 0.0005);

        let p0 = position_at(angle_at(0.0, speed), a, e);
        assert!((p0.x - 78.66).abs() < 0.05, "x = {}", p0.x);
        assert!((p0.x - a * (1.0 - e)).abs() < 1e-12);
        assert_eq!(p0.y, 0.0);

        let angle = angle_at(1000.0, speed);
        assert!((angle - 0.5).abs() < 1e-15);

        // r = 78.80125 at θ = 0.5
        let expected = (69.154_604_369_622_36, 37.779_332_551_286_97);
        let p1 = position_at(angle, a, e);
        assert!(((p1.x - expected.0) / expected.0).abs() < 1e-6, "{p1:?}");
        assert!(((p1.y - expected.1) / expected.1).abs() < 1e-6, "{p1:?}");
    }

    #[test]
    fn test_identical_inputs_give_identical_outputs() {
        let a = position_at(1.2345, 250.0, 0.0466);
        let b = position_at(1.2345, 250.0, 0.0466);
        assert_eq!(a, b);
    }

    #[test]
    fn test_satellite_offset_traces_circle() {
        for i in -40..40 {
            let phi = i as f64 * 0.137;
            let off = satellite_offset(phi, 10.0, 9.0);
            assert!((off.length() - 9.0).abs() < 1e-12, "phi={phi}: {off:?}");
        }
    }

    #[test]
    fn test_satellite_offset_follows_scaled_parent_angle() {
        let off = satellite_offset(PI / 20.0, 10.0, 9.0);
        // 10 · π/20 = π/2
        assert!(off.x.abs() < 1e-12);
        assert!((off.y - 9.0).abs() < 1e-12);

        let rest = satellite_offset(0.0, 10.0, 9.0);
        assert_eq!(rest, DVec2::new(9.0, 0.0));
    }
}
