//! Validated per-body orbital state.

use glam::{DVec2, DVec3};

use crate::ellipse::{angle_at, position_at, satellite_offset};
use crate::error::OrbitError;

/// Static ring geometry. Carried with the body but never affects motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingParams {
    /// Inner radius of the ring annulus.
    pub inner_radius: f64,
    /// Outer radius of the ring annulus.
    pub outer_radius: f64,
}

/// A natural satellite whose orbit is slaved to its parent's spin angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SatelliteParams {
    /// Distance from the parent's container origin.
    pub orbital_radius: f64,
    /// Multiplier applied to the parent's spin angle to get the satellite angle.
    pub speed_factor: f64,
    /// Self-rotation added to the satellite every frame.
    pub spin_rate: f64,
}

/// Unvalidated orbital parameters, as read from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyParams {
    /// Reference distance scale of the ellipse.
    pub semi_major_axis: f64,
    /// Eccentricity used for the per-frame motion.
    pub eccentricity: f64,
    /// Eccentricity used once at startup to place the mesh inside its container.
    /// `None` reuses [`eccentricity`](Self::eccentricity).
    pub placement_eccentricity: Option<f64>,
    /// Radians of true anomaly per time unit.
    pub angular_speed: f64,
    /// Self-rotation added every frame.
    pub spin_rate: f64,
    /// Optional ring.
    pub ring: Option<RingParams>,
    /// Optional satellite.
    pub satellite: Option<SatelliteParams>,
}

/// An orbiting body whose parameters are known to be inside the model's domain.
///
/// Constructed once at startup via [`OrbitalBody::new`]; immutable afterwards.
/// Every position query on a valid body is total and allocation-free.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalBody {
    semi_major_axis: f64,
    eccentricity: f64,
    placement_eccentricity: f64,
    angular_speed: f64,
    spin_rate: f64,
    ring: Option<RingParams>,
    satellite: Option<SatelliteParams>,
}

fn finite(value: f64, field: &'static str) -> Result<f64, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::NonFiniteParameter(field))
    }
}

fn eccentricity(value: f64, field: &'static str) -> Result<f64, OrbitError> {
    let value = finite(value, field)?;
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(OrbitError::EccentricityOutOfRange { field, value })
    }
}

impl OrbitalBody {
    /// Validate `params` and build the body.
    ///
    /// # Errors
    ///
    /// Returns an [`OrbitError`] if any parameter is non-finite, the semi-major
    /// axis is not positive, an eccentricity is outside `[0, 1)`, the ring radii
    /// are not ordered, or the satellite distance is not positive.
    pub fn new(params: BodyParams) -> Result<Self, OrbitError> {
        let semi_major_axis = finite(params.semi_major_axis, "semi_major_axis")?;
        if semi_major_axis <= 0.0 {
            return Err(OrbitError::NonPositiveSemiMajorAxis(semi_major_axis));
        }

        let ecc = eccentricity(params.eccentricity, "eccentricity")?;
        let placement_eccentricity = match params.placement_eccentricity {
            Some(e) => eccentricity(e, "placement_eccentricity")?,
            None => ecc,
        };

        let angular_speed = finite(params.angular_speed, "angular_speed")?;
        let spin_rate = finite(params.spin_rate, "spin_rate")?;

        if let Some(ring) = params.ring {
            finite(ring.inner_radius, "ring.inner_radius")?;
            finite(ring.outer_radius, "ring.outer_radius")?;
            if !(ring.inner_radius > 0.0 && ring.inner_radius < ring.outer_radius) {
                return Err(OrbitError::InvalidRing {
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
        }

        if let Some(sat) = params.satellite {
            finite(sat.orbital_radius, "satellite.orbital_radius")?;
            finite(sat.speed_factor, "satellite.speed_factor")?;
            finite(sat.spin_rate, "satellite.spin_rate")?;
            if sat.orbital_radius <= 0.0 {
                return Err(OrbitError::InvalidSatellite(sat.orbital_radius));
            }
        }

        Ok(Self {
            semi_major_axis,
            eccentricity: ecc,
            placement_eccentricity,
            angular_speed,
            spin_rate,
            ring: params.ring,
            satellite: params.satellite,
        })
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn placement_eccentricity(&self) -> f64 {
        self.placement_eccentricity
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn spin_rate(&self) -> f64 {
        self.spin_rate
    }

    pub fn ring(&self) -> Option<&RingParams> {
        self.ring.as_ref()
    }

    pub fn satellite(&self) -> Option<&SatelliteParams> {
        self.satellite.as_ref()
    }

    /// Planar offset from the central body at `time`.
    pub fn offset_at(&self, time: f64) -> DVec2 {
        position_at(
            angle_at(time, self.angular_speed),
            self.semi_major_axis,
            self.eccentricity,
        )
    }

    /// Translation written into the body's container each frame.
    ///
    /// The ellipse offset is shifted back by the semi-major axis along x so
    /// that, combined with the mesh's [`placement_offset`](Self::placement_offset),
    /// the body sits at its nominal distance. The planar `y` maps onto world `z`.
    pub fn container_position(&self, time: f64) -> DVec3 {
        let offset = self.offset_at(time);
        DVec3::new(offset.x - self.semi_major_axis, 0.0, offset.y)
    }

    /// Local x offset of the mesh inside its container, fixed at startup.
    pub fn placement_offset(&self) -> f64 {
        position_at(0.0, self.semi_major_axis, self.placement_eccentricity).x
    }

    /// Satellite container translation for the given parent spin angle.
    /// `None` if the body has no satellite.
    pub fn satellite_position(&self, parent_rotation: f64) -> Option<DVec3> {
        self.satellite.map(|sat| {
            let off = satellite_offset(parent_rotation, sat.speed_factor, sat.orbital_radius);
            DVec3::new(off.x, 0.0, off.y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> BodyParams {
        BodyParams {
            semi_major_axis: 80.0,
            eccentricity: 0.016,
            placement_eccentricity: Some(0.017),
            angular_speed: 0.0005,
            spin_rate: 0.012,
            ring: None,
            satellite: Some(SatelliteParams {
                orbital_radius: 9.0,
                speed_factor: 10.0,
                spin_rate: 0.012,
            }),
        }
    }

    #[test]
    fn test_valid_body_builds() {
        let body = OrbitalBody::new(earth()).unwrap();
        assert_eq!(body.semi_major_axis(), 80.0);
        assert_eq!(body.eccentricity(), 0.016);
        assert_eq!(body.placement_eccentricity(), 0.017);
        assert!(body.satellite().is_some());
        assert!(body.ring().is_none());
    }

    #[test]
    fn test_placement_eccentricity_defaults_to_motion_eccentricity() {
        let body = OrbitalBody::new(BodyParams {
            placement_eccentricity: None,
            ..earth()
        })
        .unwrap();
        assert_eq!(body.placement_eccentricity(), body.eccentricity());
    }

    #[test]
    fn test_rejects_eccentricity_of_one_or_more() {
        for e in [1.0, 1.5, 42.0] {
            let err = OrbitalBody::new(BodyParams {
                eccentricity: e,
                ..earth()
            })
            .unwrap_err();
            assert_eq!(
                err,
                OrbitError::EccentricityOutOfRange {
                    field: "eccentricity",
                    value: e
                }
            );
        }
    }

    #[test]
    fn test_rejects_negative_eccentricity() {
        let err = OrbitalBody::new(BodyParams {
            placement_eccentricity: Some(-0.1),
            ..earth()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            OrbitError::EccentricityOutOfRange {
                field: "placement_eccentricity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_semi_major_axis() {
        for a in [0.0, -30.0] {
            let err = OrbitalBody::new(BodyParams {
                semi_major_axis: a,
                ..earth()
            })
            .unwrap_err();
            assert_eq!(err, OrbitError::NonPositiveSemiMajorAxis(a));
        }
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        let cases = [
            BodyParams {
                semi_major_axis: f64::NAN,
                ..earth()
            },
            BodyParams {
                eccentricity: f64::NAN,
                ..earth()
            },
            BodyParams {
                angular_speed: f64::INFINITY,
                ..earth()
            },
            BodyParams {
                spin_rate: f64::NEG_INFINITY,
                ..earth()
            },
        ];
        for params in cases {
            let err = OrbitalBody::new(params).unwrap_err();
            assert!(
                matches!(err, OrbitError::NonFiniteParameter(_)),
                "{params:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_unordered_ring() {
        let err = OrbitalBody::new(BodyParams {
            ring: Some(RingParams {
                inner_radius: 20.0,
                outer_radius: 10.0,
            }),
            ..earth()
        })
        .unwrap_err();
        assert_eq!(
            err,
            OrbitError::InvalidRing {
                inner: 20.0,
                outer: 10.0
            }
        );
    }

    #[test]
    fn test_rejects_zero_satellite_radius() {
        let err = OrbitalBody::new(BodyParams {
            satellite: Some(SatelliteParams {
                orbital_radius: 0.0,
                speed_factor: 10.0,
                spin_rate: 0.012,
            }),
            ..earth()
        })
        .unwrap_err();
        assert_eq!(err, OrbitError::InvalidSatellite(0.0));
    }

    #[test]
    fn test_container_position_is_recentered() {
        let body = OrbitalBody::new(earth()).unwrap();
        for t in [0.0, 16.0, 1000.0, 123_456.0] {
            let off = body.offset_at(t);
            let pos = body.container_position(t);
            assert_eq!(pos, DVec3::new(off.x - 80.0, 0.0, off.y));
        }
        // At t = 0 the container sits just inside the origin by a·e.
        let start = body.container_position(0.0);
        assert!((start.x + 80.0 * 0.016).abs() < 1e-9, "{start:?}");
    }

    #[test]
    fn test_placement_offset_uses_placement_eccentricity() {
        let body = OrbitalBody::new(earth()).unwrap();
        assert!((body.placement_offset() - 80.0 * (1.0 - 0.017)).abs() < 1e-9);
    }

    #[test]
    fn test_orbit_distance_stays_between_apsides() {
        use crate::ellipse::{apoapsis, periapsis};

        let body = OrbitalBody::new(earth()).unwrap();
        let (near, far) = (periapsis(80.0, 0.016), apoapsis(80.0, 0.016));
        for i in 0..200 {
            let r = body.offset_at(i as f64 * 97.0).length();
            assert!(r >= near - 1e-9 && r <= far + 1e-9, "r={r}");
        }
        assert!((body.offset_at(0.0).length() - near).abs() < 1e-9);
    }

    #[test]
    fn test_satellite_position_has_fixed_distance() {
        let body = OrbitalBody::new(earth()).unwrap();
        for i in 0..50 {
            let phi = i as f64 * 0.012;
            let pos = body.satellite_position(phi).unwrap();
            assert_eq!(pos.y, 0.0);
            assert!((pos.length() - 9.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_satellite_position_without_satellite() {
        let body = OrbitalBody::new(BodyParams {
            satellite: None,
            ..earth()
        })
        .unwrap();
        assert!(body.satellite_position(1.0).is_none());
    }
}
