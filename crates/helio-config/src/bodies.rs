//! The static body table: sun and planets, with their presentation descriptors.

use helio_orbit::{BodyParams, RingParams, SatelliteParams};
use serde::{Deserialize, Serialize};

/// The stationary central body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    /// Mesh radius.
    pub radius: f64,
    /// Texture asset name.
    pub texture: String,
    /// Self-rotation per frame in radians.
    pub spin_rate: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            texture: "sun.jpg".to_string(),
            spin_rate: 0.02,
        }
    }
}

/// One orbiting body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    /// Unique, human-readable name.
    pub name: String,
    /// Mesh radius.
    pub radius: f64,
    /// Texture asset name.
    pub texture: String,
    /// Ellipse reference distance.
    pub semi_major_axis: f64,
    /// Eccentricity used every frame.
    pub eccentricity: f64,
    /// Catalogue eccentricity used once to place the mesh. Defaults to `eccentricity`.
    #[serde(default)]
    pub placement_eccentricity: Option<f64>,
    /// Radians of true anomaly per millisecond.
    pub angular_speed: f64,
    /// Self-rotation per frame in radians.
    pub spin_rate: f64,
    /// Ring around the body, if any.
    #[serde(default)]
    pub ring: Option<RingConfig>,
    /// Natural satellite, if any.
    #[serde(default)]
    pub satellite: Option<SatelliteConfig>,
}

/// A flat ring in the body's orbital plane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RingConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub texture: String,
}

/// A satellite that circles its parent in step with the parent's spin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SatelliteConfig {
    pub name: String,
    /// Mesh radius.
    pub radius: f64,
    pub texture: String,
    /// Distance from the parent.
    pub orbital_radius: f64,
    /// Satellite angle = parent spin angle × this factor.
    pub speed_factor: f64,
    /// Self-rotation per frame in radians.
    pub spin_rate: f64,
}

impl BodyConfig {
    /// Orbital parameters for validation by [`helio_orbit::OrbitalBody::new`].
    pub fn params(&self) -> BodyParams {
        BodyParams {
            semi_major_axis: self.semi_major_axis,
            eccentricity: self.eccentricity,
            placement_eccentricity: self.placement_eccentricity,
            angular_speed: self.angular_speed,
            spin_rate: self.spin_rate,
            ring: self.ring.as_ref().map(|r| RingParams {
                inner_radius: r.inner_radius,
                outer_radius: r.outer_radius,
            }),
            satellite: self.satellite.as_ref().map(|s| SatelliteParams {
                orbital_radius: s.orbital_radius,
                speed_factor: s.speed_factor,
                spin_rate: s.spin_rate,
            }),
        }
    }
}

fn planet(
    name: &str,
    radius: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    placement_eccentricity: f64,
    angular_speed: f64,
    spin_rate: f64,
) -> BodyConfig {
    BodyConfig {
        name: name.to_string(),
        radius,
        texture: format!("{name}.jpg"),
        semi_major_axis,
        eccentricity,
        placement_eccentricity: Some(placement_eccentricity),
        angular_speed,
        spin_rate,
        ring: None,
        satellite: None,
    }
}

fn ring(texture: &str) -> Option<RingConfig> {
    Some(RingConfig {
        inner_radius: 10.0,
        outer_radius: 20.0,
        texture: texture.to_string(),
    })
}

/// The eight planets of the reference orrery.
pub fn default_bodies() -> Vec<BodyConfig> {
    vec![
        planet("mercury", 4.0, 30.0, 0.2, 0.21, 0.002, 0.001),
        planet("venus", 5.0, 50.0, 0.0685, 0.007, 0.0008, 0.0012),
        BodyConfig {
            satellite: Some(SatelliteConfig {
                name: "moon".to_string(),
                radius: 1.39,
                texture: "earthmoon.jpg".to_string(),
                orbital_radius: 9.0,
                speed_factor: 10.0,
                spin_rate: 0.012,
            }),
            ..planet("earth", 5.56, 80.0, 0.016, 0.017, 0.0005, 0.012)
        },
        planet("mars", 5.0, 120.0, 0.09, 0.093, 0.00026, 0.013),
        planet("jupiter", 6.0, 150.0, 0.0489, 0.049, 0.00004, 0.04),
        BodyConfig {
            ring: ring("saturn ring.png"),
            ..planet("saturn", 8.0, 190.0, 0.0545, 0.055, 0.00002, 0.04)
        },
        BodyConfig {
            ring: ring("uranus ring.png"),
            ..planet("uranus", 8.2, 250.0, 0.0466, 0.047, 0.00001, 0.012)
        },
        planet("neptune", 5.0, 300.0, 0.0085, 0.009, 0.000003, 0.01),
    ]
}
