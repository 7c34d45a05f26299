//! Orbit model for the Helio orrery.
//!
//! Bodies move on fixed ellipses with the sun at one focus. The true anomaly
//! advances at a uniform rate, so a body's position is a pure function of
//! elapsed time and its own parameters. Bodies never interact.

mod body;
mod ellipse;
mod error;

pub use body::{BodyParams, OrbitalBody, RingParams, SatelliteParams};
pub use ellipse::{angle_at, apoapsis, periapsis, position_at, satellite_offset};
pub use error::OrbitError;
