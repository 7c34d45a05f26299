//! Orbital parameter validation errors.

/// Reasons an orbital body's parameters fall outside the model's domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// The semi-major axis must be strictly positive.
    #[error("semi-major axis must be > 0, got {0}")]
    NonPositiveSemiMajorAxis(f64),

    /// Eccentricity must lie in `[0, 1)` for a bound orbit.
    #[error("{field} must be in [0, 1), got {value}")]
    EccentricityOutOfRange {
        /// Which eccentricity was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter was NaN or infinite.
    #[error("{0} must be finite")]
    NonFiniteParameter(&'static str),

    /// Ring radii must satisfy `0 < inner < outer`.
    #[error("ring radii must satisfy 0 < inner < outer, got {inner}..{outer}")]
    InvalidRing {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },

    /// The satellite must orbit at a positive, finite distance.
    #[error("satellite orbital radius must be > 0, got {0}")]
    InvalidSatellite(f64),
}
