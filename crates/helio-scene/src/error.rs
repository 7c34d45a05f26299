//! Scene wiring errors. All of them surface while building the scene.

use helio_orbit::OrbitError;

/// Errors raised while constructing or wiring a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A body in the configuration table is outside the orbit model's domain.
    #[error("body `{name}` has invalid orbital parameters: {source}")]
    InvalidBody {
        /// Name of the offending body.
        name: String,
        /// What was wrong with it.
        source: OrbitError,
    },

    /// Two bodies share the same name.
    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),

    /// The rendering host does not know this handle.
    #[error("unknown scene handle {0}")]
    UnknownHandle(String),

    /// The child already has a parent.
    #[error("node {0} already has a parent")]
    AlreadyAttached(String),

    /// A node was attached to itself.
    #[error("node {0} cannot be attached to itself")]
    SelfAttach(String),

    /// The attachment would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: String,
        /// Requested child.
        child: String,
    },

    /// The camera's clip planes must satisfy `0 < near < far`.
    #[error("camera clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes {
        /// Configured near plane.
        near: f64,
        /// Configured far plane.
        far: f64,
    },

    /// The fixed-step clock needs a positive, finite interval.
    #[error("frame interval must be a positive number of milliseconds, got {0}")]
    InvalidFrameInterval(f64),
}
