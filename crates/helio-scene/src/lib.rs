//! Scene driver for the Helio orrery.
//!
//! Owns the orbiting bodies and the scene nodes that render them, and moves
//! those nodes once per frame using the orbit model. The rendering engine is
//! reached only through the [`SceneHost`] and [`Transform`] traits; the bundled
//! [`SceneGraph`] implements them in memory for headless runs and tests.

mod camera;
mod error;
mod frame_loop;
mod graph;
mod simulation;
mod transform;

pub use camera::ViewCamera;
pub use error::SceneError;
pub use frame_loop::{FixedStepClock, FrameClock, FrameLoop, MonotonicClock};
pub use graph::{NodeId, SceneGraph, SceneNode};
pub use simulation::{
    BodyNodes, BodySnapshot, SatelliteNodes, SatelliteSnapshot, SimBody, SimulationState,
};
pub use transform::{NodeDesc, NodeKind, SceneHost, Transform};
