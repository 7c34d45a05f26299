//! The rendering-engine boundary.
//!
//! The orrery only needs a scene graph whose nodes can be translated, spun
//! about their Y axis, and parented. Any engine that provides that can host
//! the simulation by implementing [`SceneHost`].

use std::fmt;

use glam::DVec3;

use crate::SceneError;

/// Local transform of a scene node.
pub trait Transform {
    /// Translation relative to the parent.
    fn position(&self) -> DVec3;

    fn set_position(&mut self, position: DVec3);

    /// Accumulated rotation about the local Y axis, in radians.
    fn rotation_y(&self) -> f64;

    /// Add `delta` radians to the Y rotation.
    fn rotate_y(&mut self, delta: f64);
}

/// A scene graph owned by the rendering engine.
pub trait SceneHost {
    /// Opaque node identifier.
    type Handle: Copy + Eq + fmt::Debug;
    /// Node type exposing the transform.
    type Node: Transform;

    /// Create a node at the scene root with an identity transform.
    fn spawn(&mut self, desc: NodeDesc) -> Self::Handle;

    /// Make `child` a child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either handle is unknown, the child already has a parent,
    /// or the link would create a cycle.
    fn attach(&mut self, parent: Self::Handle, child: Self::Handle) -> Result<(), SceneError>;

    fn node(&self, handle: Self::Handle) -> Option<&Self::Node>;

    fn node_mut(&mut self, handle: Self::Handle) -> Option<&mut Self::Node>;

    /// Position of the node in scene space, composing all ancestor transforms.
    fn world_position(&self, handle: Self::Handle) -> Option<DVec3>;
}

/// What a node represents. Opaque to the motion logic; forwarded to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Empty transform used to group children.
    Pivot,
    /// The central emissive sphere.
    Sun { radius: f64, texture: String },
    /// A lit planet sphere.
    Planet { radius: f64, texture: String },
    /// A flat annulus, tilted about X into the orbital plane.
    Ring {
        inner_radius: f64,
        outer_radius: f64,
        texture: String,
        tilt_x: f64,
    },
    /// A lit satellite sphere.
    Satellite { radius: f64, texture: String },
}

/// Everything the engine needs to create a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    pub name: String,
    pub kind: NodeKind,
}

impl NodeDesc {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn pivot(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Pivot)
    }
}
