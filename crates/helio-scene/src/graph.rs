//! In-memory scene graph used for headless runs and tests.

use glam::{DQuat, DVec3};

use crate::SceneError;
use crate::transform::{NodeDesc, SceneHost, Transform};

/// Index of a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node: descriptor, local transform, and hierarchy links.
#[derive(Debug, Clone)]
pub struct SceneNode {
    desc: NodeDesc,
    position: DVec3,
    rotation_y: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    fn new(desc: NodeDesc) -> Self {
        Self {
            desc,
            position: DVec3::ZERO,
            rotation_y: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn desc(&self) -> &NodeDesc {
        &self.desc
    }

    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Transform for SceneNode {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    fn rotate_y(&mut self, delta: f64) {
        self.rotation_y += delta;
    }
}

/// Flat arena of nodes. Nodes are never removed, so a [`NodeId`] stays valid
/// for the lifetime of the graph that issued it.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeId(i))
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name() == name).map(NodeId)
    }

    fn get(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| SceneError::UnknownHandle(format!("{id:?}")))
    }

    fn is_ancestor(&self, ancestor: NodeId, mut of: NodeId) -> bool {
        while let Some(parent) = self.nodes[of.0].parent {
            if parent == ancestor {
                return true;
            }
            of = parent;
        }
        false
    }
}

impl SceneHost for SceneGraph {
    type Handle = NodeId;
    type Node = SceneNode;

    fn spawn(&mut self, desc: NodeDesc) -> NodeId {
        self.nodes.push(SceneNode::new(desc));
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.get(parent)?;
        let child_node = self.get(child)?;

        if parent == child {
            return Err(SceneError::SelfAttach(child_node.name().to_string()));
        }
        if child_node.parent.is_some() {
            return Err(SceneError::AlreadyAttached(child_node.name().to_string()));
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle {
                parent: self.nodes[parent.0].name().to_string(),
                child: child_node.name().to_string(),
            });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn node(&self, handle: NodeId) -> Option<&SceneNode> {
        self.nodes.get(handle.0)
    }

    fn node_mut(&mut self, handle: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle.0)
    }

    fn world_position(&self, handle: NodeId) -> Option<DVec3> {
        self.nodes.get(handle.0)?;

        let mut chain = vec![handle];
        let mut current = handle;
        while let Some(parent) = self.nodes[current.0].parent {
            chain.push(parent);
            current = parent;
        }

        let mut position = DVec3::ZERO;
        let mut rotation = DQuat::IDENTITY;
        for id in chain.iter().rev() {
            let node = &self.nodes[id.0];
            position += rotation * node.position;
            rotation *= DQuat::from_rotation_y(node.rotation_y);
        }
        Some(position)
    }
}
