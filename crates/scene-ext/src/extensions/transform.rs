// extensions/transform.rs
//
// Transform hierarchy extension: tracks parent-child relationships by NodeId.
// Reads each node's local transform and writes its global one.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.set_parent(child_id, Some(parent_id));
//   graph.propagate(&mut scene);  // Updates global transforms from local ones

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

/// Hierarchy links for one node.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Transform hierarchy graph. Manages parent-child relationships.
///
/// Exists separately from Scene: local transforms live on the nodes,
/// the graph only knows who is attached to whom.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent (top-level).
    roots: Vec<NodeId>,
    /// Set when hierarchy changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node as a root of the hierarchy.
    pub fn register(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            self.nodes.insert(id, TransformNode::default());
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    /// Parenting a node under itself or one of its descendants is ignored.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> bool {
        if let Some(p) = parent {
            if p == child || self.is_ancestor(child, p) {
                log::warn!("set_parent: {:?} under {:?} would form a cycle", child, p);
                return false;
            }
            self.register(p);
        }
        self.register(child);

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
        true
    }

    /// Whether `ancestor` is above `id` in the hierarchy.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    /// Get the parent of a node.
    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the children of a node.
    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Remove a node from the hierarchy.
    /// Children become roots (orphaned).
    pub fn remove(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }

            for child in node.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }

            self.roots.retain(|&r| r != id);
        }
        self.dirty = true;
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Writes each node's global position/rotation/scale.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        let roots: Vec<NodeId> = self.roots.clone();
        for root in roots {
            self.propagate_recursive(root, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: NodeId,
        parent_pos: Vec3,
        parent_rot: Quat,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(links) = self.nodes.get(&id) else { return };
        let Some(node) = scene.get_mut(id) else { return };

        // Scale the offset, rotate it into the parent's frame, then translate
        let global_pos = parent_pos + parent_rot * (node.position * parent_scale);
        let global_rot = parent_rot * node.rotation;
        let global_scale = parent_scale * node.scale;

        node.global_position = global_pos;
        node.global_rotation = global_rot;
        node.global_scale = global_scale;

        for &child in &links.children {
            self.propagate_recursive(child, global_pos, global_rot, global_scale, scene);
        }
    }

    /// Check if the hierarchy has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the hierarchy as needing propagation (e.g. after moving a node).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Number of nodes in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Space;
    use crate::components::node::Node;
    use crate::extensions::neighbors::DistanceRange;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        graph.register(parent);
        graph.register(child);
        assert!(graph.set_parent(child, Some(parent)));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(graph.is_ancestor(parent, child));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = TransformGraph::new();
        let a = NodeId(1);
        let b = NodeId(2);
        graph.set_parent(b, Some(a));

        assert!(!graph.set_parent(a, Some(b)));
        assert!(!graph.set_parent(a, Some(a)));
        assert_eq!(graph.get_parent(a), None);
    }

    #[test]
    fn propagate_updates_global_positions() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        scene.spawn(
            Node::new(parent)
                .with_position(Vec3::new(10.0, 0.0, 0.0))
                .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
                .with_scale(Vec3::splat(2.0)),
        );
        scene.spawn(Node::new(child).with_position(Vec3::new(0.0, 0.0, -1.0)));
        graph.set_parent(child, Some(parent));

        graph.propagate(&mut scene);
        assert!(!graph.is_dirty());

        // Offset (0,0,-1) scaled by 2 and turned a quarter left around Y lands on -X.
        let child_node = scene.get(child).unwrap();
        assert!((child_node.global_position - Vec3::new(8.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(child_node.position, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(child_node.global_scale, Vec3::splat(2.0));
        assert!((child_node.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn local_and_global_queries_diverge_under_a_parent() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        scene.spawn(Node::new(NodeId(0)));
        scene.spawn(Node::new(NodeId(1)).with_position(Vec3::new(100.0, 0.0, 0.0)));
        scene.spawn(Node::new(NodeId(2)).with_position(Vec3::new(1.0, 0.0, 0.0)));
        scene.spawn(Node::new(NodeId(3)).with_position(Vec3::new(3.0, 0.0, 0.0)));
        graph.register(NodeId(0));
        graph.set_parent(NodeId(2), Some(NodeId(1)));
        graph.register(NodeId(3));
        graph.propagate(&mut scene);

        let ids = [NodeId(2), NodeId(3)];
        let range = DistanceRange::default();
        assert_eq!(scene.find_nearest(NodeId(0), ids, range, Space::Local), Some(NodeId(2)));
        assert_eq!(scene.find_nearest(NodeId(0), ids, range, Space::Global), Some(NodeId(3)));
    }

    #[test]
    fn remove_orphans_children() {
        let mut graph = TransformGraph::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        graph.set_parent(child, Some(parent));
        graph.remove(parent);

        assert_eq!(graph.get_parent(child), None);
        assert!(graph.roots.contains(&child));
        assert_eq!(graph.len(), 1);
    }
}
