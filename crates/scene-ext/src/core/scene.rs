use crate::api::types::{NodeId, Space};
use crate::components::node::Node;
use crate::extensions::neighbors::{find_extremal, DistanceRange, Extremum};

/// Simple node storage using a flat Vec.
/// Designed for small-to-medium node counts (hundreds, not millions).
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(256),
        }
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a node by ID immediately. Returns the removed node if found.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(idx))
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over all nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate over all nodes mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Find the first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Find all nodes with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.tag == tag).collect()
    }

    /// Take a node out of the tree without freeing it.
    pub fn detach(&mut self, id: NodeId) -> bool {
        self.set_inside_tree(id, false)
    }

    /// Put a detached node back into the tree.
    pub fn attach(&mut self, id: NodeId) -> bool {
        self.set_inside_tree(id, true)
    }

    fn set_inside_tree(&mut self, id: NodeId, inside: bool) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.inside_tree = inside;
                true
            }
            None => false,
        }
    }

    /// Mark a node for deletion. It stays stored but reports invalid
    /// until [`flush_freed`](Self::flush_freed) removes it.
    pub fn queue_free(&mut self, id: NodeId) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.valid = false;
                true
            }
            None => false,
        }
    }

    /// Remove every node queued for deletion. Returns their IDs.
    pub fn flush_freed(&mut self) -> Vec<NodeId> {
        let freed: Vec<NodeId> = self.nodes.iter().filter(|n| !n.valid).map(|n| n.id).collect();
        self.nodes.retain(|n| n.valid);
        if !freed.is_empty() {
            log::debug!("freed {} nodes", freed.len());
        }
        freed
    }

    /// Nearest candidate to `origin` by ID, or `None`.
    /// IDs that do not resolve are treated as freed.
    pub fn find_nearest(
        &self,
        origin: NodeId,
        candidates: impl IntoIterator<Item = NodeId>,
        range: DistanceRange,
        space: Space,
    ) -> Option<NodeId> {
        self.find_extremal(origin, candidates, range, Extremum::Nearest, space)
    }

    /// Farthest candidate to `origin` by ID, or `None`.
    pub fn find_farthest(
        &self,
        origin: NodeId,
        candidates: impl IntoIterator<Item = NodeId>,
        range: DistanceRange,
        space: Space,
    ) -> Option<NodeId> {
        self.find_extremal(origin, candidates, range, Extremum::Farthest, space)
    }

    fn find_extremal(
        &self,
        origin: NodeId,
        candidates: impl IntoIterator<Item = NodeId>,
        range: DistanceRange,
        mode: Extremum,
        space: Space,
    ) -> Option<NodeId> {
        let origin = self.get(origin)?;
        let resolved = candidates.into_iter().filter_map(|id| self.get(id));
        find_extremal(origin, resolved, range, mode, space).map(|n| n.id)
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
