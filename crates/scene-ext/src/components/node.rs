use glam::{Quat, Vec3};
use crate::api::types::NodeId;
use crate::extensions::neighbors::Spatial;

/// A 3D scene node: local transform, propagated global transform and liveness flags.
///
/// Local and global transforms start out equal, which is correct for root nodes.
/// Nodes with a parent get their global transform from
/// [`TransformGraph::propagate`](crate::extensions::transform::TransformGraph::propagate).
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Human-readable name.
    pub name: String,
    /// String tag for grouping nodes.
    pub tag: String,
    /// Whether the node is attached to the scene tree.
    pub inside_tree: bool,
    /// Cleared once the node is queued for deletion.
    pub valid: bool,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Scale relative to the parent.
    pub scale: Vec3,
    /// Position in world space.
    pub global_position: Vec3,
    /// Rotation in world space.
    pub global_rotation: Quat,
    /// Scale in world space.
    pub global_scale: Vec3,
}

impl Node {
    /// Create a new root node at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            tag: String::new(),
            inside_tree: true,
            valid: true,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            global_position: Vec3::ZERO,
            global_rotation: Quat::IDENTITY,
            global_scale: Vec3::ONE,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set both local and global position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.global_position = position;
        self
    }

    /// Set both local and global rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self.global_rotation = rotation;
        self
    }

    /// Set both local and global scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self.global_scale = scale;
        self
    }

    /// Start detached from the tree.
    pub fn detached(mut self) -> Self {
        self.inside_tree = false;
        self
    }

    // -- Basis directions (global, -Z forward) --

    pub fn forward(&self) -> Vec3 {
        self.global_rotation * Vec3::NEG_Z
    }

    pub fn back(&self) -> Vec3 {
        self.global_rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.global_rotation * Vec3::X
    }

    pub fn left(&self) -> Vec3 {
        self.global_rotation * Vec3::NEG_X
    }

    pub fn up(&self) -> Vec3 {
        self.global_rotation * Vec3::Y
    }

    pub fn down(&self) -> Vec3 {
        self.global_rotation * Vec3::NEG_Y
    }

    /// Distance between global positions.
    pub fn distance_to(&self, other: &Node) -> f32 {
        self.global_position.distance(other.global_position)
    }

    /// Distance between local positions.
    pub fn local_distance_to(&self, other: &Node) -> f32 {
        self.position.distance(other.position)
    }

    /// Unit vector pointing from this node to `other` in global space.
    /// Zero if both share a position.
    pub fn direction_to(&self, other: &Node) -> Vec3 {
        (other.global_position - self.global_position).normalize_or_zero()
    }
}

impl Spatial for Node {
    fn global_position(&self) -> Vec3 {
        self.global_position
    }

    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_inside_tree(&self) -> bool {
        self.inside_tree
    }

    /// Nodes are the same if they share an id, even across clones.
    fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
