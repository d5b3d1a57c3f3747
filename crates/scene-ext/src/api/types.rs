/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Handle to a one-shot timer scheduled on a [`TimerQueue`](crate::core::timer::TimerQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Which coordinate space a position is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    /// World-space position (after hierarchy propagation).
    #[default]
    Global,
    /// Position relative to the parent node.
    Local,
}
