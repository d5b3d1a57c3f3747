// extensions/mod.rs
//
// Helpers layered over the scene, animation and timer collaborators.
// Each one works through a small trait, so host engines can plug in
// their own node and animation types.

pub mod math;
pub mod neighbors;
pub mod sequencer;
pub mod transform;

pub use math::{lerp, inverse_lerp, remap, move_toward, snapped, flat_distance};
pub use neighbors::{
    Spatial, SpatialExt, Extremum, DistanceRange, NeighborQuery,
    find_extremal, find_nearest_global, find_farthest_global,
    find_nearest_local, find_farthest_local,
};
pub use sequencer::{
    AnimationSource, TimerScheduler, AnimationSequencer,
    queue_with_callback, queue_with_callback_and_reset, reset,
};
pub use transform::TransformGraph;
