pub mod api;
pub mod core;
pub mod components;
pub mod extensions;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;

// Re-export key types at crate root for convenience
pub use api::config::{ExtConfig, QueryConfig, SequencerConfig, RESET_ANIMATION};
pub use api::types::{NodeId, TimerId, Space};
pub use components::animation::{Animation, AnimationPlayer};
pub use components::node::Node;
pub use self::core::scene::Scene;
pub use self::core::timer::TimerQueue;
pub use error::{Error, Result};

// Extensions
pub use extensions::{
    lerp, inverse_lerp, remap, move_toward, snapped, flat_distance,
    Spatial, SpatialExt, Extremum, DistanceRange, NeighborQuery,
    find_extremal, find_nearest_global, find_farthest_global,
    find_nearest_local, find_farthest_local,
    AnimationSource, TimerScheduler, AnimationSequencer,
    queue_with_callback, queue_with_callback_and_reset, reset,
    TransformGraph,
};

#[cfg(feature = "logging")]
pub use logging::{init_logging, LoggingConfig};
