use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default lower bound for neighbor queries.
pub const DEFAULT_MIN_DISTANCE: f32 = 0.0;
/// Default upper bound for neighbor queries.
pub const DEFAULT_MAX_DISTANCE: f32 = 9999.0;
/// Reserved animation that restores a player's base pose.
pub const RESET_ANIMATION: &str = "RESET";

/// Configuration for the extension helpers.
/// Usually left at defaults; can be loaded from JSON alongside game assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtConfig {
    /// Defaults for spatial neighbor queries.
    #[serde(default)]
    pub query: QueryConfig,
    /// Defaults for the animation sequencer.
    #[serde(default)]
    pub sequencer: SequencerConfig,
}

/// Inclusive distance range applied when a query does not set one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Animation sequencer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Name of the animation queued by the reset step.
    #[serde(default = "default_reset_animation")]
    pub reset_animation: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            reset_animation: default_reset_animation(),
        }
    }
}

fn default_min_distance() -> f32 {
    DEFAULT_MIN_DISTANCE
}

fn default_max_distance() -> f32 {
    DEFAULT_MAX_DISTANCE
}

fn default_reset_animation() -> String {
    RESET_ANIMATION.to_string()
}

impl ExtConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
