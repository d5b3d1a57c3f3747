//! Error types for scene extensions.
//!
//! Empty neighbor queries are not errors; they return `None`.

use std::fmt;

/// Error type for extension operations.
#[derive(Debug)]
pub enum Error {
    /// The requested animation name does not resolve on the player.
    AnimationNotFound(String),
    /// Configuration could not be parsed.
    Config(serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AnimationNotFound(name) => write!(f, "Animation not found: {}", name),
            Error::Config(err) => write!(f, "Invalid config: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AnimationNotFound(_) => None,
            Error::Config(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err)
    }
}
