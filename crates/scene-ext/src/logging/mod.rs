//! Logging setup.
//!
//! The crate logs through the `log` facade. This module only offers an
//! `env_logger` backend for tools and tests that have no logger of their own.

mod init;

pub use init::{init_logging, LoggingConfig};
