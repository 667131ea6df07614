//! # Core Engine Module
//!
//! Shared configuration types used by the physics, tilemap and debug
//! subsystems.

pub mod config;

// Re-export commonly used config types
pub use config::{
    CollisionConfig,
    DebugConfig,
    TileMapSettings,
};
pub use crate::config::{Config, ConfigError};
