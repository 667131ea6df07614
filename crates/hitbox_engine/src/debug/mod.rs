//! Debug module for visualization
//!
//! The engine only emits shapes through the [`DebugDraw`] hook; rendering
//! them is up to the application.

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugDraw, DebugDrawSystem, DebugShape, DebugShapeId};
pub use collision_debug::{clip_line_to_viewport, CollisionDebugVisualizer};
