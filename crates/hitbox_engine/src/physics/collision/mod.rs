//! Collision shapes
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space geometry and the overlap math between it
//! - [`shape`] - Shapes bound to a space, their locks and lifecycle state
//!
//! Shapes store how to derive their geometry, not the geometry itself. The
//! world-space snapshot is resolved from the bound [`Space`](crate::physics::Space)
//! whenever a query needs it, unless the shape is static.

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{CircleGeometry, Geometry, InfiniteEdge, LineGeometry, RectGeometry};
pub use shape::{CircleShape, LineShape, RectangleShape, Shape, ShapeDesc, ShapeKind, ShapeState};
