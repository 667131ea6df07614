//! Physics module for 2D hitbox collision
//!
//! Shapes bind to externally owned [`Space`]s, live in a [`CollisionWorld`]
//! on one of three layers, and are queried for overlaps on demand. Contacts
//! between rectangles can be classified by side and resolved by snapping the
//! subject flush against what it hit.
//!
//! ```
//! use hitbox_engine::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! let player = Space::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0)).into_shared();
//! let wall = Space::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)).into_shared();
//!
//! let p = world.spawn(ShapeDesc::rectangle(&player).with_tag("player"));
//! let w = world.spawn(ShapeDesc::rectangle(&wall).with_tag("wall"));
//!
//! assert!(world.check(p, "wall"));
//! assert_eq!(world.advanced_check_with(p, w), Side::Right);
//! ```

pub mod collision;
pub mod collision_layers;
pub mod query;
pub mod resolver;
pub mod sides;
pub mod space;
pub mod world;

#[cfg(test)]
mod tests;

pub use collision::{
    CircleGeometry,
    Geometry,
    InfiniteEdge,
    LineGeometry,
    RectGeometry,
    Shape,
    ShapeDesc,
    ShapeKind,
    ShapeState,
};
pub use collision_layers::{CollisionLayers, LayerId};
pub use query::QueryFilter;
pub use resolver::{resolve_contact, ContactCallbacks, ContactHandler};
pub use sides::{classify, Collision, ContactReport, Corners, PairContact, Side};
pub use space::{Space, SpaceRef};
pub use world::CollisionWorld;

/// Errors raised by the collision world
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// A raw layer number outside `0..3`
    #[error("Collision layer {0} does not exist (valid layers are 0..{max})", max = CollisionLayers::COUNT)]
    InvalidLayer(u8),

    /// The handle does not resolve to a shape in this world
    #[error("Shape handle is stale or was never issued by this world")]
    StaleHandle,

    /// The operation needs a rectangle
    #[error("Expected a rectangle shape, found a {0}")]
    NotARectangle(&'static str),
}
