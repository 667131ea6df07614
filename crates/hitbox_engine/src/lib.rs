//! # Hitbox Engine
//!
//! A 2D hitbox collision engine for tile-based games.
//!
//! ## Features
//!
//! - **Bound Shapes**: Rectangles, circles and infinite lines that follow an
//!   externally owned, shared [`Space`](physics::Space)
//! - **Collision Layers**: Three fixed layers with tag and predicate filtered
//!   queries
//! - **Side Classification**: Corner-counting contact sides that do not snag on
//!   tile seams
//! - **Resolution**: Velocity-gated snapping with per-side callbacks
//! - **Tile Hitboxes**: Greedy merging of tile grids into few static rectangles
//!
//! ## Quick Start
//!
//! ```rust
//! use hitbox_engine::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! let replacements = HitboxReplacements::from([
//!     ('#', TileTemplate::new("ground", IVec2::new(16, 16))),
//! ]);
//! let grid = TileGrid::from_rows(&["....", "####"], &replacements, '.').unwrap();
//! TileHitboxes::generate(&mut world, &grid, &TileMapSettings::default());
//!
//! let body = Space::new(Vec2::new(4.0, 8.0), Vec2::new(8.0, 10.0)).into_shared();
//! let player = world.spawn(ShapeDesc::rectangle(&body).with_tag("player"));
//!
//! let report = world.advanced_check(player, "ground");
//! assert!(report.has_side(Side::Down));
//! for collision in report.collisions.clone() {
//!     world.apply_collision(player, &collision, Vec2::new(0.0, 1.0), &mut ()).unwrap();
//! }
//! assert_eq!(body.borrow().position.y, 6.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

pub mod physics;
pub mod tilemap;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            collections::ShapeHandle,
            math::{Color, IVec2, Vec2},
        },
        config::{Config, ConfigError},
        core::config::{CollisionConfig, DebugConfig, TileMapSettings},
        physics::{
            Collision, CollisionError, CollisionWorld, ContactCallbacks, ContactHandler,
            ContactReport, InfiniteEdge, LayerId, QueryFilter, Shape, ShapeDesc, Side, Space,
            SpaceRef,
        },
        tilemap::{
            find_sections, GridSection, HitboxReplacements, TileGrid, TileHitboxes,
            TileTemplate, TilemapError,
        },
        debug::{CollisionDebugVisualizer, DebugDraw, DebugDrawSystem, DebugShape},
    };
}
