//! Tile map hitbox generation
//!
//! Turns a grid of tile templates into rectangle hitboxes registered in a
//! [`CollisionWorld`](crate::physics::CollisionWorld). Neighbouring cells
//! with the same template are merged into a few large static rectangles,
//! and rectangles touching the grid border are made infinite toward the
//! outside so nothing can slip past the edge of the level.
//!
//! # Module Organization
//!
//! - [`grid`] - Tile templates and the cell grid
//! - [`merge`] - Greedy run-then-row merging of cells into blocks
//! - [`sections`] - Connected block detection for companion data such as
//!   breakable walls
//! - [`hitboxes`] - Spawning, destroying and reactivating generated hitboxes

pub mod grid;
pub mod hitboxes;
pub mod merge;
pub mod sections;

pub use grid::{HitboxReplacements, TileGrid, TileTemplate};
pub use hitboxes::TileHitboxes;
pub use merge::{merge_cells, split_cells, MergedBlock};
pub use sections::{find_sections, GridSection};

/// Errors raised while building a tile grid
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TilemapError {
    /// A grid cell uses a key with no hitbox template
    #[error("No hitbox template for tile '{key}' at ({x}, {y})")]
    UnknownTileKey {
        /// Offending key
        key: char,
        /// Column
        x: usize,
        /// Row
        y: usize,
    },

    /// A row is shorter or longer than the first one
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        found: usize,
    },

    /// No rows, or rows without cells
    #[error("Tile grid has no cells")]
    EmptyGrid,
}
