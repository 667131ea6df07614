//! # Engine Configuration
//!
//! Tunables for the collision world, the debug visualizer and tile hitbox
//! generation. Every struct uses `#[serde(default)]` so partial files only
//! override what they mention.
//!
//! ```toml
//! edge_alignment_tolerance = 1.5
//!
//! [tilemap]
//! cell_size = [8, 8]
//! merge = false
//! ```

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::{colors, Color, IVec2, Vec2};
use crate::physics::collision_layers::CollisionLayers;

/// # Collision Configuration
///
/// Top-level settings applied to a
/// [`CollisionWorld`](crate::physics::CollisionWorld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Two colliders count as one flat surface in `advanced_check` when their
    /// facing edges differ by less than this many units
    pub edge_alignment_tolerance: f32,
    /// Debug color of each layer
    pub layer_colors: [Color; CollisionLayers::COUNT],
    /// Debug visualizer settings
    pub debug: DebugConfig,
    /// Tile hitbox generation settings
    pub tilemap: TileMapSettings,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            edge_alignment_tolerance: 2.0,
            layer_colors: [colors::red(), colors::green(), colors::blue()],
            debug: DebugConfig::default(),
            tilemap: TileMapSettings::default(),
        }
    }
}

impl CollisionConfig {
    /// Set the edge alignment tolerance
    pub fn with_edge_alignment_tolerance(mut self, tolerance: f32) -> Self {
        self.edge_alignment_tolerance = tolerance;
        self
    }

    /// Set tile generation settings
    pub fn with_tilemap(mut self, tilemap: TileMapSettings) -> Self {
        self.tilemap = tilemap;
        self
    }
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.edge_alignment_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "edge_alignment_tolerance must be non-negative, got {}",
                self.edge_alignment_tolerance
            )));
        }

        self.debug.validate()?;
        self.tilemap.validate()?;

        Ok(())
    }
}

/// # Debug Visualizer Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Visible area in world units, used to clip infinite lines
    pub viewport: Vec2,
    /// Draw marker lines on infinite rectangle edges
    pub show_infinite_edges: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(320.0, 180.0),
            show_infinite_edges: true,
        }
    }
}

impl DebugConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "debug viewport must be positive, got {}x{}",
                self.viewport.x, self.viewport.y
            )));
        }
        Ok(())
    }
}

/// # Tile Hitbox Settings
///
/// Grid geometry used when turning a tile grid into rectangle hitboxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileMapSettings {
    /// Size of one grid cell in world units
    pub cell_size: IVec2,
    /// World position of the grid's top-left corner
    pub origin: IVec2,
    /// Merge neighbouring cells into larger rectangles
    pub merge: bool,
}

impl Default for TileMapSettings {
    fn default() -> Self {
        Self {
            cell_size: IVec2::new(16, 16),
            origin: IVec2::zeros(),
            merge: true,
        }
    }
}

impl TileMapSettings {
    /// Create settings with the given cell size
    pub fn new(cell_size: IVec2) -> Self {
        Self {
            cell_size,
            ..Default::default()
        }
    }

    /// Set the grid origin
    pub fn with_origin(mut self, origin: IVec2) -> Self {
        self.origin = origin;
        self
    }

    /// Enable or disable merging
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size.x <= 0 || self.cell_size.y <= 0 {
            return Err(ConfigError::Invalid(format!(
                "tile cell size must be positive, got {}x{}",
                self.cell_size.x, self.cell_size.y
            )));
        }
        Ok(())
    }
}
