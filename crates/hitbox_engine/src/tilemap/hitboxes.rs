//! Generated tile hitboxes
//!
//! Spawns one static rectangle per block into a world and keeps the handles
//! so the whole level can be switched off, back on, or unloaded at once.

use crate::core::config::TileMapSettings;
use crate::foundation::collections::ShapeHandle;
use crate::physics::{CollisionError, CollisionWorld, ShapeDesc, Space, SpaceRef};
use super::grid::{TileGrid, TileTemplate};
use super::merge::{merge_cells, split_cells, MergedBlock};

/// Hitboxes generated from a tile grid
#[derive(Debug, Clone)]
pub struct TileHitboxes {
    anchor: SpaceRef,
    blocks: Vec<MergedBlock>,
    handles: Vec<ShapeHandle>,
}

impl TileHitboxes {
    /// Spawn hitboxes for every occupied cell of `grid`
    ///
    /// With `settings.merge` neighbouring cells are merged and border blocks
    /// made infinite; without it every cell gets its own bounded rectangle.
    /// All hitboxes are static and bound to one anchor space at the world
    /// origin, so their offsets are their world positions.
    pub fn generate(world: &mut CollisionWorld, grid: &TileGrid<TileTemplate>, settings: &TileMapSettings) -> Self {
        let anchor = Space::default().into_shared();
        let blocks = if settings.merge {
            merge_cells(grid)
        } else {
            split_cells(grid)
        };

        let handles = blocks
            .iter()
            .map(|block| {
                world.spawn(
                    ShapeDesc::rectangle(&anchor)
                        .with_tag(block.template.tag.clone())
                        .on_layer(block.template.layer)
                        .with_offset(block.offset(settings))
                        .with_size_lock(block.size())
                        .with_infinite(block.infinite_x, block.infinite_y)
                        .as_static(),
                )
            })
            .collect::<Vec<_>>();

        log::info!(
            "Generated {} tile hitbox(es) from {} cell(s){}",
            handles.len(),
            grid.occupied_count(),
            if settings.merge { "" } else { " without merging" }
        );

        Self { anchor, blocks, handles }
    }

    /// Shared anchor space every hitbox is bound to
    pub fn anchor(&self) -> &SpaceRef {
        &self.anchor
    }

    /// Handles in generation order
    pub fn handles(&self) -> &[ShapeHandle] {
        &self.handles
    }

    /// Blocks in generation order, parallel to [`handles`](Self::handles)
    pub fn blocks(&self) -> &[MergedBlock] {
        &self.blocks
    }

    /// Number of hitboxes
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no hitbox was generated
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Destroy every hitbox
    pub fn destroy_all(&self, world: &mut CollisionWorld) -> Result<(), CollisionError> {
        for handle in &self.handles {
            world.destroy(*handle)?;
        }
        Ok(())
    }

    /// Reactivate every hitbox
    pub fn reactivate_all(&self, world: &mut CollisionWorld) -> Result<(), CollisionError> {
        for handle in &self.handles {
            world.reactivate(*handle)?;
        }
        Ok(())
    }

    /// Remove every hitbox from the world, consuming the set
    pub fn remove_all(self, world: &mut CollisionWorld) -> usize {
        self.handles
            .into_iter()
            .filter(|handle| world.remove(*handle).is_some())
            .count()
    }
}
