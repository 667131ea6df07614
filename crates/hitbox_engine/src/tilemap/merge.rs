//! Greedy cell merging
//!
//! Scans the grid row by row. From every cell not yet consumed it runs right
//! while the neighbours join the seed's row, then absorbs whole rows below
//! while every cell under the run joins the seed's column. The block is
//! consumed and emitted, and the scan carries on from the next cell; every
//! earlier cell is already consumed, so this produces the same blocks as
//! restarting from the top.

use crate::core::config::TileMapSettings;
use crate::foundation::math::{scale_ivec, IVec2};
use crate::physics::collision::InfiniteEdge;
use super::grid::{TileGrid, TileTemplate};

/// A rectangle of cells sharing one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBlock {
    /// Column of the top-left cell
    pub x: usize,
    /// Row of the top-left cell
    pub y: usize,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// `Left` when touching column 0, `Right` when touching the last column
    pub infinite_x: InfiniteEdge,
    /// `Left` when touching row 0, `Right` when touching the last row
    pub infinite_y: InfiniteEdge,
    /// Template of the seed cell
    pub template: TileTemplate,
}

impl MergedBlock {
    /// Hitbox offset in world units
    pub fn offset(&self, settings: &TileMapSettings) -> IVec2 {
        let cell = IVec2::new(self.x as i32, self.y as i32);
        self.template.offset + scale_ivec(cell, settings.cell_size) + settings.origin
    }

    /// Hitbox size in world units
    pub fn size(&self) -> IVec2 {
        scale_ivec(self.template.size, IVec2::new(self.width as i32, self.height as i32))
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

fn border_flag(start: usize, len: usize, total: usize) -> InfiniteEdge {
    if start == 0 {
        InfiniteEdge::Left
    } else if start + len >= total {
        InfiniteEdge::Right
    } else {
        InfiniteEdge::Center
    }
}

fn free_cell<'g>(
    grid: &'g TileGrid<TileTemplate>,
    consumed: &[bool],
    x: usize,
    y: usize,
) -> Option<&'g TileTemplate> {
    if consumed[y * grid.width() + x] {
        None
    } else {
        grid.get(x, y)
    }
}

/// Merge the occupied cells of `grid` into as few blocks as the greedy scan
/// finds, each flagged infinite toward the grid border it touches
pub fn merge_cells(grid: &TileGrid<TileTemplate>) -> Vec<MergedBlock> {
    let (width, height) = (grid.width(), grid.height());
    let mut consumed = vec![false; width * height];
    let mut blocks = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let Some(seed) = free_cell(grid, &consumed, x, y) else {
                continue;
            };

            let mut run = 1;
            while x + run < width
                && free_cell(grid, &consumed, x + run, y).is_some_and(|cell| seed.joins_row(cell))
            {
                run += 1;
            }

            let mut rows = 1;
            while y + rows < height
                && (0..run).all(|k| {
                    free_cell(grid, &consumed, x + k, y + rows).is_some_and(|cell| seed.joins_column(cell))
                })
            {
                rows += 1;
            }

            for by in y..y + rows {
                for bx in x..x + run {
                    consumed[by * width + bx] = true;
                }
            }

            blocks.push(MergedBlock {
                x,
                y,
                width: run,
                height: rows,
                infinite_x: border_flag(x, run, width),
                infinite_y: border_flag(y, rows, height),
                template: seed.clone(),
            });
        }
    }

    blocks
}

/// One bounded 1x1 block per occupied cell, for when merging is disabled
pub fn split_cells(grid: &TileGrid<TileTemplate>) -> Vec<MergedBlock> {
    grid.iter()
        .map(|(x, y, template)| MergedBlock {
            x,
            y,
            width: 1,
            height: 1,
            infinite_x: InfiniteEdge::Center,
            infinite_y: InfiniteEdge::Center,
            template: template.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision_layers::LayerId;
    use crate::tilemap::grid::HitboxReplacements;

    fn ground() -> TileTemplate {
        TileTemplate::new("ground", IVec2::new(16, 16))
    }

    fn grid(rows: &[&str]) -> TileGrid<TileTemplate> {
        let replacements = HitboxReplacements::from([
            ('#', ground()),
            ('=', TileTemplate::new("ground", IVec2::new(16, 8))),
            ('L', ground().on_layer(LayerId::TWO)),
        ]);
        TileGrid::from_rows(rows, &replacements, '.').unwrap()
    }

    #[test]
    fn test_interior_block_merges_into_one() {
        let blocks = merge_cells(&grid(&[
            ".....",
            ".###.",
            ".###.",
            ".....",
        ]));
        assert_eq!(blocks.len(), 1);

        let block = &blocks[0];
        assert_eq!((block.x, block.y, block.width, block.height), (1, 1, 3, 2));
        assert_eq!(block.infinite_x, InfiniteEdge::Center);
        assert_eq!(block.infinite_y, InfiniteEdge::Center);
        assert_eq!(block.size(), IVec2::new(48, 32));

        let settings = TileMapSettings::new(IVec2::new(16, 16)).with_origin(IVec2::new(100, 200));
        assert_eq!(block.offset(&settings), IVec2::new(116, 216));
    }

    #[test]
    fn test_border_blocks_are_flagged() {
        let blocks = merge_cells(&grid(&[
            "#...",
            "#...",
            "..##",
        ]));
        assert_eq!(blocks.len(), 2);

        assert_eq!((blocks[0].x, blocks[0].y, blocks[0].width, blocks[0].height), (0, 0, 1, 2));
        assert_eq!(blocks[0].infinite_x, InfiniteEdge::Left);
        assert_eq!(blocks[0].infinite_y, InfiniteEdge::Left);

        assert_eq!((blocks[1].x, blocks[1].y, blocks[1].width, blocks[1].height), (2, 2, 2, 1));
        assert_eq!(blocks[1].infinite_x, InfiniteEdge::Right);
        assert_eq!(blocks[1].infinite_y, InfiniteEdge::Right);
    }

    #[test]
    fn test_l_shape_yields_two_blocks() {
        let blocks = merge_cells(&grid(&[
            "....",
            ".#..",
            ".###",
            "....",
        ]));
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].x, blocks[0].y, blocks[0].width, blocks[0].height), (1, 1, 1, 2));
        assert_eq!((blocks[1].x, blocks[1].y, blocks[1].width, blocks[1].height), (2, 2, 2, 1));
        let covered: usize = blocks.iter().map(MergedBlock::cell_count).sum();
        assert_eq!(covered, 4);
    }

    #[test]
    fn test_different_templates_do_not_merge() {
        let blocks = merge_cells(&grid(&[
            ".....",
            ".#L#.",
            ".....",
        ]));
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].template.layer, LayerId::TWO);
    }

    #[test]
    fn test_row_run_requires_same_height() {
        // Same tag and layer but half-height: breaks the run, yet the rows
        // below only compare widths
        let blocks = merge_cells(&grid(&[
            ".....",
            ".#=#.",
            ".###.",
            ".....",
        ]));
        assert_eq!(blocks.len(), 3);
        assert_eq!((blocks[0].x, blocks[0].width, blocks[0].height), (1, 1, 2));
        assert_eq!((blocks[1].x, blocks[1].width, blocks[1].height), (2, 1, 2));
        assert_eq!(blocks[1].size(), IVec2::new(16, 16));
        assert_eq!((blocks[2].x, blocks[2].width, blocks[2].height), (3, 1, 2));
    }

    #[test]
    fn test_rows_below_only_join_under_the_whole_run() {
        let blocks = merge_cells(&grid(&[
            ".......",
            ".###...",
            ".##....",
            ".......",
        ]));
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].width, blocks[0].height), (3, 1));
        assert_eq!((blocks[1].x, blocks[1].y, blocks[1].width), (1, 2, 2));
    }

    #[test]
    fn test_split_cells_emits_one_per_cell() {
        let blocks = split_cells(&grid(&["#.#", "###"]));
        assert_eq!(blocks.len(), 5);
        assert!(blocks.iter().all(|b| b.cell_count() == 1 && b.infinite_x == InfiniteEdge::Center));
        assert_eq!(blocks[0].size(), IVec2::new(16, 16));
    }
}
