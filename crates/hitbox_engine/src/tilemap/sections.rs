//! Connected blocks of occupied cells
//!
//! Used for companion data laid out on its own grid, such as breakable walls:
//! each section becomes one object whose position and size come from the
//! block it covers.

use serde::{Serialize, Deserialize};

use crate::foundation::math::{scale_ivec, IVec2};
use super::grid::TileGrid;

/// Block of cells in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSection {
    /// Column of the top-left cell
    pub x: usize,
    /// Row of the top-left cell
    pub y: usize,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
}

impl GridSection {
    /// Top-left corner in world units
    pub fn position(&self, cell_size: IVec2, origin: IVec2) -> IVec2 {
        scale_ivec(IVec2::new(self.x as i32, self.y as i32), cell_size) + origin
    }

    /// Size in world units
    pub fn size(&self, cell_size: IVec2) -> IVec2 {
        scale_ivec(IVec2::new(self.width as i32, self.height as i32), cell_size)
    }
}

/// Find blocks of occupied cells, scanning row by row.
///
/// From each unvisited occupied cell the block runs right along its row,
/// then down along its first column; the whole `width x height` rectangle is
/// then marked visited.
pub fn find_sections<T>(grid: &TileGrid<T>) -> Vec<GridSection> {
    let (width, height) = (grid.width(), grid.height());
    let mut visited = vec![false; width * height];
    let open = |visited: &[bool], x: usize, y: usize| grid.is_occupied(x, y) && !visited[y * width + x];
    let mut sections = Vec::new();

    for y in 0..height {
        let mut x = 0;
        while x < width {
            if !open(&visited, x, y) {
                x += 1;
                continue;
            }

            let mut run = 1;
            while x + run < width && open(&visited, x + run, y) {
                run += 1;
            }
            let mut rows = 1;
            while y + rows < height && open(&visited, x, y + rows) {
                rows += 1;
            }

            for by in y..y + rows {
                for bx in x..x + run {
                    visited[by * width + bx] = true;
                }
            }
            sections.push(GridSection { x, y, width: run, height: rows });
            x += run;
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_disjoint_blocks() {
        let grid = TileGrid::from_chars(&[
            "##....",
            "##..##",
            "....##",
        ], '.').unwrap();

        let sections = find_sections(&grid);
        assert_eq!(
            sections,
            vec![
                GridSection { x: 0, y: 0, width: 2, height: 2 },
                GridSection { x: 4, y: 1, width: 2, height: 2 },
            ]
        );
    }

    #[test]
    fn test_adjacent_run_is_not_skipped() {
        let grid = TileGrid::from_chars(&["#.#"], '.').unwrap();
        let sections = find_sections(&grid);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].x, 2);
    }

    #[test]
    fn test_world_placement() {
        let section = GridSection { x: 2, y: 1, width: 3, height: 2 };
        assert_eq!(section.position(IVec2::new(8, 8), IVec2::new(4, 0)), IVec2::new(20, 8));
        assert_eq!(section.size(IVec2::new(8, 8)), IVec2::new(24, 16));
    }
}
