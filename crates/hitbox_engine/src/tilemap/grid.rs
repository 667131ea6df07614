//! Tile templates and grids

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::foundation::math::IVec2;
use crate::physics::collision_layers::LayerId;
use super::TilemapError;

/// Hitbox prototype for one kind of tile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileTemplate {
    /// Tag given to generated hitboxes
    pub tag: String,
    /// Layer generated hitboxes are registered on
    #[serde(default)]
    pub layer: LayerId,
    /// Hitbox size of a single cell
    pub size: IVec2,
    /// Offset of the hitbox inside its cell
    #[serde(default = "IVec2::zeros")]
    pub offset: IVec2,
}

impl TileTemplate {
    /// Template on layer 0 with no offset
    pub fn new(tag: impl Into<String>, size: IVec2) -> Self {
        Self {
            tag: tag.into(),
            layer: LayerId::ZERO,
            size,
            offset: IVec2::zeros(),
        }
    }

    /// Set the layer
    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer = layer;
        self
    }

    /// Set the in-cell offset
    pub fn with_offset(mut self, offset: IVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Whether `other` may extend this template's horizontal run
    pub(crate) fn joins_row(&self, other: &TileTemplate) -> bool {
        self.tag == other.tag && self.layer == other.layer && self.size.y == other.size.y
    }

    /// Whether `other` may extend this template's block downward
    pub(crate) fn joins_column(&self, other: &TileTemplate) -> bool {
        self.tag == other.tag && self.layer == other.layer && self.size.x == other.size.x
    }
}

/// Map from grid key to the template it stands for
pub type HitboxReplacements = HashMap<char, TileTemplate>;

/// Row-major grid of optional cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T> TileGrid<T> {
    /// Empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: (0..width * height).map(|_| None).collect(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Cell content, `None` when empty or out of range
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Whether a cell holds something
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    /// Replace a cell; returns `false` when out of range
    pub fn set(&mut self, x: usize, y: usize, value: Option<T>) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Occupied cells as `(x, y, value)`, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|value| (i % width, i / width, value)))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Convert every occupied cell, stopping at the first error
    pub fn try_map<U, E>(&self, mut f: impl FnMut(usize, usize, &T) -> Result<U, E>) -> Result<TileGrid<U>, E> {
        let mut out = TileGrid::new(self.width, self.height);
        for (x, y, value) in self.iter() {
            out.set(x, y, Some(f(x, y, value)?));
        }
        Ok(out)
    }
}

impl TileGrid<char> {
    /// Grid of raw keys from text rows; `empty` marks cells without a tile
    pub fn from_chars<S: AsRef<str>>(rows: &[S], empty: char) -> Result<Self, TilemapError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(TilemapError::EmptyGrid);
        }

        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(TilemapError::RaggedRow { row: y, expected: width, found });
            }
            for (x, key) in row.as_ref().chars().enumerate() {
                if key != empty {
                    grid.set(x, y, Some(key));
                }
            }
        }
        Ok(grid)
    }
}

impl TileGrid<TileTemplate> {
    /// Grid of templates from text rows, resolving keys through
    /// `replacements`
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        replacements: &HitboxReplacements,
        empty: char,
    ) -> Result<Self, TilemapError> {
        TileGrid::from_chars(rows, empty)?.try_map(|x, y, key| {
            replacements
                .get(key)
                .cloned()
                .ok_or(TilemapError::UnknownTileKey { key: *key, x, y })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements() -> HitboxReplacements {
        HitboxReplacements::from([
            ('#', TileTemplate::new("ground", IVec2::new(16, 16))),
            ('^', TileTemplate::new("spike", IVec2::new(16, 8)).with_offset(IVec2::new(0, 8)).on_layer(LayerId::ONE)),
        ])
    }

    #[test]
    fn test_from_rows_resolves_templates() {
        let grid = TileGrid::from_rows(&["..^", "###"], &replacements(), '.').unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.get(0, 0).is_none());
        assert_eq!(grid.get(2, 0).unwrap().tag, "spike");
        assert_eq!(grid.get(1, 1).unwrap().tag, "ground");
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn test_unknown_key_reports_position() {
        let err = TileGrid::from_rows(&["#.", ".x"], &replacements(), '.').unwrap_err();
        assert_eq!(err, TilemapError::UnknownTileKey { key: 'x', x: 1, y: 1 });
    }

    #[test]
    fn test_ragged_and_empty_input() {
        let ragged = TileGrid::from_chars(&["###", "##"], '.').unwrap_err();
        assert_eq!(ragged, TilemapError::RaggedRow { row: 1, expected: 3, found: 2 });

        let none: [&str; 0] = [];
        assert_eq!(TileGrid::from_chars(&none, '.').unwrap_err(), TilemapError::EmptyGrid);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = TileGrid::from_chars(&["a.b", "c.."], '.').unwrap();
        let cells: Vec<_> = grid.iter().map(|(x, y, key)| (x, y, *key)).collect();
        assert_eq!(cells, vec![(0, 0, 'a'), (2, 0, 'b'), (0, 1, 'c')]);
    }

    #[test]
    fn test_template_deserializes_with_defaults() {
        let template: TileTemplate = ron::from_str("(tag: \"ground\", size: (16, 16))").unwrap();
        assert_eq!(template, TileTemplate::new("ground", IVec2::new(16, 16)));

        let spikes: TileTemplate = ron::from_str("(tag: \"spike\", layer: 1, size: (16, 8), offset: (0, 8))").unwrap();
        assert_eq!(spikes.layer, LayerId::ONE);
        assert_eq!(spikes.offset, IVec2::new(0, 8));
    }

    #[test]
    fn test_template_ron_round_trip() {
        let template = TileTemplate::new("spike", IVec2::new(16, 8))
            .with_offset(IVec2::new(0, 8))
            .on_layer(LayerId::TWO);
        let text = ron::to_string(&template).unwrap();
        let parsed: TileTemplate = ron::from_str(&text).unwrap();
        assert_eq!(parsed, template);
    }
}
