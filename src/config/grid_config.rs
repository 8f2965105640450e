// Grid dimensions and cell coordinates

use serde::{Deserialize, Serialize};

/// Rows and columns of the reveal grid. Both are always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    #[serde(rename = "columns", alias = "cols")]
    pub cols: usize,
}

/// Name used throughout the scheduler for resolved grid sizes
pub type GridDimensions = GridConfig;

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4, // Default grid size
            cols: 4,
        }
    }
}

impl GridConfig {
    /// Create a grid, clamping zero dimensions up to 1
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Re-apply the minimum of 1x1 to a grid that was built field by field
    /// (e.g. deserialized from JSON)
    pub fn clamped(self) -> Self {
        Self::new(self.rows, self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, cell: CardCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CardCell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CardCell::new(row, col)))
    }
}

/// One tile of the grid, identified only by its coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardCell {
    pub row: usize,
    pub col: usize,
}

impl CardCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
