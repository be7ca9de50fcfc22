#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Validated session parameters: grid dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Rejects any configuration that cannot host a playable session:
    /// empty dimensions, zero mines, or a fully (over)mined grid.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> GridPos {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(9, 9, 10)
    }
}

/// Ground truth of a session: where the mines are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mask: Array2<bool>,
    count: CellCount,
}

impl MineField {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self { mask, count }
    }

    pub fn from_mine_coords(size: GridPos, mine_coords: &[GridPos]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &pos in mine_coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::MineOutOfBounds);
            }
            mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> GridPos {
        let dim = self.mask.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        let (rows, cols) = self.size();
        pos.0 < rows && pos.1 < cols
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn contains_mine(&self, pos: GridPos) -> bool {
        self.mask[pos.to_nd_index()]
    }

    /// Number of mines in the 8-neighborhood of `pos`. Pure function of the
    /// mine mask, never exceeds the number of in-bounds neighbors.
    pub fn adjacent_mine_count(&self, pos: GridPos) -> u8 {
        self.mask
            .iter_neighbors(pos)
            .filter(|&n| self.contains_mine(n))
            .count() as u8
    }
}
