use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The cells of one session, addressed by flat row-major index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Grid of unset, unopened cells.
    pub fn new(rows: Dim, columns: Dim) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let cells = Array2::from_shape_fn((rows, columns), |(row, col)| {
            Cell::new(row * columns + col)
        });
        Ok(Self { cells })
    }

    pub fn rows(&self) -> Dim {
        self.cells.nrows()
    }

    pub fn columns(&self) -> Dim {
        self.cells.ncols()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<&Cell> {
        let index = self.validate_index(index)?;
        Ok(&self.cells[to_row_col(index, self.columns())])
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> Result<&mut Cell> {
        let index = self.validate_index(index)?;
        let columns = self.columns();
        Ok(&mut self.cells[to_row_col(index, columns)])
    }

    /// Cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbour_indices(&self, index: CellIndex) -> NeighborIter {
        if index < self.len() {
            NeighborIter::new(self.len(), index, self.columns())
        } else {
            NeighborIter::empty()
        }
    }

    pub fn neighbours_of(&self, index: CellIndex) -> impl Iterator<Item = &Cell> {
        let columns = self.columns();
        self.neighbour_indices(index)
            .map(move |pos| &self.cells[to_row_col(pos, columns)])
    }

    /// Whether mines have been placed. Placement fills every cell at once, so the first cell
    /// speaks for all of them.
    pub fn is_constructed(&self) -> bool {
        self.cells.iter().next().is_some_and(|cell| cell.value().is_some())
    }

    /// Copies the board values into the cells.
    pub(crate) fn install(&mut self, board: &Board) -> Result<()> {
        if board.size() != (self.rows(), self.columns()) {
            return Err(GameError::InvalidArgument);
        }
        for (cell, value) in self.cells.iter_mut().zip(board.iter()) {
            cell.set_value(value);
        }
        Ok(())
    }

    /// Flags standing on unopened cells.
    pub fn flagged_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.is_flagged() && !cell.is_opened())
            .count()
    }

    pub fn opened_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_opened()).count()
    }

    /// True once every cell without a mine is open. Always false before placement.
    pub fn all_safe_cells_opened(&self) -> bool {
        self.is_constructed()
            && self
                .cells
                .iter()
                .all(|cell| cell.is_opened() || cell.is_mine())
    }

    pub(crate) fn unopened_mines(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine() && !cell.is_opened())
            .map(Cell::index)
    }
}
