#![no_std]

extern crate alloc;

use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clock::*;
pub use dispatch::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod clock;
mod dispatch;
mod error;
mod generator;
mod grid;
mod session;
mod types;

/// Shape and mine count of a game, as entered on the new-game form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Dim,
    pub columns: Dim,
    pub mines: usize,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Dim, columns: Dim, mines: usize) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Dim, columns: Dim, mines: usize) -> Result<Self> {
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    /// Dimensions first, then the mine count: at least one mine and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

/// Mine/adjacency assignment for every cell of a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    values: Array2<CellValue>,
    mine_count: usize,
}

impl Board {
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let (rows, columns) = mine_mask.dim();
        let len = mine_mask.len();
        let is_mine = |index: CellIndex| mine_mask[to_row_col(index, columns)];

        let values = Array2::from_shape_fn((rows, columns), |(row, col)| {
            let index = row * columns + col;
            if is_mine(index) {
                CellValue::Mine
            } else {
                let count = NeighborIter::new(len, index, columns)
                    .filter(|&pos| is_mine(pos))
                    .count();
                // at most 8 neighbours
                CellValue::Adjacent(count as u8)
            }
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();

        Self { values, mine_count }
    }

    /// Builds a board from explicit mine positions. Repeated indices count once.
    pub fn from_mine_indices(rows: Dim, columns: Dim, mines: &[CellIndex]) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let mut mine_mask: Array2<bool> = Array2::default((rows, columns));
        for &index in mines {
            if index >= mine_mask.len() {
                return Err(GameError::OutOfRange);
            }
            mine_mask[to_row_col(index, columns)] = true;
        }
        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn size(&self) -> (Dim, Dim) {
        self.values.dim()
    }

    pub fn total_cells(&self) -> usize {
        self.values.len()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> usize {
        self.total_cells() - self.mine_count
    }

    pub fn value_at(&self, index: CellIndex) -> Result<CellValue> {
        if index >= self.total_cells() {
            return Err(GameError::OutOfRange);
        }
        Ok(self.values[to_row_col(index, self.size().1)])
    }

    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.value_at(index).is_ok_and(CellValue::is_mine)
    }

    /// Values in index order.
    pub fn iter(&self) -> impl Iterator<Item = CellValue> + '_ {
        self.values.iter().copied()
    }
}

/// What a dispatched intent did to the session, merged over every derived action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    /// The intent was understood but refused by a game rule (flag budget spent).
    Refused,
    Changed,
    Won,
    Lost,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Refused => false,
            Changed => true,
            Won => true,
            Lost => true,
        }
    }
}

impl BitOr for Outcome {
    type Output = Outcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use Outcome::*;
        match (self, rhs) {
            (Lost, _) => Lost,
            (_, Lost) => Lost,
            (Won, _) => Won,
            (_, Won) => Won,
            (Changed, _) => Changed,
            (_, Changed) => Changed,
            (Refused, _) => Refused,
            (_, Refused) => Refused,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_validation() {
        assert!(GameConfig::new(2, 2, 1).is_ok());
        assert!(GameConfig::new(2, 2, 3).is_ok());
        assert_eq!(GameConfig::new(0, 2, 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(2, 0, 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(2, 2, 0), Err(GameError::InvalidMineCount));
        assert_eq!(GameConfig::new(2, 2, 4), Err(GameError::InvalidMineCount));
        assert_eq!(GameConfig::new(1, 1, 1), Err(GameError::InvalidMineCount));
    }

    #[test]
    fn board_counts_adjacent_mines() {
        // . * .
        // . . .
        // * . .
        let board = Board::from_mine_indices(3, 3, &[1, 6]).unwrap();
        let raw: Vec<i8> = board.iter().map(CellValue::as_raw).collect();

        assert_eq!(raw, [1, -1, 1, 2, 2, 1, -1, 1, 0]);
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
        assert!(board.contains_mine(6));
        assert!(!board.contains_mine(8));
        assert!(!board.contains_mine(9));
    }

    #[test]
    fn board_rejects_bad_input() {
        assert_eq!(
            Board::from_mine_indices(0, 3, &[]).err(),
            Some(GameError::InvalidDimensions)
        );
        assert_eq!(
            Board::from_mine_indices(2, 2, &[4]).err(),
            Some(GameError::OutOfRange)
        );
    }

    #[test]
    fn duplicate_mine_indices_count_once() {
        let board = Board::from_mine_indices(2, 2, &[3, 3]).unwrap();
        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn outcome_merge_priority() {
        use Outcome::*;
        assert_eq!(Changed | Lost, Lost);
        assert_eq!(Won | Changed, Won);
        assert_eq!(NoChange | Refused, Refused);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!Refused.has_update());
    }
}
