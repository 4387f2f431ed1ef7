use alloc::vec::Vec;

use super::*;

/// Installs a fixed set of mines, for replaying a known board.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMineGenerator {
    mines: Vec<CellIndex>,
}

impl PresetMineGenerator {
    pub fn new(mines: impl Into<Vec<CellIndex>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for PresetMineGenerator {
    fn generate(&mut self, config: GameConfig, safe_index: CellIndex) -> Result<Board> {
        check_placement(&config, safe_index)?;
        if self.mines.contains(&safe_index) {
            log::warn!("Preset puts a mine on the safe cell {}", safe_index);
            return Err(GameError::InvalidMineCount);
        }

        let board = Board::from_mine_indices(config.rows, config.columns, &self.mines)?;
        if board.mine_count() != config.mines {
            return Err(GameError::InvalidMineCount);
        }
        Ok(board)
    }
}
