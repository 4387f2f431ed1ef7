use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Source of the board installed on the first open of a session.
pub trait MineGenerator {
    /// Board for `config` that never has a mine at `safe_index`.
    fn generate(&mut self, config: GameConfig, safe_index: CellIndex) -> Result<Board>;
}

fn check_placement(config: &GameConfig, safe_index: CellIndex) -> Result<()> {
    config.validate()?;
    if safe_index >= config.total_cells() {
        return Err(GameError::OutOfRange);
    }
    Ok(())
}
