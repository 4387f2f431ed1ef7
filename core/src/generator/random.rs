use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random placement; the same seed always yields the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig, safe_index: CellIndex) -> Result<Board> {
        place_mines(config, safe_index, &mut self.rng)
    }
}

/// Picks `config.mines` distinct cells out of every cell except `safe_index`, without
/// replacement, and computes adjacency counts for the rest.
pub fn place_mines<R: Rng + ?Sized>(
    config: GameConfig,
    safe_index: CellIndex,
    rng: &mut R,
) -> Result<Board> {
    check_placement(&config, safe_index)?;

    let candidates = config.total_cells() - 1;
    let mut mine_mask: Array2<bool> = Array2::default((config.rows, config.columns));
    for pick in index::sample(rng, candidates, config.mines) {
        // candidates skip the safe cell, shift picks past it
        let index = if pick >= safe_index { pick + 1 } else { pick };
        mine_mask[to_row_col(index, config.columns)] = true;
    }

    let board = Board::from_mine_mask(&mine_mask);
    if board.mine_count() != config.mines {
        log::warn!(
            "Generated board count mismatch, actual: {}, requested: {}",
            board.mine_count(),
            config.mines
        );
    }
    log::debug!(
        "Placed {} mines on {}x{}, safe cell {}",
        board.mine_count(),
        config.rows,
        config.columns,
        safe_index
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_cell_never_gets_a_mine() {
        // densest legal board: every cell but the safe one is a mine
        let config = GameConfig::new(3, 3, 8).unwrap();
        for safe_index in 0..9 {
            let board = RandomMineGenerator::new(safe_index as u64)
                .generate(config, safe_index)
                .unwrap();
            assert!(!board.contains_mine(safe_index));
            assert_eq!(board.mine_count(), 8);
            assert_eq!(
                board.value_at(safe_index).unwrap(),
                CellValue::Adjacent(NeighborIter::new(9, safe_index, 3).count() as u8)
            );
        }
    }

    #[test]
    fn exact_mine_count_over_many_seeds() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        for seed in 0..50 {
            let board = RandomMineGenerator::new(seed).generate(config, 40).unwrap();
            assert_eq!(board.mine_count(), 10);
            assert_eq!(board.iter().filter(|value| value.is_mine()).count(), 10);
            assert!(!board.contains_mine(40));
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::new(8, 8, 12).unwrap();
        let a = RandomMineGenerator::new(7).generate(config, 0).unwrap();
        let b = RandomMineGenerator::new(7).generate(config, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let mut generator = RandomMineGenerator::new(0);
        let too_many = GameConfig::new_unchecked(2, 2, 4);
        let none = GameConfig::new_unchecked(2, 2, 0);
        let flat = GameConfig::new_unchecked(0, 2, 1);
        let ok = GameConfig::new(2, 2, 1).unwrap();

        assert_eq!(generator.generate(too_many, 0), Err(GameError::InvalidMineCount));
        assert_eq!(generator.generate(none, 0), Err(GameError::InvalidMineCount));
        assert_eq!(generator.generate(flat, 0), Err(GameError::InvalidDimensions));
        assert_eq!(generator.generate(ok, 4), Err(GameError::OutOfRange));
    }
}
