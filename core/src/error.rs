use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid needs at least one row and one column")]
    InvalidDimensions,
    #[error("Mine count must be at least 1 and lower than the number of cells")]
    InvalidMineCount,
    #[error("Cell index out of range")]
    OutOfRange,
    #[error("Malformed grid shape")]
    InvalidArgument,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No game in progress")]
    NoGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
