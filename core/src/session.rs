use serde::{Deserialize, Serialize};

use crate::dispatch::Action;
use crate::*;

/// Valid transitions:
/// - Selection -> InProgress (start)
/// - InProgress -> Won | GameOver (only through an opened cell)
/// - any -> InProgress (start, repeat)
/// - any -> Selection (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No game yet, the new-game form is showing
    #[default]
    Selection,
    InProgress,
    Won,
    GameOver,
}

impl GameStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::GameOver)
    }
}

/// The full state of one game, from start to its outcome or a reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: Option<GameConfig>,
    status: GameStatus,
    elapsed: Millis,
    grid: Option<Grid>,
}

impl Session {
    /// The default session: selection screen, no grid.
    pub fn new() -> Self {
        Self::default()
    }

    fn start(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Some(config),
            status: GameStatus::InProgress,
            elapsed: 0,
            grid: Some(Grid::new(config.rows, config.columns)?),
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed_ms(&self) -> Millis {
        self.elapsed
    }

    pub fn config(&self) -> Option<GameConfig> {
        self.config
    }

    pub fn row_count(&self) -> Option<Dim> {
        self.config.map(|config| config.rows)
    }

    pub fn column_count(&self) -> Option<Dim> {
        self.config.map(|config| config.columns)
    }

    pub fn mine_count(&self) -> Option<usize> {
        self.config.map(|config| config.mines)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<&Cell> {
        self.grid.as_ref().ok_or(GameError::NoGame)?.cell_at(index)
    }

    pub fn flagged_cell_count(&self) -> usize {
        self.grid.as_ref().map_or(0, Grid::flagged_count)
    }

    /// How many flags can still be placed; the counter shown next to the timer.
    pub fn remaining_flags(&self) -> isize {
        let mines = self.mine_count().unwrap_or(0);
        (mines as isize) - (self.flagged_cell_count() as isize)
    }

    /// Checks that a player move on `index` can be applied right now.
    pub(crate) fn check_move(&self, index: CellIndex) -> Result<CellIndex> {
        let grid = self.grid.as_ref().ok_or(GameError::NoGame)?;
        let index = grid.validate_index(index)?;
        if self.status.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        Ok(index)
    }

    fn grid_mut(&mut self) -> Result<&mut Grid> {
        self.grid.as_mut().ok_or(GameError::NoGame)
    }

    /// Applies a single action. Follow-up actions are the dispatcher's business.
    pub(crate) fn reduce(&mut self, action: &Action) -> Result<Outcome> {
        use Outcome::*;

        Ok(match *action {
            Action::Start(config) => {
                *self = Self::start(config)?;
                log::debug!(
                    "Started {}x{} game with {} mines",
                    config.rows,
                    config.columns,
                    config.mines
                );
                Changed
            }
            Action::Reset => {
                *self = Self::default();
                log::debug!("Session reset");
                Changed
            }
            // rewritten into a start before it gets here
            Action::Repeat => NoChange,
            Action::Tick(delta) => {
                if !self.status.is_in_progress() {
                    log::trace!("Ignoring tick of {}ms while {:?}", delta, self.status);
                    return Ok(NoChange);
                }
                self.elapsed = self.elapsed.saturating_add(delta);
                if delta > 0 { Changed } else { NoChange }
            }
            Action::ToggleFlag(index) => self.toggle_flag(index)?,
            Action::ConstructGrid(ref board) => {
                let grid = self.grid_mut()?;
                if grid.is_constructed() {
                    log::warn!("Grid already constructed, ignoring new board");
                    return Ok(NoChange);
                }
                grid.install(board)?;
                Changed
            }
            Action::OpenCell {
                index,
                is_user_activity,
            } => {
                let at = self.elapsed;
                let cell = self.grid_mut()?.cell_mut(index)?;
                if cell.value().is_none() || cell.is_opened() || cell.is_flagged() {
                    return Ok(NoChange);
                }
                cell.open(is_user_activity, at);
                log::trace!("Opened cell {} (user: {})", index, is_user_activity);
                Changed
            }
            Action::RevealMine(index) => {
                let at = self.elapsed;
                let cell = self.grid_mut()?.cell_mut(index)?;
                if cell.is_opened() {
                    return Ok(NoChange);
                }
                cell.open(false, at);
                Changed
            }
            Action::Finish(status) => {
                if !status.is_finished() || !self.status.is_in_progress() {
                    log::warn!("Ignoring finish as {:?} while {:?}", status, self.status);
                    return Ok(NoChange);
                }
                self.status = status;
                log::debug!("Game finished: {:?} after {}ms", status, self.elapsed);
                match status {
                    GameStatus::Won => Won,
                    _ => Lost,
                }
            }
        })
    }

    fn toggle_flag(&mut self, index: CellIndex) -> Result<Outcome> {
        let budget = self.mine_count().unwrap_or(0);
        let grid = self.grid_mut()?;
        let flagged = grid.flagged_count();
        let cell = grid.cell_mut(index)?;

        if cell.is_opened() {
            return Ok(Outcome::NoChange);
        }
        if !cell.is_flagged() && flagged >= budget {
            log::debug!("No flags left for cell {}", index);
            return Ok(Outcome::Refused);
        }
        cell.toggle_flag();
        Ok(Outcome::Changed)
    }
}
