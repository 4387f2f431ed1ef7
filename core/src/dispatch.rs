use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Requests a collaborator (UI, CLI, test) may issue against a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start {
        rows: Dim,
        columns: Dim,
        mines: usize,
    },
    Reset,
    Repeat,
    Tick {
        delta_ms: Millis,
    },
    OpenCell {
        index: CellIndex,
        is_user_activity: bool,
    },
    ToggleFlag {
        index: CellIndex,
    },
}

/// Everything that flows through the pipeline: intents plus the actions the pipeline
/// synthesizes on its own.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Action {
    Start(GameConfig),
    Reset,
    Repeat,
    Tick(Millis),
    OpenCell {
        index: CellIndex,
        is_user_activity: bool,
    },
    ToggleFlag(CellIndex),
    ConstructGrid(Board),
    /// Opens a mine after a loss, flagged or not.
    RevealMine(CellIndex),
    Finish(GameStatus),
}

impl From<Intent> for Action {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Start {
                rows,
                columns,
                mines,
            } => Self::Start(GameConfig::new_unchecked(rows, columns, mines)),
            Intent::Reset => Self::Reset,
            Intent::Repeat => Self::Repeat,
            Intent::Tick { delta_ms } => Self::Tick(delta_ms),
            Intent::OpenCell {
                index,
                is_user_activity,
            } => Self::OpenCell {
                index,
                is_user_activity,
            },
            Intent::ToggleFlag { index } => Self::ToggleFlag(index),
        }
    }
}

pub(crate) type FollowUps = SmallVec<[Action; 8]>;

pub(crate) enum Flow {
    /// Pass this action on to the next stage.
    Continue(Action),
    /// Drop the action and process these instead, in order.
    Replace(FollowUps),
}

/// Runs before the session sees an action and may replace it.
type Rewrite = fn(&Session, &mut dyn MineGenerator, Action) -> Result<Flow>;

/// Runs after the session applied an action and may queue follow-ups.
type React = fn(&Session, &Action, &mut FollowUps);

const REWRITES: [Rewrite; 2] = [repeat_game, construct_grid];
const REACTIONS: [React; 1] = [reveal_cascade];

/// A repeat is a start with the current shape and mine count.
fn repeat_game(session: &Session, _: &mut dyn MineGenerator, action: Action) -> Result<Flow> {
    match action {
        Action::Repeat => {
            let config = session.config().ok_or(GameError::InvalidDimensions)?;
            Ok(Flow::Replace(smallvec![Action::Start(config)]))
        }
        other => Ok(Flow::Continue(other)),
    }
}

/// Mines are placed on the first open, around the opened cell, then the open is retried.
fn construct_grid(
    session: &Session,
    generator: &mut dyn MineGenerator,
    action: Action,
) -> Result<Flow> {
    let Action::OpenCell { index, .. } = action else {
        return Ok(Flow::Continue(action));
    };
    let (Some(config), Some(grid)) = (session.config(), session.grid()) else {
        return Ok(Flow::Continue(action));
    };
    // a flagged cell does not open, so it must not fix the board either
    if grid.is_constructed() || grid.cell_at(index)?.is_flagged() {
        return Ok(Flow::Continue(action));
    }

    let board = generator.generate(config, index)?;
    if board.contains_mine(index) || board.mine_count() != config.mines {
        log::warn!(
            "Rejected board for first open at {}, mines: {}, requested: {}",
            index,
            board.mine_count(),
            config.mines
        );
        return Err(GameError::InvalidMineCount);
    }
    Ok(Flow::Replace(smallvec![Action::ConstructGrid(board), action]))
}

/// Floods zero regions, ends the game on a clicked mine or on the last safe cell.
fn reveal_cascade(session: &Session, action: &Action, follow_ups: &mut FollowUps) {
    let Action::OpenCell {
        index,
        is_user_activity,
    } = *action
    else {
        return;
    };
    let Ok(cell) = session.cell_at(index) else {
        return;
    };
    let Some(grid) = session.grid() else {
        return;
    };

    match cell.value() {
        None => {}
        Some(CellValue::Mine) => {
            // a mine opened by the system is only ever a reveal
            if is_user_activity {
                follow_ups.push(Action::Finish(GameStatus::GameOver));
                follow_ups.extend(grid.unopened_mines().map(Action::RevealMine));
            }
        }
        Some(CellValue::Adjacent(count)) => {
            if count == 0 {
                let closed = grid
                    .neighbours_of(index)
                    .filter(|around| !around.is_opened() && !around.is_flagged())
                    .map(|around| Action::OpenCell {
                        index: around.index(),
                        is_user_activity: false,
                    });
                follow_ups.extend(closed);
                log::trace!("Flood from {}, {} queued", index, follow_ups.len());
            }
            if session.status().is_in_progress() && grid.all_safe_cells_opened() {
                follow_ups.push(Action::Finish(GameStatus::Won));
            }
        }
    }
}

/// One game instance: the session and where its mines come from.
///
/// Every intent is resolved completely, derived actions included, before `dispatch` returns.
/// Derived actions run depth-first in the order they were emitted, through an explicit stack
/// instead of recursion so large zero regions cannot exhaust the call stack.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMineGenerator> {
    session: Session,
    generator: G,
}

impl Game<RandomMineGenerator> {
    pub fn new(seed: u64) -> Self {
        Self::with_generator(RandomMineGenerator::new(seed))
    }
}

impl<G: MineGenerator> Game<G> {
    pub fn with_generator(generator: G) -> Self {
        Self {
            session: Session::new(),
            generator,
        }
    }

    /// Read-only view for rendering.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        self.check_intent(intent)?;
        log::trace!("Dispatch {:?}", intent);

        let mut pending: Vec<Action> = vec![intent.into()];
        let mut outcome = Outcome::NoChange;

        'actions: while let Some(mut action) = pending.pop() {
            for rewrite in REWRITES {
                match rewrite(&self.session, &mut self.generator, action)? {
                    Flow::Continue(next) => action = next,
                    Flow::Replace(actions) => {
                        pending.extend(actions.into_iter().rev());
                        continue 'actions;
                    }
                }
            }

            let step = self.session.reduce(&action)?;
            outcome = outcome | step;
            if !step.has_update() {
                continue;
            }

            let mut follow_ups = FollowUps::new();
            for react in REACTIONS {
                react(&self.session, &action, &mut follow_ups);
            }
            pending.extend(follow_ups.into_iter().rev());
        }

        Ok(outcome)
    }

    /// Rejects malformed intents before anything is applied.
    fn check_intent(&self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Start {
                rows,
                columns,
                mines,
            } => GameConfig::new_unchecked(rows, columns, mines).validate(),
            Intent::Repeat => self
                .session
                .config()
                .map(|_| ())
                .ok_or(GameError::InvalidDimensions),
            Intent::OpenCell { index, .. } | Intent::ToggleFlag { index } => {
                self.session.check_move(index).map(|_| ())
            }
            Intent::Reset | Intent::Tick { .. } => Ok(()),
        }
    }

    pub fn start(&mut self, config: GameConfig) -> Result<Outcome> {
        self.dispatch(Intent::Start {
            rows: config.rows,
            columns: config.columns,
            mines: config.mines,
        })
    }

    pub fn reset(&mut self) -> Result<Outcome> {
        self.dispatch(Intent::Reset)
    }

    pub fn repeat(&mut self) -> Result<Outcome> {
        self.dispatch(Intent::Repeat)
    }

    pub fn tick(&mut self, delta_ms: Millis) -> Result<Outcome> {
        self.dispatch(Intent::Tick { delta_ms })
    }

    /// A player click on a cell.
    pub fn open(&mut self, index: CellIndex) -> Result<Outcome> {
        self.dispatch(Intent::OpenCell {
            index,
            is_user_activity: true,
        })
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<Outcome> {
        self.dispatch(Intent::ToggleFlag { index })
    }
}
