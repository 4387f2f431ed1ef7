use std::str::FromStr;

use minegrid_core::{CellIndex, Dim, GameError};

use crate::form::NewGameForm;

/// A cell as typed: a flat index, or a `row col` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Index(CellIndex),
    RowCol(Dim, Dim),
}

impl Target {
    pub fn resolve(self, columns: Dim) -> Result<CellIndex, GameError> {
        match self {
            Self::Index(index) => Ok(index),
            Self::RowCol(_, col) if col >= columns => Err(GameError::OutOfRange),
            Self::RowCol(row, col) => row
                .checked_mul(columns)
                .and_then(|start| start.checked_add(col))
                .ok_or(GameError::OutOfRange),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start(NewGameForm),
    Open(Target),
    Flag(Target),
    Repeat,
    Reset,
    Show,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start <rows> <columns> <mines>   new game
  open <index> | open <row> <col>  open a cell (alias: o)
  flag <index> | flag <row> <col>  toggle a flag (alias: f)
  repeat                           same game again
  reset                            back to the new-game form
  show | json | help | quit";

fn number<T: FromStr>(word: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("not a valid number: {word}"))
}

fn target(args: &[&str]) -> Result<Target, String> {
    match args {
        [index] => Ok(Target::Index(number(index)?)),
        [row, col] => Ok(Target::RowCol(number(row)?, number(col)?)),
        _ => Err("expected a cell index or a row and a column".to_string()),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(Self::Show);
        };

        match (name.to_ascii_lowercase().as_str(), args) {
            ("start" | "new", [rows, columns, mines]) => Ok(Self::Start(NewGameForm {
                rows: number(rows)?,
                columns: number(columns)?,
                mines: number(mines)?,
            })),
            ("start" | "new", _) => Err("usage: start <rows> <columns> <mines>".to_string()),
            ("open" | "o", args) => Ok(Self::Open(target(args)?)),
            ("flag" | "f", args) => Ok(Self::Flag(target(args)?)),
            ("repeat" | "retry", []) => Ok(Self::Repeat),
            ("reset" | "exit", []) => Ok(Self::Reset),
            ("show", []) => Ok(Self::Show),
            ("json", []) => Ok(Self::Json),
            ("help" | "?", []) => Ok(Self::Help),
            ("quit" | "q", []) => Ok(Self::Quit),
            (other, _) => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}
