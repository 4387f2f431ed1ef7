use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell hides once the board has been generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines among the cell's neighbours, `0..=8`.
    Adjacent(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Encoding used by renderers: `-1` for a mine, otherwise the adjacent mine count.
    pub const fn as_raw(self) -> i8 {
        match self {
            Self::Mine => -1,
            Self::Adjacent(count) => count as i8,
        }
    }
}

/// One grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    index: CellIndex,
    value: Option<CellValue>,
    opened: bool,
    flagged: bool,
    from_user_activity: Option<bool>,
    timestamp: Option<Millis>,
}

impl Cell {
    pub const fn new(index: CellIndex) -> Self {
        Self {
            index,
            value: None,
            opened: false,
            flagged: false,
            from_user_activity: None,
            timestamp: None,
        }
    }

    pub const fn index(&self) -> CellIndex {
        self.index
    }

    /// `None` until mines have been placed.
    pub const fn value(&self) -> Option<CellValue> {
        self.value
    }

    /// `Some(-1)` for a mine, `Some(0..=8)` for a safe cell, `None` before placement.
    pub const fn neighbouring_mines(&self) -> Option<i8> {
        match self.value {
            Some(value) => Some(value.as_raw()),
            None => None,
        }
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.value, Some(CellValue::Mine))
    }

    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    /// Only meaningful while the cell is unopened.
    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn from_user_activity(&self) -> Option<bool> {
        self.from_user_activity
    }

    pub const fn timestamp(&self) -> Option<Millis> {
        self.timestamp
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = Some(value);
    }

    pub(crate) fn open(&mut self, from_user_activity: bool, at: Millis) {
        self.opened = true;
        self.flagged = false;
        self.from_user_activity = Some(from_user_activity);
        self.timestamp = Some(at);
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cell_is_unset() {
        let cell = Cell::new(3);
        assert_eq!(cell.index(), 3);
        assert_eq!(cell.neighbouring_mines(), None);
        assert!(!cell.is_opened());
        assert!(!cell.is_flagged());
        assert_eq!(cell.from_user_activity(), None);
        assert_eq!(cell.timestamp(), None);
    }

    #[test]
    fn opening_clears_flag_and_records_origin() {
        let mut cell = Cell::new(0);
        cell.set_value(CellValue::Mine);
        cell.toggle_flag();
        cell.open(false, 1500);

        assert!(cell.is_opened());
        assert!(!cell.is_flagged());
        assert_eq!(cell.from_user_activity(), Some(false));
        assert_eq!(cell.timestamp(), Some(1500));
        assert_eq!(cell.neighbouring_mines(), Some(-1));
    }

    #[test]
    fn raw_encoding() {
        assert_eq!(CellValue::Mine.as_raw(), -1);
        assert_eq!(CellValue::Adjacent(0).as_raw(), 0);
        assert_eq!(CellValue::Adjacent(8).as_raw(), 8);
    }
}
