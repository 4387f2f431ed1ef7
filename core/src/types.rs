use crate::*;

/// Row or column count of a grid.
pub type Dim = usize;

/// Flat, row-major position of a cell: `row * columns + column`.
pub type CellIndex = usize;

/// Elapsed game time in milliseconds.
pub type Millis = u64;

/// Splits a flat index into `(row, column)`.
pub const fn to_row_col(index: CellIndex, columns: Dim) -> (Dim, Dim) {
    (index / columns, index % columns)
}

// (row, column) displacements, reading order starting top-left
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: (Dim, Dim), delta: (isize, isize), bounds: (Dim, Dim)) -> Option<(Dim, Dim)> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the flat indices of the (up to 8) cells around a center cell.
///
/// The sequence is treated as a row-major matrix of `ceil(len / columns)` rows, so a short last
/// row is handled: positions past `len` are skipped along with anything off the edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: (Dim, Dim),
    bounds: (Dim, Dim),
    len: usize,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(len: usize, center: CellIndex, columns: Dim) -> Self {
        Self {
            center: to_row_col(center, columns),
            bounds: (len.div_ceil(columns), columns),
            len,
            index: 0,
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            center: (0, 0),
            bounds: (0, 0),
            len: 0,
            index: DISPLACEMENTS.len() as u8,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while usize::from(self.index) < DISPLACEMENTS.len() {
            let delta = DISPLACEMENTS[usize::from(self.index)];
            self.index += 1;

            if let Some((row, col)) = apply_delta(self.center, delta, self.bounds) {
                let flat = row * self.bounds.1 + col;
                if flat < self.len {
                    return Some(flat);
                }
            }
        }
        None
    }
}

/// Neighbour positions of `index` in a row-major sequence of `len` items.
///
/// An index outside `[0, len)` has no neighbours. A zero column count cannot describe any
/// matrix and is rejected.
pub fn neighbour_indices(len: usize, index: CellIndex, columns: Dim) -> Result<NeighborIter> {
    if columns == 0 {
        return Err(GameError::InvalidArgument);
    }
    if index >= len {
        return Ok(NeighborIter::empty());
    }
    Ok(NeighborIter::new(len, index, columns))
}

/// The items around `index` when `cells` is laid out with `columns` items per row.
pub fn neighbours_of<T>(
    cells: &[T],
    index: CellIndex,
    columns: Dim,
) -> Result<impl Iterator<Item = &T> + '_> {
    Ok(neighbour_indices(cells.len(), index, columns)?.map(move |pos| &cells[pos]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(len: usize, index: CellIndex, columns: Dim) -> Vec<CellIndex> {
        neighbour_indices(len, index, columns).unwrap().collect()
    }

    #[test]
    fn corner_edge_and_interior_counts() {
        // 3x3
        assert_eq!(collect(9, 0, 3), [1, 3, 4]);
        assert_eq!(collect(9, 8, 3), [4, 5, 7]);
        assert_eq!(collect(9, 1, 3), [0, 2, 3, 4, 5]);
        assert_eq!(collect(9, 4, 3), [0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn never_wraps_around_rows() {
        // 2x4, cell 3 is the end of the first row, cell 4 the start of the second
        assert_eq!(collect(8, 3, 4), [2, 6, 7]);
        assert_eq!(collect(8, 4, 4), [0, 1, 5]);
    }

    #[test]
    fn short_last_row_is_clipped() {
        // 7 items in rows of 3: the last row only holds index 6
        assert_eq!(collect(7, 4, 3), [0, 1, 2, 3, 5, 6]);
        assert_eq!(collect(7, 6, 3), [3, 4]);
    }

    #[test]
    fn single_column_and_single_cell() {
        assert_eq!(collect(3, 1, 1), [0, 2]);
        assert!(collect(1, 0, 1).is_empty());
    }

    #[test]
    fn out_of_range_or_empty_yields_nothing() {
        assert!(collect(9, 9, 3).is_empty());
        assert!(collect(9, 100, 3).is_empty());
        assert!(collect(0, 0, 3).is_empty());
    }

    #[test]
    fn zero_columns_is_rejected() {
        assert_eq!(
            neighbour_indices(9, 0, 0).err(),
            Some(GameError::InvalidArgument)
        );
        assert_eq!(
            neighbours_of::<u8>(&[], 0, 0).err(),
            Some(GameError::InvalidArgument)
        );
    }

    #[test]
    fn neighbours_of_returns_items() {
        let cells = ['a', 'b', 'c', 'd'];
        let around: Vec<char> = neighbours_of(&cells, 0, 2).unwrap().copied().collect();
        assert_eq!(around, ['b', 'c', 'd']);
    }
}
