//! Grid model: numbered cells, random fill, column compaction (gravity).

use rand::Rng;

/// Cell values are uniform in `MIN_VALUE..=MAX_VALUE`.
pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 9;

/// A filled grid slot. Slots are `Option<Cell>`; `None` is an empty slot
/// awaiting compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: u8,
    pub selected: bool,
}

impl Cell {
    fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            value: rng.gen_range(MIN_VALUE..=MAX_VALUE),
            selected: false,
        }
    }
}

/// Square grid stored row-major: index `i` is column `i % size`,
/// row `i / size`, with row 0 at the top.
///
/// Indexing out of range is a caller bug and panics; gesture coordinates are
/// range-checked before they ever become indices.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    /// Fresh grid with every slot holding an independent random value.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        Self {
            size,
            cells: (0..size * size).map(|_| Some(Cell::random(rng))).collect(),
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Linear index for (col, row). Panics if either is out of range.
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        assert!(col < self.size && row < self.size, "cell out of range");
        row * self.size + col
    }

    #[inline]
    pub fn col_of(&self, index: usize) -> usize {
        index % self.size
    }

    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.size
    }

    /// Slot content at `index` (`None` = empty). Panics if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells[index]
    }

    /// Replace the slot at `index`. Panics if out of range.
    #[inline]
    pub fn set(&mut self, index: usize, cell: Option<Cell>) {
        self.cells[index] = cell;
    }

    /// Flip the selection flag of a filled slot; empty slots are left alone.
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(cell) = self.cells[index].as_mut() {
            cell.selected = selected;
        }
    }

    /// Drop every selection flag on the board.
    pub fn clear_selection(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.selected = false;
        }
    }

    /// True when `a` and `b` share an edge in grid coordinates. Checked in
    /// (col, row) space, so the last cell of one row is never adjacent to
    /// the first cell of the next.
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        let (ac, ar) = (self.col_of(a), self.row_of(a));
        let (bc, br) = (self.col_of(b), self.row_of(b));
        (ar == br && ac.abs_diff(bc) == 1) || (ac == bc && ar.abs_diff(br) == 1)
    }

    /// Close the gaps in one column: survivors slide down keeping their
    /// order, and every slot left open at the top gets a fresh random value.
    /// Call only after all removed cells have been cleared to empty.
    pub fn compact_column<R: Rng>(&mut self, col: usize, rng: &mut R) {
        let survivors: Vec<Cell> = (0..self.size)
            .filter_map(|row| self.cells[self.index(col, row)])
            .collect();
        let fresh = self.size - survivors.len();
        for row in 0..fresh {
            let i = self.index(col, row);
            self.cells[i] = Some(Cell::random(rng));
        }
        for (offset, cell) in survivors.into_iter().enumerate() {
            let i = self.index(col, fresh + offset);
            self.cells[i] = Some(cell);
        }
    }

    /// Read one column top-to-bottom as values (`None` = empty slot).
    pub fn column_values(&self, col: usize) -> Vec<Option<u8>> {
        (0..self.size)
            .map(|row| self.cells[self.index(col, row)].map(|c| c.value))
            .collect()
    }

    /// Build a grid from row-major values; 0 marks an empty slot.
    #[cfg(test)]
    pub(crate) fn from_values(size: usize, values: &[u8]) -> Self {
        assert_eq!(values.len(), size * size);
        Self {
            size,
            cells: values
                .iter()
                .map(|&v| {
                    (v != 0).then_some(Cell {
                        value: v,
                        selected: false,
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xDECADE)
    }

    #[test]
    fn random_grid_is_full_with_values_in_range() {
        let grid = Grid::random(5, &mut rng());
        for i in 0..25 {
            let cell = grid.get(i).expect("slot filled");
            assert!((MIN_VALUE..=MAX_VALUE).contains(&cell.value));
            assert!(!cell.selected);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn out_of_range_access_panics() {
        let grid = Grid::random(3, &mut rng());
        let _ = grid.get(9);
    }

    #[test]
    fn adjacency_is_orthogonal_without_row_wrap() {
        let grid = Grid::from_values(3, &[5, 5, 5, 1, 1, 1, 9, 9, 9]);
        assert!(grid.adjacent(0, 1));
        assert!(grid.adjacent(4, 1));
        assert!(grid.adjacent(4, 7));
        // Diagonal.
        assert!(!grid.adjacent(0, 4));
        // End of row 0 / start of row 1: consecutive indices, not adjacent.
        assert!(!grid.adjacent(2, 3));
        assert!(!grid.adjacent(4, 4));
    }

    #[test]
    fn compaction_preserves_survivor_order_and_fills_gaps() {
        // Column 1 top-to-bottom: 7, empty, 3, empty.
        let mut grid = Grid::from_values(4, [
            9, 7, 9, 9, //
            9, 0, 9, 9, //
            9, 3, 9, 9, //
            9, 0, 9, 9,
        ].as_ref());
        grid.compact_column(1, &mut rng());

        let col = grid.column_values(1);
        assert!(col.iter().all(Option::is_some), "no gaps after compaction");
        // Survivors keep their relative order at the bottom.
        assert_eq!(col[2], Some(7));
        assert_eq!(col[3], Some(3));
        // Fresh draws only at the top, unselected and in range.
        for row in 0..2 {
            let cell = grid.get(grid.index(1, row)).unwrap();
            assert!((MIN_VALUE..=MAX_VALUE).contains(&cell.value));
            assert!(!cell.selected);
        }
    }

    #[test]
    fn compaction_of_full_column_is_identity() {
        let mut grid = Grid::from_values(3, &[5, 5, 5, 1, 1, 1, 9, 9, 9]);
        let before = grid.column_values(0);
        grid.compact_column(0, &mut rng());
        assert_eq!(grid.column_values(0), before);
    }

    #[test]
    fn fully_cleared_column_refills_completely() {
        let mut grid = Grid::from_values(3, &[0, 5, 5, 0, 1, 1, 0, 9, 9]);
        grid.compact_column(0, &mut rng());
        assert!(grid.column_values(0).iter().all(Option::is_some));
    }

    #[test]
    fn clear_selection_sweeps_the_whole_board() {
        let mut grid = Grid::from_values(2, &[1, 2, 3, 4]);
        grid.set_selected(0, true);
        grid.set_selected(3, true);
        grid.clear_selection();
        for i in 0..4 {
            assert!(!grid.get(i).unwrap().selected);
        }
    }
}
