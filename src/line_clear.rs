//! Full-row detection and collapse.

use crate::grid::{CellCoordinate, Grid, GridError};
use crate::shapes::Tetromino;

/// True iff every column of `row` is non-empty.
pub fn is_row_full<G: Grid + ?Sized>(grid: &G, row: usize) -> bool {
    (0..grid.columns())
        .all(|column| !grid.value_at(CellCoordinate::new(row as i32, column as i32)).is_empty())
}

/// Shift every row above `row` down by one, overwriting `row`. Row 0 is left as it is.
/// Cells whose source lies on the active piece are not touched. Returns whether any cell
/// changed.
pub fn collapse<G: Grid + ?Sized>(
    grid: &mut G,
    row: usize,
    active: Option<&Tetromino>,
) -> Result<bool, GridError> {
    let mut changed = false;
    for target in (1..=row as i32).rev() {
        for column in 0..grid.columns() as i32 {
            let source = CellCoordinate::new(target - 1, column);
            if active.is_some_and(|piece| piece.occupies(source)) {
                continue;
            }
            let dest = CellCoordinate::new(target, column);
            let value = grid.value_at(source);
            if grid.value_at(dest) != value {
                grid.update(dest, value)?;
                changed = true;
            }
        }
    }
    Ok(changed)
}

/// Scan bottom to top, collapsing each full row and re-examining the same index while the
/// collapse keeps changing the grid. Returns the number of collapses performed.
pub fn scan_and_clear<G: Grid + ?Sized>(
    grid: &mut G,
    active: Option<&Tetromino>,
) -> Result<usize, GridError> {
    let limit = grid.rows();
    let mut collapses = 0;
    let mut row = grid.rows();
    while row > 0 {
        let current = row - 1;
        let mut passes = 0;
        while passes < limit && is_row_full(grid, current) && collapse(grid, current, active)? {
            passes += 1;
        }
        collapses += passes;
        row -= 1;
    }
    Ok(collapses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, MemoryGrid};

    fn fill_row(grid: &mut MemoryGrid, row: i32, tag: i64) {
        for column in 0..grid.columns() as i32 {
            grid.update(CellCoordinate::new(row, column), Cell::Constant(tag)).unwrap();
        }
    }

    #[test]
    fn test_row_full_detection() {
        let mut grid = MemoryGrid::new(3, 3);
        fill_row(&mut grid, 2, 5);
        assert!(is_row_full(&grid, 2));
        grid.update(CellCoordinate::new(2, 1), Cell::Empty).unwrap();
        assert!(!is_row_full(&grid, 2));
        assert!(!is_row_full(&grid, 0));
    }

    #[test]
    fn test_full_row_takes_empty_row_above() {
        let mut grid = MemoryGrid::new(4, 4);
        fill_row(&mut grid, 2, 6);
        let collapses = scan_and_clear(&mut grid, None).unwrap();
        assert_eq!(collapses, 1);
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_rows_above_shift_down() {
        let mut grid = MemoryGrid::new(4, 3);
        grid.update(CellCoordinate::new(1, 0), Cell::Constant(7)).unwrap();
        grid.update(CellCoordinate::new(2, 2), Cell::Constant(5)).unwrap();
        fill_row(&mut grid, 3, 3);
        assert_eq!(scan_and_clear(&mut grid, None), Ok(1));
        assert_eq!(grid.to_string(), "...\n...\n7..\n..5");
    }

    #[test]
    fn test_stacked_full_rows_cascade() {
        let mut grid = MemoryGrid::new(4, 2);
        grid.update(CellCoordinate::new(1, 1), Cell::Constant(4)).unwrap();
        fill_row(&mut grid, 2, 3);
        fill_row(&mut grid, 3, 3);
        assert_eq!(scan_and_clear(&mut grid, None), Ok(2));
        assert_eq!(grid.to_string(), "..\n..\n..\n.4");
    }

    #[test]
    fn test_top_row_is_never_overwritten() {
        let mut grid = MemoryGrid::new(3, 2);
        grid.update(CellCoordinate::new(0, 0), Cell::Constant(8)).unwrap();
        fill_row(&mut grid, 2, 3);
        scan_and_clear(&mut grid, None).unwrap();
        assert_eq!(grid.to_string(), "8.\n8.\n..");
    }

    #[test]
    fn test_full_top_rows_terminate() {
        let mut grid = MemoryGrid::new(2, 2);
        fill_row(&mut grid, 0, 2);
        fill_row(&mut grid, 1, 2);
        assert_eq!(scan_and_clear(&mut grid, None), Ok(0));
        assert_eq!(grid.to_string(), "22\n22");
    }

    #[test]
    fn test_active_piece_cells_are_not_copied_down() {
        let mut grid = MemoryGrid::new(3, 3);
        let piece = Tetromino::new([CellCoordinate::new(0, 1); 4], 4);
        grid.update(CellCoordinate::new(0, 1), Cell::Constant(4)).unwrap();
        fill_row(&mut grid, 2, 3);
        grid.update(CellCoordinate::new(1, 0), Cell::Constant(6)).unwrap();
        assert_eq!(collapse(&mut grid, 2, Some(&piece)), Ok(true));
        assert_eq!(grid.to_string(), ".4.\n...\n6..");
    }
}
