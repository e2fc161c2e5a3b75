//! Piece movement: one-row drop, full drop, horizontal shift, rotation.
//!
//! Every committed move erases the piece from the grid and paints it again at the new
//! position. Rejected shifts and rotations leave piece and grid untouched and return `false`.

use crate::collision::{in_bounds, is_blocked};
use crate::grid::{Cell, CellCoordinate, Grid, GridError};
use crate::shapes::Tetromino;

/// Result of a single downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece could not descend and stays frozen where it is.
    StopReached,
    Continued,
}

/// Lateral direction for shifts and rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Clear the given cells.
pub fn erase<G: Grid + ?Sized>(grid: &mut G, cells: &[CellCoordinate]) -> Result<(), GridError> {
    for &at in cells {
        grid.update(at, Cell::Empty)?;
    }
    Ok(())
}

/// Write `tag` into the given cells.
pub fn paint<G: Grid + ?Sized>(
    grid: &mut G,
    cells: &[CellCoordinate],
    tag: u8,
) -> Result<(), GridError> {
    for &at in cells {
        grid.update(at, Cell::Constant(i64::from(tag)))?;
    }
    Ok(())
}

/// Replace the piece's rendering with `cells` and commit them.
fn commit<G: Grid + ?Sized>(
    grid: &mut G,
    piece: &mut Tetromino,
    cells: [CellCoordinate; 4],
) -> Result<(), GridError> {
    erase(grid, piece.cells())?;
    paint(grid, &cells, piece.tag())?;
    *piece = piece.with_cells(cells);
    Ok(())
}

/// Move the piece one row down, or report that it has stopped.
pub fn drop_one_row<G: Grid + ?Sized>(
    grid: &mut G,
    piece: &mut Tetromino,
) -> Result<DropOutcome, GridError> {
    let dropped = piece.cells().map(|at| at.offset(1, 0));
    // The piece's own cells must not count as stoppers.
    erase(grid, piece.cells())?;
    if is_blocked(grid, &dropped) {
        paint(grid, piece.cells(), piece.tag())?;
        return Ok(DropOutcome::StopReached);
    }
    paint(grid, &dropped, piece.tag())?;
    *piece = piece.with_cells(dropped);
    Ok(DropOutcome::Continued)
}

/// Drop until the piece stops, at most `grid.rows()` steps. Returns the number of steps taken,
/// including the one that reported the stop.
pub fn full_drop<G: Grid + ?Sized>(grid: &mut G, piece: &mut Tetromino) -> Result<usize, GridError> {
    let limit = grid.rows();
    for step in 1..=limit {
        if drop_one_row(grid, piece)? == DropOutcome::StopReached {
            return Ok(step);
        }
    }
    Ok(limit)
}

/// Shift one column left or right. Returns whether the piece moved.
pub fn shift_horizontal<G: Grid + ?Sized>(
    grid: &mut G,
    piece: &mut Tetromino,
    direction: Direction,
) -> Result<bool, GridError> {
    let columns = grid.columns() as i64;
    let shifted = piece.cells().map(|at| at.offset(0, direction.delta()));
    let on_sheet = shifted
        .iter()
        .all(|at| at.column >= 0 && i64::from(at.column) < columns);
    if !on_sheet || !in_bounds(grid, &shifted) {
        return Ok(false);
    }
    commit(grid, piece, shifted)?;
    Ok(true)
}

/// Reflect every cell through the piece's (truncated) mean cell:
/// `column' = mean_col + (mean_row - row) * d`, `row' = mean_row + (mean_col - col) * d`.
pub fn rotated_cells(piece: &Tetromino, direction: Direction) -> [CellCoordinate; 4] {
    let cells = piece.cells();
    let count = cells.len() as i32;
    let mean_row = cells.iter().map(|at| at.row).sum::<i32>() / count;
    let mean_col = cells.iter().map(|at| at.column).sum::<i32>() / count;
    let d = direction.delta();
    cells.map(|at| {
        CellCoordinate::new(
            mean_row + (mean_col - at.column) * d,
            mean_col + (mean_row - at.row) * d,
        )
    })
}

/// Rotate by reflection about the centroid. Returns whether the piece moved.
pub fn rotate<G: Grid + ?Sized>(
    grid: &mut G,
    piece: &mut Tetromino,
    direction: Direction,
) -> Result<bool, GridError> {
    let rotated = rotated_cells(piece, direction);
    if !in_bounds(grid, &rotated) {
        return Ok(false);
    }
    commit(grid, piece, rotated)?;
    Ok(true)
}
