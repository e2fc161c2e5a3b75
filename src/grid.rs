//! Cell grid the game renders into: coordinates, cell values, and an in-memory sheet.

use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// A (row, column) position. Signed: rotation can place cells above or left of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoordinate {
    pub row: i32,
    pub column: i32,
}

impl CellCoordinate {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Same cell moved by `rows` down and `columns` right.
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Content of a single cell: nothing, or a numeric constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Constant(i64),
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Renders like a sheet cell: empty string for `Empty`, the number otherwise.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Constant(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("type mismatch: {value:?} cannot be stored at {at}")]
    TypeMismatch { at: CellCoordinate, value: Cell },
}

/// Addressable 2-D surface of cells.
pub trait Grid {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;

    fn contains(&self, at: CellCoordinate) -> bool {
        at.row >= 0
            && at.column >= 0
            && (at.row as usize) < self.rows()
            && (at.column as usize) < self.columns()
    }

    /// Value stored at `at`; `Cell::Empty` outside the grid.
    fn value_at(&self, at: CellCoordinate) -> Cell;

    /// Store `value` at `at`. Writes outside the grid are dropped.
    fn update(&mut self, at: CellCoordinate, value: Cell) -> Result<(), GridError>;
}

/// Plain in-memory sheet. rows[r][c] = cell; rows[0] is the top.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    rows: Vec<Vec<Cell>>,
    columns: usize,
    /// Constants this sheet accepts; anything else is a type mismatch.
    markers: RangeInclusive<i64>,
}

impl MemoryGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; columns]; rows],
            columns,
            markers: 0..=9,
        }
    }

    pub fn with_marker_range(mut self, markers: RangeInclusive<i64>) -> Self {
        self.markers = markers;
        self
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    #[inline]
    fn index(&self, at: CellCoordinate) -> Option<(usize, usize)> {
        self.contains(at)
            .then(|| (at.row as usize, at.column as usize))
    }
}

impl Grid for MemoryGrid {
    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn value_at(&self, at: CellCoordinate) -> Cell {
        self.index(at)
            .map(|(r, c)| self.rows[r][c])
            .unwrap_or(Cell::Empty)
    }

    fn update(&mut self, at: CellCoordinate, value: Cell) -> Result<(), GridError> {
        if let Cell::Constant(n) = value {
            if !self.markers.contains(&n) {
                return Err(GridError::TypeMismatch { at, value });
            }
        }
        if let Some((r, c)) = self.index(at) {
            self.rows[r][c] = value;
        }
        Ok(())
    }
}

/// One line per row: `.` for empty, the constant otherwise.
impl fmt::Display for MemoryGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                match cell {
                    Cell::Empty => write!(f, ".")?,
                    Cell::Constant(n) => write!(f, "{}", n)?,
                }
            }
        }
        Ok(())
    }
}
