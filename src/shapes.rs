//! Tetromino shapes, the active piece, and the random draw that picks them.

use crate::grid::CellCoordinate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of distinct draws a tile source produces (0..7).
pub const SHAPE_COUNT: u32 = 7;

/// Tetromino kinds, one per draw id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    Z,
    L,
    J,
    T,
    O,
    I,
    S,
}

/// Fixed data for one kind: 4 (row, column) offsets from the top-left origin and the marker
/// written into the grid.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub offsets: [(i32, i32); 4],
    pub tag: u8,
}

/// Indexed by draw id.
static CATALOG: [ShapeDefinition; SHAPE_COUNT as usize] = [
    ShapeDefinition { offsets: [(0, 0), (0, 1), (1, 1), (1, 2)], tag: 4 },
    ShapeDefinition { offsets: [(0, 0), (1, 0), (2, 0), (2, 1)], tag: 7 },
    ShapeDefinition { offsets: [(0, 1), (1, 1), (2, 1), (2, 0)], tag: 5 },
    ShapeDefinition { offsets: [(0, 0), (0, 1), (0, 2), (1, 1)], tag: 8 },
    ShapeDefinition { offsets: [(0, 0), (0, 1), (1, 0), (1, 1)], tag: 3 },
    ShapeDefinition { offsets: [(0, 0), (1, 0), (2, 0), (3, 0)], tag: 6 },
    // (0, 1) appears twice: this shape only covers 3 cells.
    ShapeDefinition { offsets: [(0, 1), (0, 2), (1, 1), (0, 1)], tag: 2 },
];

impl TetrominoKind {
    /// In draw-id order.
    pub const ALL: [Self; SHAPE_COUNT as usize] =
        [Self::Z, Self::L, Self::J, Self::T, Self::O, Self::I, Self::S];

    /// Kind for a tile-source draw; `None` for anything outside 0..7.
    pub fn from_draw(draw: u32) -> Option<Self> {
        Self::ALL.get(draw as usize).copied()
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn definition(self) -> &'static ShapeDefinition {
        &CATALOG[self as usize]
    }

    pub fn tag(self) -> u8 {
        self.definition().tag
    }
}

/// The falling piece: exactly 4 cells plus the marker it paints with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    cells: [CellCoordinate; 4],
    tag: u8,
}

impl Tetromino {
    pub fn new(cells: [CellCoordinate; 4], tag: u8) -> Self {
        Self { cells, tag }
    }

    #[inline]
    pub fn cells(&self) -> &[CellCoordinate; 4] {
        &self.cells
    }

    #[inline]
    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn occupies(&self, at: CellCoordinate) -> bool {
        self.cells.contains(&at)
    }

    /// Same tag, new cells.
    pub fn with_cells(&self, cells: [CellCoordinate; 4]) -> Self {
        Self::new(cells, self.tag)
    }
}

/// Place a fresh piece of `kind` with its offsets taken as absolute coordinates.
pub fn spawn(kind: TetrominoKind) -> Tetromino {
    let def = kind.definition();
    let cells = def
        .offsets
        .map(|(row, column)| CellCoordinate::new(row, column));
    Tetromino::new(cells, def.tag)
}

/// Source of shape draws in 0..SHAPE_COUNT.
pub trait TileSource {
    fn pick(&mut self) -> u32;
}

/// Uniform random draws.
#[derive(Debug, Clone)]
pub struct RandomTile {
    rng: StdRng,
}

impl RandomTile {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTile {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for RandomTile {
    fn pick(&mut self) -> u32 {
        self.rng.gen_range(0..SHAPE_COUNT)
    }
}
