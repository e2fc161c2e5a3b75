//! Tetros: a falling-block game that uses the cells of a sheet as its pixels.
//!
//! The engine never keeps a private copy of the board. The falling piece and every settled
//! block live in a [`Grid`]; the [`GameController`] mutates it on ticks and player commands.

pub mod collision;
pub mod game;
pub mod grid;
pub mod line_clear;
pub mod movement;
pub mod shapes;

pub use game::{Command, GAME_OVER_MESSAGE, GameController, GameError, GameSession, Notifier, Phase};
pub use grid::{Cell, CellCoordinate, Grid, GridError, MemoryGrid};
pub use movement::{Direction, DropOutcome};
pub use shapes::{RandomTile, Tetromino, TetrominoKind, TileSource};
