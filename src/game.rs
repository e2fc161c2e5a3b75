//! Game session and controller: start, ticks, player commands, game over.

use crate::grid::{Grid, GridError};
use crate::line_clear::scan_and_clear;
use crate::movement::{self, Direction, DropOutcome};
use crate::shapes::{Tetromino, TetrominoKind, TileSource, spawn};
use thiserror::Error;

/// Sent once on every transition into game over.
pub const GAME_OVER_MESSAGE: &str = "Game Over!";

/// Failures that abort a tick or command. None of these are game events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("tile source drew {0}, expected a shape id in 0..7")]
    InvalidDraw(u32),
}

/// Sink for one-shot user messages.
pub trait Notifier {
    fn notify(&mut self, text: &str);
}

impl Notifier for Vec<String> {
    fn notify(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    GameOver,
}

/// Player commands, forwarded only while the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShiftLeft,
    ShiftRight,
    FullDrop,
    RotateLeft,
    RotateRight,
}

impl Command {
    pub const ALL: [Self; 5] = [
        Self::ShiftLeft,
        Self::ShiftRight,
        Self::FullDrop,
        Self::RotateLeft,
        Self::RotateRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ShiftLeft => "Move Left",
            Self::ShiftRight => "Move Right",
            Self::FullDrop => "Drop",
            Self::RotateLeft => "Rotate Left",
            Self::RotateRight => "Rotate Right",
        }
    }
}

/// Mutable per-game state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    pub phase: Phase,
    /// Current falling piece. After a blocked spawn this is the piece that did not fit.
    pub active: Option<Tetromino>,
}

/// Owns the grid, the tile source and the session; the single mutator of all three.
#[derive(Debug)]
pub struct GameController<G, T> {
    grid: G,
    tiles: T,
    session: GameSession,
}

impl<G: Grid, T: TileSource> GameController<G, T> {
    pub fn new(grid: G, tiles: T) -> Self {
        Self {
            grid,
            tiles,
            session: GameSession::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn is_running(&self) -> bool {
        self.session.phase == Phase::Running
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.session.active.as_ref()
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    /// Begin a game from idle or game over. Ignored while already running.
    pub fn start(&mut self, notifier: &mut impl Notifier) -> Result<(), GameError> {
        if self.is_running() {
            return Ok(());
        }
        self.session.phase = Phase::Running;
        if !self.spawn_next()? {
            self.end_game(notifier);
        }
        Ok(())
    }

    /// Advance one gravity step. Returns `false` when no game is running.
    pub fn on_tick(&mut self, notifier: &mut impl Notifier) -> Result<bool, GameError> {
        if !self.is_running() {
            return Ok(false);
        }
        if let Some(piece) = self.session.active.as_mut() {
            let outcome = movement::drop_one_row(&mut self.grid, piece)?;
            if outcome == DropOutcome::StopReached && !self.spawn_next()? {
                self.end_game(notifier);
            }
        }
        scan_and_clear(&mut self.grid, self.session.active.as_ref())?;
        Ok(true)
    }

    /// Apply a player command. Ignored unless running; rejected moves are silent.
    pub fn handle(&mut self, command: Command) -> Result<(), GameError> {
        if !self.is_running() {
            return Ok(());
        }
        let Some(piece) = self.session.active.as_mut() else {
            return Ok(());
        };
        let grid = &mut self.grid;
        match command {
            Command::ShiftLeft => {
                movement::shift_horizontal(grid, piece, Direction::Left)?;
            }
            Command::ShiftRight => {
                movement::shift_horizontal(grid, piece, Direction::Right)?;
            }
            Command::FullDrop => {
                movement::full_drop(grid, piece)?;
            }
            Command::RotateLeft => {
                movement::rotate(grid, piece, Direction::Left)?;
            }
            Command::RotateRight => {
                movement::rotate(grid, piece, Direction::Right)?;
            }
        }
        Ok(())
    }

    /// Draw and place the next piece. Returns `false` (nothing rendered) if any of its
    /// cells is already occupied.
    fn spawn_next(&mut self) -> Result<bool, GameError> {
        let draw = self.tiles.pick();
        let kind = TetrominoKind::from_draw(draw).ok_or(GameError::InvalidDraw(draw))?;
        let piece = spawn(kind);
        let fits = piece
            .cells()
            .iter()
            .all(|&at| self.grid.value_at(at).is_empty());
        if fits {
            movement::paint(&mut self.grid, piece.cells(), piece.tag())?;
        }
        self.session.active = Some(piece);
        Ok(fits)
    }

    fn end_game(&mut self, notifier: &mut impl Notifier) {
        self.session.phase = Phase::GameOver;
        notifier.notify(GAME_OVER_MESSAGE);
    }
}
