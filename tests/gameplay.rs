//! End-to-end behaviour of the controller on an in-memory sheet.

use tetros::movement::{drop_one_row, paint};
use tetros::shapes::spawn;
use tetros::{
    Cell, CellCoordinate, Command, DropOutcome, GAME_OVER_MESSAGE, GameController, Grid,
    MemoryGrid, Phase, TetrominoKind, TileSource,
};

/// Always draws the same shape.
struct Fixed(u32);

impl TileSource for Fixed {
    fn pick(&mut self) -> u32 {
        self.0
    }
}

fn at(row: i32, column: i32) -> CellCoordinate {
    CellCoordinate::new(row, column)
}

#[test]
fn start_on_empty_sheet_renders_only_the_first_piece() {
    let mut game = GameController::new(MemoryGrid::new(4, 4), Fixed(0));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();

    let piece_cells = [at(0, 0), at(0, 1), at(1, 1), at(1, 2)];
    for row in 0..4 {
        for column in 0..4 {
            let cell = game.grid().value_at(at(row, column));
            if piece_cells.contains(&at(row, column)) {
                assert_eq!(cell, Cell::Constant(4));
            } else {
                assert!(cell.is_empty(), "({row}, {column}) = {cell:?}");
            }
        }
    }
    assert!(log.is_empty());
}

#[test]
fn start_on_occupied_spawn_ends_game_without_rendering() {
    let mut grid = MemoryGrid::new(4, 4);
    grid.update(at(1, 1), Cell::Constant(9)).unwrap();
    let mut game = GameController::new(grid, Fixed(0));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(log, vec![GAME_OVER_MESSAGE.to_string()]);
    assert_eq!(game.grid().to_string(), "....\n.9..\n....\n....");

    for command in Command::ALL {
        game.handle(command).unwrap();
    }
    assert_eq!(game.on_tick(&mut log), Ok(false));
    assert_eq!(log.len(), 1);
}

#[test]
fn tick_on_bottom_row_freezes_piece_and_spawns_next() {
    let mut game = GameController::new(MemoryGrid::new(6, 4), Fixed(5));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    game.handle(Command::FullDrop).unwrap();
    let bottom = game.active().unwrap().cells()[3];
    assert_eq!(bottom.row as usize, game.grid().rows() - 1);

    assert_eq!(game.on_tick(&mut log), Ok(true));
    // Old piece stays at rows 2..=5 in column 0, new one occupies rows 0..=3: game over.
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(log, vec![GAME_OVER_MESSAGE.to_string()]);
    assert_eq!(game.grid().to_string(), "....\n....\n6...\n6...\n6...\n6...");
}

#[test]
fn tick_after_landing_spawns_fresh_piece() {
    let mut game = GameController::new(MemoryGrid::new(8, 4), Fixed(4));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    game.handle(Command::ShiftRight).unwrap();
    game.handle(Command::ShiftRight).unwrap();
    game.handle(Command::FullDrop).unwrap();
    game.on_tick(&mut log).unwrap();

    assert!(game.is_running());
    assert_eq!(
        game.grid().to_string(),
        "33..\n33..\n....\n....\n....\n....\n..33\n..33"
    );
}

#[test]
fn completed_row_is_cleared_on_tick() {
    let mut game = GameController::new(MemoryGrid::new(6, 4), Fixed(4));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    game.handle(Command::FullDrop).unwrap();
    game.on_tick(&mut log).unwrap();

    game.handle(Command::ShiftRight).unwrap();
    game.handle(Command::ShiftRight).unwrap();
    game.handle(Command::FullDrop).unwrap();
    assert_eq!(game.grid().to_string(), "....\n....\n....\n....\n3333\n3333");

    game.on_tick(&mut log).unwrap();
    // Both full rows collapse; the new piece at the top is not copied down.
    assert_eq!(game.grid().to_string(), "33..\n33..\n....\n....\n....\n....");
    assert!(game.is_running());
}

#[test]
fn shift_is_rejected_at_both_edges() {
    let mut game = GameController::new(MemoryGrid::new(6, 3), Fixed(3));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    let spawned = game.active().cloned();

    game.handle(Command::ShiftLeft).unwrap();
    assert_eq!(game.active().cloned(), spawned);
    game.handle(Command::ShiftRight).unwrap();
    assert_eq!(game.active().cloned(), spawned);
    assert_eq!(game.grid().to_string(), "888\n.8.\n...\n...\n...\n...");
}

#[test]
fn rotation_round_trip_keeps_shape() {
    let mut game = GameController::new(MemoryGrid::new(10, 10), Fixed(5));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    for _ in 0..3 {
        game.handle(Command::ShiftRight).unwrap();
    }
    game.on_tick(&mut log).unwrap();
    game.handle(Command::RotateRight).unwrap();
    let horizontal = game.active().unwrap().cells().to_vec();
    assert!(horizontal.iter().all(|c| c.row == horizontal[0].row));
    game.handle(Command::RotateRight).unwrap();
    let vertical = game.active().unwrap().cells().to_vec();
    assert!(vertical.iter().all(|c| c.column == vertical[0].column));
    assert_eq!(game.grid().occupied(), 4);
}

#[test]
fn drop_keeps_reporting_stop_without_spawn() {
    let mut grid = MemoryGrid::new(3, 3);
    let mut piece = spawn(TetrominoKind::T);
    paint(&mut grid, piece.cells(), piece.tag()).unwrap();
    assert_eq!(drop_one_row(&mut grid, &mut piece), Ok(DropOutcome::Continued));
    let landed = piece.clone();
    for _ in 0..5 {
        assert_eq!(drop_one_row(&mut grid, &mut piece), Ok(DropOutcome::StopReached));
        assert_eq!(piece, landed);
    }
    assert_eq!(grid.to_string(), "...\n888\n.8.");
}

#[test]
fn broken_s_shape_plays_with_three_cells() {
    let mut game = GameController::new(MemoryGrid::new(5, 4), Fixed(6));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    assert_eq!(game.grid().occupied(), 3);
    assert_eq!(game.grid().to_string(), ".22.\n.2..\n....\n....\n....");
    game.handle(Command::FullDrop).unwrap();
    assert_eq!(game.grid().occupied(), 3);
}

#[test]
fn full_row_is_cleared_while_piece_is_still_falling() {
    let mut game = GameController::new(MemoryGrid::new(8, 4), Fixed(4));
    let mut log: Vec<String> = Vec::new();
    game.start(&mut log).unwrap();
    for column in 0..4 {
        game.grid_mut().update(at(7, column), Cell::Constant(9)).unwrap();
    }

    assert_eq!(game.on_tick(&mut log), Ok(true));
    let piece = game.active().unwrap();
    assert!(piece.cells().iter().all(|c| (1..=2).contains(&c.row)));
    // The empty row 0 is copied over the piece's upper row; the piece itself is not moved.
    assert_eq!(
        game.grid().to_string(),
        "....\n....\n33..\n....\n....\n....\n....\n...."
    );
    assert!(game.is_running());
    assert!(log.is_empty());
}
