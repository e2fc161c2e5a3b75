//! Tetros: falling blocks played inside a spreadsheet grid, in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Result, ensure};
use app::App;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Options derived from CLI that shape the session (sheet size, tick period, RNG seed).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub animate: bool,
}

/// Largest sheet the row-number gutter and column letters (up to ZZ) can label.
const MAX_ROWS: usize = 999;
const MAX_COLUMNS: usize = 702;

impl GameConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        ensure!(
            (4..=MAX_ROWS).contains(&args.rows),
            "--rows must be between 4 and {MAX_ROWS} (got {})",
            args.rows
        );
        ensure!(
            (3..=MAX_COLUMNS).contains(&args.columns),
            "--columns must be between 3 and {MAX_COLUMNS} (got {})",
            args.columns
        );
        ensure!(args.tick_ms > 0, "--tick-ms must be positive");
        Ok(Self {
            rows: args.rows,
            columns: args.columns,
            tick: Duration::from_millis(args.tick_ms),
            seed: args.seed,
            animate: !args.no_animation,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::from_args(&args)?;
    let theme = theme::Theme::for_palette(args.palette);
    let mut app = App::new(config, theme);
    app.run()?;
    Ok(())
}

/// Falling-block puzzle played in the cells of a sheet.
#[derive(Debug, Parser)]
#[command(
    name = "tetros",
    version,
    about = "Falling blocks played inside a spreadsheet grid. Fill a row edge to edge to clear it.",
    long_about = "Tetros renders its pieces into the cells of a sheet: each cell of a piece \
        holds the piece's number. Full rows collapse and everything above moves down.\n\n\
        CONTROLS:\n  a / Left    Move left      d / Right   Move right\n  \
        q           Rotate left    e / Up      Rotate right\n  \
        s / Down    Drop           n / Enter   Start\n  \
        c           Clear sheet    Esc         Quit"
)]
pub struct Args {
    /// Sheet height in rows.
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub rows: usize,

    /// Sheet width in columns.
    #[arg(long, default_value = "10", value_name = "COLS")]
    pub columns: usize,

    /// Gravity tick period in milliseconds.
    #[arg(long, default_value = "400", value_name = "MS")]
    pub tick_ms: u64,

    /// Seed for the piece draw; omit for a random session.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Colour palette: normal, high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the game-over flash.
    #[arg(long)]
    pub no_animation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
