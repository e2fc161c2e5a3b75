//! Layout and drawing: the sheet, sidebar with phase and key help, status line.

use crate::app::Game;
use crate::input::KEY_HELP;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};
use tetros::{Cell, CellCoordinate, Grid, Phase};

/// Terminal columns per sheet cell.
const CELL_WIDTH: u16 = 3;
/// Row-number gutter.
const ROW_HEADER_WIDTH: u16 = 4;
const SIDEBAR_WIDTH: u16 = 26;
/// Duration of the game-over flash in ms.
const GAME_OVER_FLASH_MS: u32 = 600;

/// Spreadsheet column name: A..Z, AA, AB, ...
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Sheet size in terminal cells, border included.
fn sheet_size(rows: usize, columns: usize) -> (u16, u16) {
    let width = ROW_HEADER_WIDTH + columns as u16 * CELL_WIDTH + 2;
    let height = rows as u16 + 1 + 2;
    (width, height)
}

/// Effect slot and its last process time, passed only while the flash should run.
pub type FlashState<'a> = (&'a mut Option<Effect>, &'a mut Option<Instant>);

pub fn draw(
    frame: &mut Frame,
    game: &Game,
    theme: &Theme,
    status: Option<&str>,
    flash: Option<FlashState<'_>>,
    now: Instant,
) {
    let area = frame.area();
    let grid = game.grid();
    let (sheet_w, sheet_h) = sheet_size(grid.rows(), grid.columns());
    let total_w = sheet_w + SIDEBAR_WIDTH;

    // Center horizontally
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);

    // Center vertically; one extra line for the status message
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(sheet_h),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sheet_w), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let board_rect = draw_sheet(frame, game, theme, inner[0]);
    draw_sidebar(frame, game, theme, inner[1]);
    draw_status(frame, theme, status, vert[2]);

    if let Some((effect, process_time)) = flash {
        apply_game_over_flash(frame, theme, board_rect, effect, process_time, now);
    }
}

/// Draw the sheet with headers; returns the rect covering the cells.
fn draw_sheet(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) -> Rect {
    let grid = game.grid();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Tetros ", Style::default().fg(theme.title)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let header_style = Style::default().fg(theme.header_fg).bg(theme.bg);
    let buf = frame.buffer_mut();
    let right = inner.x + inner.width;
    let bottom = inner.y + inner.height;

    // Column letters
    if inner.height > 0 {
        buf.set_string(inner.x, inner.y, " ".repeat(ROW_HEADER_WIDTH as usize), header_style);
        for column in 0..grid.columns() {
            let x = inner.x + ROW_HEADER_WIDTH + column as u16 * CELL_WIDTH;
            if x + CELL_WIDTH > right {
                break;
            }
            let label = format!("{:^width$}", column_name(column), width = CELL_WIDTH as usize);
            buf.set_string(x, inner.y, label, header_style);
        }
    }

    for row in 0..grid.rows() {
        let y = inner.y + 1 + row as u16;
        if y >= bottom {
            break;
        }
        let label = format!("{:>width$} ", row + 1, width = ROW_HEADER_WIDTH as usize - 1);
        buf.set_string(inner.x, y, label, header_style);
        for column in 0..grid.columns() {
            let x = inner.x + ROW_HEADER_WIDTH + column as u16 * CELL_WIDTH;
            if x + CELL_WIDTH > right {
                break;
            }
            let at = CellCoordinate::new(row as i32, column as i32);
            let cell = grid.value_at(at);
            let style = match cell {
                Cell::Empty => Style::default().fg(theme.div_line).bg(theme.bg),
                Cell::Constant(n) => {
                    let style = Style::default().fg(theme.bg).bg(theme.marker_color(n));
                    if game.active().is_some_and(|piece| piece.occupies(at)) {
                        style.add_modifier(Modifier::BOLD)
                    } else {
                        style
                    }
                }
            };
            let text = match cell {
                Cell::Empty => format!("{:^width$}", "·", width = CELL_WIDTH as usize),
                Cell::Constant(_) => format!("{:^width$}", cell.to_string(), width = CELL_WIDTH as usize),
            };
            buf.set_string(x, y, text, style);
        }
    }

    Rect {
        x: inner.x + ROW_HEADER_WIDTH,
        y: inner.y + 1,
        width: (grid.columns() as u16 * CELL_WIDTH).min(inner.width.saturating_sub(ROW_HEADER_WIDTH)),
        height: (grid.rows() as u16).min(inner.height.saturating_sub(1)),
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Press n to start",
        Phase::Running => "Running",
        Phase::GameOver => "Over. c clears, n starts",
    }
}

fn draw_sidebar(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let key_style = Style::default().fg(theme.inactive_fg);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let mut lines = vec![
        Line::from(Span::styled("Status", title_style)),
        Line::from(Span::styled(phase_label(game.phase()), fg_style)),
        Line::from(""),
    ];
    if let Some(piece) = game.active() {
        lines.push(Line::from(vec![
            Span::styled("Piece ", title_style),
            Span::styled(
                format!(" {} ", piece.tag()),
                Style::default().fg(theme.bg).bg(theme.marker_color(i64::from(piece.tag()))),
            ),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Keys", title_style)));
    for (keys, label) in KEY_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", keys), key_style),
            Span::styled(label, fg_style),
        ]));
    }
    Paragraph::new(ratatui::text::Text::from(lines)).render(inner, frame.buffer_mut());
}

fn draw_status(frame: &mut Frame, theme: &Theme, status: Option<&str>, area: Rect) {
    if let Some(text) = status {
        let style = Style::default().fg(theme.title).add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(Span::styled(format!(" {} ", text), style)))
            .render(area, frame.buffer_mut());
    }
}

/// Create or update the game-over flash and process it (TachyonFX: cells fade in from the
/// title colour).
fn apply_game_over_flash(
    frame: &mut Frame,
    theme: &Theme,
    board_rect: Rect,
    effect: &mut Option<Effect>,
    process_time: &mut Option<Instant>,
    now: Instant,
) {
    let delta = process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *process_time = Some(now);

    let effect = effect.get_or_insert_with(|| {
        fx::fade_from(theme.title, theme.title, (GAME_OVER_FLASH_MS, Interpolation::QuadOut))
            .with_area(board_rect)
    });
    if !effect.done() {
        frame.render_effect(effect, board_rect, TfxDuration::from_millis(delta_ms));
    }
}
