//! Key bindings: the sheet's letter keys plus arrows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tetros::Command;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Start,
    ClearSheet,
    Quit,
    None,
}

/// (keys, description) pairs shown in the sidebar.
pub const KEY_HELP: [(&str, &str); 8] = [
    ("a ←", "Move Left"),
    ("d →", "Move Right"),
    ("q", "Rotate Left"),
    ("e ↑", "Rotate Right"),
    ("s ↓ Space", "Drop"),
    ("n Enter", "Start Tetros"),
    ("c", "Clear sheet"),
    ("Esc", "Quit"),
];

/// Map key event to action. Letters match regardless of Shift.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('a') => Action::Game(Command::ShiftLeft),
        KeyCode::Right | KeyCode::Char('d') => Action::Game(Command::ShiftRight),
        KeyCode::Char('q') => Action::Game(Command::RotateLeft),
        KeyCode::Up | KeyCode::Char('e') => Action::Game(Command::RotateRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char(' ') => Action::Game(Command::FullDrop),
        KeyCode::Enter | KeyCode::Char('n') => Action::Start,
        KeyCode::Char('c') => Action::ClearSheet,
        _ => Action::None,
    }
}
