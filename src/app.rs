//! App: terminal init, main loop, tick timer and key dispatch.

use crate::GameConfig;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;
use tetros::{GameController, MemoryGrid, Notifier, Phase, RandomTile};

/// Render at ~60 FPS between ticks.
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub type Game = GameController<MemoryGrid, RandomTile>;

/// Last message for the user, shown under the sheet.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }
}

pub struct App {
    config: GameConfig,
    theme: Theme,
    game: Game,
    status: StatusLine,
    last_tick: Instant,
    /// TachyonFX flash over the sheet after game over (created on first game-over frame).
    game_over_effect: Option<Effect>,
    /// Last time we processed the game-over effect (for delta).
    game_over_effect_time: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Self {
        let tiles = match config.seed {
            Some(seed) => RandomTile::seeded(seed),
            None => RandomTile::new(),
        };
        let game = GameController::new(MemoryGrid::new(config.rows, config.columns), tiles);
        Self {
            config,
            theme,
            game,
            status: StatusLine::default(),
            last_tick: Instant::now(),
            game_over_effect: None,
            game_over_effect_time: None,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn apply_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Quit => return Ok(false),
            Action::Game(command) => self.game.handle(command)?,
            Action::Start => {
                if !self.game.is_running() {
                    self.status.clear();
                    self.game_over_effect = None;
                    self.game_over_effect_time = None;
                    self.game.start(&mut self.status)?;
                    self.last_tick = Instant::now();
                }
            }
            Action::ClearSheet => {
                if !self.game.is_running() {
                    self.game.grid_mut().clear();
                }
            }
            Action::None => {}
        }
        Ok(true)
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            let animate = self.config.animate && self.game.phase() == Phase::GameOver;
            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    &self.game,
                    &self.theme,
                    self.status.message(),
                    animate.then_some((&mut self.game_over_effect, &mut self.game_over_effect_time)),
                    now,
                )
            })?;

            if self.game.is_running() && now.duration_since(self.last_tick) >= self.config.tick {
                self.game.on_tick(&mut self.status)?;
                self.last_tick = now;
            }

            if event::poll(self.poll_timeout(Instant::now()))? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if !self.apply_action(key_to_action(key))? {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Frame pacing; the gravity deadline only shortens the wait while a game runs.
    fn poll_timeout(&self, now: Instant) -> Duration {
        if !self.game.is_running() {
            return FRAME_DURATION;
        }
        let next_tick = self.last_tick + self.config.tick;
        FRAME_DURATION.min(next_tick.saturating_duration_since(now))
    }

    #[cfg(test)]
    fn game(&self) -> &Game {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetros::{Command, Grid};

    fn app() -> App {
        let config = GameConfig {
            rows: 6,
            columns: 5,
            tick: Duration::from_millis(100),
            seed: Some(3),
            animate: false,
        };
        App::new(config, Theme::default())
    }

    #[test]
    fn test_start_and_quit_actions() {
        let mut app = app();
        assert!(app.apply_action(Action::Game(Command::FullDrop)).unwrap());
        assert_eq!(app.game().grid().to_string().matches('.').count(), 30);
        assert!(app.apply_action(Action::Start).unwrap());
        assert!(app.game().is_running());
        assert!(!app.apply_action(Action::Quit).unwrap());
    }

    #[test]
    fn test_clear_sheet_only_when_stopped() {
        let mut app = app();
        app.apply_action(Action::Start).unwrap();
        app.apply_action(Action::ClearSheet).unwrap();
        assert!(app.game().active().is_some());
        assert_eq!(app.game().grid().rows(), 6);
        let painted = app.game().grid().to_string().chars().filter(char::is_ascii_digit).count();
        assert!(painted >= 3);
    }

    #[test]
    fn test_poll_waits_full_frame_when_not_running() {
        let mut app = app();
        let later = app.last_tick + Duration::from_secs(5);
        assert_eq!(app.poll_timeout(later), FRAME_DURATION);

        app.apply_action(Action::Start).unwrap();
        assert_eq!(app.poll_timeout(later), Duration::ZERO);
        assert_eq!(app.poll_timeout(app.last_tick), FRAME_DURATION);
    }

    #[test]
    fn test_status_line_records_notifications() {
        let mut status = StatusLine::default();
        status.notify(tetros::GAME_OVER_MESSAGE);
        assert_eq!(status.message(), Some("Game Over!"));
        status.clear();
        assert_eq!(status.message(), None);
    }
}
