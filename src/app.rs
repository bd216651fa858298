//! Core application state for the full-screen interface.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{cli::Cli, events, session::GameSession, types::Screen, ui};

/// Application state container for the maze game.
///
/// This structure holds the state of the full-screen interface, which is to say the structure from
/// which Ratatui will render the game and Crossterm events will help writing to. The game rules
/// themselves live in the session it owns.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the
    /// player quits or dismisses the victory screen, and it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Session being played.
    ///
    /// This field owns the catalog, the current grid, the player position and the timer.
    pub(crate) session: GameSession,
    /// Input line being typed.
    ///
    /// Characters accumulate here until Enter submits the whole line to the session, mirroring a
    /// line-buffered prompt.
    pub(crate) input: String,
    /// Feedback about the last submitted line, if any.
    pub(crate) feedback: Option<String>,
    /// How long the cleared-maze banner stays on screen.
    pub(crate) pause: Duration,
}

impl App {
    /// Creates the application for the given configuration, showing the instructions first.
    pub fn new(cli: &Cli) -> Self {
        Self {
            exit: false,
            screen: Screen::Instructions,
            session: GameSession::default(),
            input: String::new(),
            feedback: None,
            pause: cli.pause(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the current screen and handles user input. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - Session failures, such as the timer thread failing to spawn.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.draw(|frame| ui::draw(self, frame))?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
