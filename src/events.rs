//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::{
    render,
    session::{MoveOutcome, TurnOutcome},
    types::Screen,
    App,
};

/// How long to wait for a key before redrawing, so the clock keeps moving on screen.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches key presses to [`handle_key`]. It uses
/// a timeout to avoid blocking the UI, and ends the cleared-maze pause once it has lasted long
/// enough.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_INTERVAL)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if let Screen::Cleared(since) = app.screen {
        end_pause(app, since, Instant::now());
    }

    Ok(())
}

/// Applies a single key press to the application.
///
/// On the instructions screen Enter starts the session and Esc leaves. In game, characters build
/// up the input line, Backspace edits it, Enter submits it and Esc quits. Keys are ignored while
/// the cleared-maze banner is shown, and any key dismisses the victory screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match app.screen {
        Screen::Instructions => match code {
            KeyCode::Enter => {
                app.session.start()?;
                app.screen = Screen::InGame;
            }
            KeyCode::Esc => {
                app.session.quit();
                app.exit = true;
            }
            _ => {}
        },
        Screen::InGame => match code {
            KeyCode::Char(input) => app.input.push(input),
            KeyCode::Backspace => {
                let _ = app.input.pop();
            }
            KeyCode::Enter => submit_line(app)?,
            KeyCode::Esc => {
                app.session.quit();
                app.exit = true;
            }
            _ => {}
        },
        Screen::Cleared(_) => {}
        Screen::Victory => app.exit = true,
    }

    Ok(())
}

/// Submits the typed line to the session and reacts to the outcome.
fn submit_line(app: &mut App) -> Result<()> {
    let line = std::mem::take(&mut app.input);
    let outcome = app.session.handle_input(&line)?;
    debug!(?outcome, "line submitted");

    app.feedback = render::feedback(outcome);
    match outcome {
        TurnOutcome::Quit => app.exit = true,
        TurnOutcome::Move(MoveOutcome::Cleared { .. }) => {
            app.screen = Screen::Cleared(Instant::now());
        }
        TurnOutcome::Move(MoveOutcome::Won(_)) => app.screen = Screen::Victory,
        TurnOutcome::Ignored | TurnOutcome::TryAgain(_) | TurnOutcome::Move(_) => {}
    }

    Ok(())
}

/// Returns to the game once the cleared-maze banner has been shown for the configured pause.
fn end_pause(app: &mut App, since: Instant, now: Instant) {
    if now.saturating_duration_since(since) >= app.pause {
        app.screen = Screen::InGame;
        app.feedback = None;
    }
}
