//! Line-based frontend for plain terminals and pipes.

use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use color_eyre::eyre::Result;
use tracing::info;

use crate::{
    cli::Cli,
    render,
    session::{GameSession, MoveOutcome, TurnOutcome},
};

/// Width of the banner framing the end-of-game summary.
const BANNER_WIDTH: usize = 50;

/// Plays a session on standard input and output.
///
/// # Errors
///
/// Fails if reading from standard input or writing to standard output fails.
pub fn run_plain(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    play(
        &mut GameSession::default(),
        stdin.lock(),
        stdout.lock(),
        cli.pause(),
    )
}

/// Drives `session` with lines read from `input`, writing everything the player sees to `output`.
///
/// The end of the input counts as quitting.
pub(crate) fn play<R: BufRead, W: Write>(
    session: &mut GameSession,
    mut input: R,
    mut output: W,
    pause: Duration,
) -> Result<()> {
    for line in render::instructions(session.catalog().total()) {
        writeln!(output, "{line}")?;
    }
    writeln!(output, "\nPress Enter to start...")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        session.quit();
        return Ok(());
    }

    session.start()?;
    show_maze(session, &mut output)?;

    loop {
        write!(output, "Enter your move (W/A/S/D): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("input closed");
            session.quit();
            writeln!(output)?;
            return Ok(());
        }

        let outcome = session.handle_input(line.trim_end_matches(['\r', '\n']))?;
        if let Some(message) = render::feedback(outcome) {
            writeln!(output, "{message}")?;
        }

        match outcome {
            TurnOutcome::Ignored | TurnOutcome::TryAgain(_) => {}
            TurnOutcome::Quit => return Ok(()),
            TurnOutcome::Move(MoveOutcome::OutOfBounds | MoveOutcome::Blocked) => {}
            TurnOutcome::Move(MoveOutcome::Moved(_)) => write_grid(session, &mut output)?,
            TurnOutcome::Move(MoveOutcome::Cleared { .. }) => {
                output.flush()?;
                thread::sleep(pause);
                show_maze(session, &mut output)?;
            }
            TurnOutcome::Move(MoveOutcome::Won(elapsed)) => {
                let rule = "=".repeat(BANNER_WIDTH);
                writeln!(output, "\n{rule}")?;
                for line in render::victory(session.catalog().total(), elapsed) {
                    writeln!(output, "{line}")?;
                }
                writeln!(output, "{rule}")?;
                return Ok(());
            }
        }
    }
}

/// Writes the heading, the elapsed time and the grid of a freshly loaded maze.
fn show_maze<W: Write>(session: &GameSession, output: &mut W) -> Result<()> {
    let catalog = session.catalog();
    writeln!(
        output,
        "\n=== {} ===",
        render::heading(catalog.current(), catalog.total())
    )?;
    writeln!(output, "Time: {}", render::format_elapsed(session.elapsed()))?;
    write_grid(session, output)
}

/// Writes the grid with the player marker, framed by blank lines.
fn write_grid<W: Write>(session: &GameSession, output: &mut W) -> Result<()> {
    writeln!(output)?;
    for line in render::maze_lines(session.grid(), session.position()) {
        writeln!(output, "{line}")?;
    }
    writeln!(output)?;
    Ok(())
}
