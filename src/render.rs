//! Text rendering shared by the full-screen and plain frontends.
//!
//! Everything here is a pure function of its arguments, so rendering the same grid and position
//! twice gives the same text.

use std::time::Duration;

use crate::{
    maze::{Cell, Grid, Position},
    session::{MoveOutcome, TurnOutcome},
};

/// What a single grid cell looks like on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Glyph {
    /// Wall cell.
    Wall,
    /// Floor cell.
    Floor,
    /// Start cell the player is not standing on.
    Start,
    /// Exit cell the player is not standing on.
    Exit,
    /// Cell the player stands on.
    Player,
}

impl Glyph {
    /// Returns the two-column text for this glyph, so that cells look square in a terminal.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "\u{2588}\u{2588}",
            Self::Floor => "  ",
            Self::Start => "S ",
            Self::Exit => "E ",
            Self::Player => "P ",
        }
    }
}

impl From<Cell> for Glyph {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Self::Wall,
            Cell::Floor => Self::Floor,
            Cell::Start => Self::Start,
            Cell::Exit => Self::Exit,
        }
    }
}

/// Maps every cell of the grid to its glyph, replacing the player's cell with [`Glyph::Player`].
pub(crate) fn glyph_rows(grid: &Grid, player: Position) -> Vec<Vec<Glyph>> {
    grid.rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    if Position::new(row_idx, col_idx) == player {
                        Glyph::Player
                    } else {
                        Glyph::from(*cell)
                    }
                })
                .collect()
        })
        .collect()
}

/// Renders the grid as plain text lines.
pub(crate) fn maze_lines(grid: &Grid, player: Position) -> Vec<String> {
    glyph_rows(grid, player)
        .into_iter()
        .map(|row| row.into_iter().map(Glyph::as_str).collect())
        .collect()
}

/// Formats a duration as zero-padded `MM:SS`.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Heading naming the maze being played, e.g. `LABYRINTH 1/3`.
pub(crate) fn heading(current: usize, total: usize) -> String {
    format!("LABYRINTH {current}/{total}")
}

/// Lines explaining the controls, shown before the session starts.
pub(crate) fn instructions(total: usize) -> Vec<String> {
    vec![
        "LABYRINTH GAME".to_owned(),
        "Instructions:".to_owned(),
        "- Use W (up), A (left), S (down), D (right) to move".to_owned(),
        "- S = Start, E = Exit, P = You, \u{2588}\u{2588} = Wall".to_owned(),
        format!("- Clear all {total} labyrinths to win!"),
        "- Press Q to leave the game".to_owned(),
    ]
}

/// Lines summarising a completed session.
pub(crate) fn victory(total: usize, elapsed: Duration) -> Vec<String> {
    vec![
        "CONGRATULATIONS!".to_owned(),
        format!("You completed all {total} labyrinths!"),
        format!("Total time: {}", format_elapsed(elapsed)),
    ]
}

/// Feedback line for the outcome of a turn, if the outcome warrants one.
///
/// Victory is not described here; frontends show [`victory`] instead.
pub(crate) fn feedback(outcome: TurnOutcome) -> Option<String> {
    match outcome {
        TurnOutcome::Ignored | TurnOutcome::Move(MoveOutcome::Won(_)) => None,
        TurnOutcome::TryAgain(input) => Some(format!("Invalid move {input:?}! Use W, A, S or D.")),
        TurnOutcome::Quit => Some("Leaving the game...".to_owned()),
        TurnOutcome::Move(MoveOutcome::OutOfBounds) => {
            Some("Invalid move! You cannot leave the labyrinth.".to_owned())
        }
        TurnOutcome::Move(MoveOutcome::Blocked) => Some("You hit a wall!".to_owned()),
        TurnOutcome::Move(MoveOutcome::Moved(position)) => Some(format!("Moving to {position}")),
        TurnOutcome::Move(MoveOutcome::Cleared { next }) => Some(format!(
            "Congratulations! You found the exit! Loading labyrinth {next}..."
        )),
    }
}
