//! Type definitions and enums for player commands and application navigation.

use std::time::Instant;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the full-screen interface. It
/// is used to determine which screen to render and how to interpret key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Instructions shown before the session starts.
    ///
    /// This variant represents the startup screen. Pressing Enter starts the session and its
    /// timer.
    Instructions,
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the current labyrinth is displayed and moves are
    /// typed into the input line.
    InGame,
    /// Short pause after a maze other than the last one has been cleared.
    ///
    /// The variant holds the instant the exit was reached. The next maze is already loaded by the
    /// time this screen is shown; the banner only paces the player.
    Cleared(Instant),
    /// Summary shown once every maze has been cleared.
    Victory,
}

/// One of the four directions the player can move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column to the left.
    Left,
    /// One column to the right.
    Right,
}

impl Direction {
    /// Every direction, in the order neighbours are explored by the pathfinder.
    pub(crate) const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, column)` offset for a single step in this direction.
    pub(crate) const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// A command read from the player's input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Move the player one cell.
    Move(Direction),
    /// Abandon the session.
    Quit,
}

impl Command {
    /// Interprets a single character as a command.
    ///
    /// The comparison is case-insensitive: `W`, `A`, `S` and `D` move up, left, down and right, and
    /// `Q` quits. Any other character yields [`None`].
    pub(crate) const fn from_char(input: char) -> Option<Self> {
        match input.to_ascii_uppercase() {
            'W' => Some(Self::Move(Direction::Up)),
            'A' => Some(Self::Move(Direction::Left)),
            'S' => Some(Self::Move(Direction::Down)),
            'D' => Some(Self::Move(Direction::Right)),
            'Q' => Some(Self::Quit),
            _ => None,
        }
    }
}
