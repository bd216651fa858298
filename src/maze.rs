//! Maze data and parsing module.
//!
//! This module contains the cell, position and grid types the game is played on, the parser that
//! turns an embedded text layout into a validated [`Maze`], and the built-in layouts themselves.

use std::fmt;

use thiserror::Error;

use crate::{pathfinding, types::Direction};

/// Built-in labyrinth layouts, in the order they are played.
///
/// `#` is a wall, a space is floor, `S` is the start cell and `E` the exit. Rows may differ in
/// length; the second layout relies on that.
pub(crate) const BUILTIN_LAYOUTS: [&str; 3] = [
    "\
#############
#S         ##
##### ### ###
#     #   ###
# ### # # ###
# #   # #   #
# # ### ### #
# #         #
# ######### #
#           #
###########E#",
    "\
###############
#S  # #   #  #
# # # # # # ##
# #   # #   ##
# ##### ######
#             #
##### ####### #
#     #     # #
# ##### ### # #
# #     #   # #
# # ####### # #
# #         # #
# ########### #
#            E#
###############",
    "\
#################
#S              #
# ############# #
# #           # #
# # ####### # # #
# # #     # # # #
# # # # # # # # #
# # # # # # # # #
# #   #   #   # #
# ############# #
# #             #
# ###############
#               #
############### #
#              E#
#################",
];

/// A single cell of a labyrinth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    /// Impassable cell.
    Wall,
    /// Open cell.
    Floor,
    /// Open cell where the player appears when the maze is loaded.
    Start,
    /// Open cell that completes the maze when stepped on.
    Exit,
}

impl Cell {
    /// Parses a layout character into a cell, returning [`None`] for unknown characters.
    pub(crate) const fn from_char(input: char) -> Option<Self> {
        match input {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::Floor),
            'S' => Some(Self::Start),
            'E' => Some(Self::Exit),
            _ => None,
        }
    }

    /// Returns whether the player may stand on this cell.
    pub(crate) const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// A `(row, column)` coordinate into a [`Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Position {
    /// Zero-based row index, counted from the top.
    pub(crate) row: usize,
    /// Zero-based column index, counted from the left of the row.
    pub(crate) col: usize,
}

impl Position {
    /// Builds a position from its row and column.
    pub(crate) const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parsed two-dimensional labyrinth.
///
/// Rows are not required to share a length. A position is inside the grid only if its row exists
/// and its column is within that row's own length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Grid {
    /// Cells stored row by row.
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Returns the cell at `position`, or [`None`] when the position lies outside the grid.
    pub(crate) fn cell(&self, position: Position) -> Option<Cell> {
        self.rows
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
    }

    /// Computes the position one step away from `from`, if that position lies inside the grid.
    ///
    /// The returned position may hold a wall; only the bounds are checked here.
    pub(crate) fn step(&self, from: Position, direction: Direction) -> Option<Position> {
        let (rows, cols) = direction.delta();
        let candidate = Position::new(
            from.row.checked_add_signed(rows)?,
            from.col.checked_add_signed(cols)?,
        );

        self.cell(candidate).map(|_| candidate)
    }

    /// Returns the rows of the grid.
    pub(crate) fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the number of rows.
    pub(crate) fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the length of the longest row.
    pub(crate) fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or_default()
    }
}

/// Reasons a layout is rejected when it is parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LayoutError {
    /// The layout has no rows at all.
    #[error("layout is empty")]
    Empty,
    /// The layout contains a character that is not a known cell.
    #[error("unknown cell {glyph:?} at {position}")]
    UnknownCell {
        /// Offending character.
        glyph: char,
        /// Where it was found.
        position: Position,
    },
    /// The layout has no start marker.
    #[error("layout has no start cell")]
    MissingStart,
    /// The layout has no exit marker.
    #[error("layout has no exit cell")]
    MissingExit,
    /// The layout has more than one start marker.
    #[error("second start cell at {second}, first one at {first}")]
    DuplicateStart {
        /// First start marker found in reading order.
        first: Position,
        /// Next start marker found in reading order.
        second: Position,
    },
    /// The layout has more than one exit marker.
    #[error("second exit cell at {second}, first one at {first}")]
    DuplicateExit {
        /// First exit marker found in reading order.
        first: Position,
        /// Next exit marker found in reading order.
        second: Position,
    },
    /// No path of open cells leads from the start to the exit.
    #[error("exit at {exit} cannot be reached from start at {start}")]
    Unreachable {
        /// Start cell.
        start: Position,
        /// Exit cell.
        exit: Position,
    },
}

/// A validated labyrinth together with its marker coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Maze {
    /// Parsed cells.
    pub(crate) grid: Grid,
    /// Unique start cell.
    pub(crate) start: Position,
    /// Unique exit cell.
    pub(crate) exit: Position,
}

impl Maze {
    /// Parses and validates a text layout.
    ///
    /// One row is produced per line and one cell per character. The layout must contain exactly
    /// one start and one exit marker, and the exit must be reachable from the start through open
    /// cells.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] describing the first problem found.
    pub(crate) fn parse(layout: &str) -> Result<Self, LayoutError> {
        let mut rows = Vec::new();
        let mut start = None;
        let mut exit = None;

        for (row_idx, line) in layout.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());

            for (col_idx, glyph) in line.chars().enumerate() {
                let position = Position::new(row_idx, col_idx);
                let cell =
                    Cell::from_char(glyph).ok_or(LayoutError::UnknownCell { glyph, position })?;

                match cell {
                    Cell::Start => {
                        if let Some(first) = start {
                            return Err(LayoutError::DuplicateStart {
                                first,
                                second: position,
                            });
                        }
                        start = Some(position);
                    }
                    Cell::Exit => {
                        if let Some(first) = exit {
                            return Err(LayoutError::DuplicateExit {
                                first,
                                second: position,
                            });
                        }
                        exit = Some(position);
                    }
                    Cell::Wall | Cell::Floor => {}
                }

                row.push(cell);
            }

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let start = start.ok_or(LayoutError::MissingStart)?;
        let exit = exit.ok_or(LayoutError::MissingExit)?;
        let grid = Grid { rows };

        if pathfinding::shortest_path(&grid, start, exit).is_none() {
            return Err(LayoutError::Unreachable { start, exit });
        }

        Ok(Self { grid, start, exit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_layouts_parse() {
        for (index, layout) in BUILTIN_LAYOUTS.iter().enumerate() {
            let maze = Maze::parse(layout)
                .unwrap_or_else(|err| panic!("built-in maze {index} should parse: {err}"));

            assert_eq!(maze.grid.cell(maze.start), Some(Cell::Start));
            assert_eq!(maze.grid.cell(maze.exit), Some(Cell::Exit));
        }
    }

    #[test]
    fn test_first_layout_dimensions_and_markers() {
        let maze = Maze::parse(BUILTIN_LAYOUTS[0]).expect("first maze should parse");

        assert_eq!(maze.grid.height(), 11);
        assert_eq!(maze.grid.width(), 13);
        assert_eq!(maze.start, Position::new(1, 1));
        assert_eq!(maze.exit, Position::new(10, 11));
    }

    #[test]
    fn test_second_layout_is_ragged() {
        let maze = Maze::parse(BUILTIN_LAYOUTS[1]).expect("second maze should parse");
        let lengths: Vec<usize> = maze.grid.rows().iter().map(Vec::len).collect();

        assert_eq!(lengths.first(), Some(&15));
        assert_eq!(lengths.get(1), Some(&14));
        assert_eq!(maze.grid.width(), 15);
        assert_eq!(maze.grid.cell(Position::new(1, 14)), None);
        assert_eq!(maze.grid.cell(Position::new(5, 14)), Some(Cell::Wall));
    }

    #[test]
    fn test_parse_minimal_layout() {
        let maze = Maze::parse("####\n#SE#\n####").expect("minimal maze should parse");

        assert_eq!(maze.start, Position::new(1, 1));
        assert_eq!(maze.exit, Position::new(1, 2));
        assert_eq!(maze.grid.cell(Position::new(0, 0)), Some(Cell::Wall));
    }

    #[test]
    fn test_parse_empty_layout() {
        assert_eq!(Maze::parse(""), Err(LayoutError::Empty));
    }

    #[test]
    fn test_parse_unknown_cell() {
        assert_eq!(
            Maze::parse("####\n#SxE\n####"),
            Err(LayoutError::UnknownCell {
                glyph: 'x',
                position: Position::new(1, 2),
            })
        );
    }

    #[test]
    fn test_parse_missing_markers() {
        assert_eq!(Maze::parse("###\n# E\n###"), Err(LayoutError::MissingStart));
        assert_eq!(Maze::parse("###\n#S \n###"), Err(LayoutError::MissingExit));
    }

    #[test]
    fn test_parse_duplicate_markers() {
        assert_eq!(
            Maze::parse("#####\n#SSE#\n#####"),
            Err(LayoutError::DuplicateStart {
                first: Position::new(1, 1),
                second: Position::new(1, 2),
            })
        );
        assert_eq!(
            Maze::parse("#####\n#SEE#\n#####"),
            Err(LayoutError::DuplicateExit {
                first: Position::new(1, 2),
                second: Position::new(1, 3),
            })
        );
    }

    #[test]
    fn test_parse_unreachable_exit() {
        assert_eq!(
            Maze::parse("#####\n#S#E#\n#####"),
            Err(LayoutError::Unreachable {
                start: Position::new(1, 1),
                exit: Position::new(1, 3),
            })
        );
    }

    #[test]
    fn test_grid_step_respects_row_length() {
        let maze = Maze::parse("#####\n#S E\n#####").expect("maze should parse");

        assert_eq!(
            maze.grid.step(Position::new(1, 3), Direction::Right),
            None,
            "row 1 ends at column 3"
        );
        assert_eq!(
            maze.grid.step(Position::new(1, 3), Direction::Up),
            Some(Position::new(0, 3))
        );
        assert_eq!(maze.grid.step(Position::new(0, 0), Direction::Left), None);
        assert_eq!(maze.grid.step(Position::new(0, 0), Direction::Up), None);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn test_cell_walkability() {
        assert!(!Cell::Wall.is_walkable());
        assert!(Cell::Floor.is_walkable());
        assert!(Cell::Start.is_walkable());
        assert!(Cell::Exit.is_walkable());
    }
}
