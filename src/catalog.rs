//! Ordered collection of labyrinths handed out one at a time.

use thiserror::Error;
use tracing::info;

use crate::maze::{Grid, LayoutError, Maze, Position, BUILTIN_LAYOUTS};

/// Failures reported by the [`MazeCatalog`].
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CatalogError {
    /// Every maze has already been handed out.
    ///
    /// This is the expected signal that the player has completed the whole series.
    #[error("all {total} mazes have been handed out")]
    Exhausted {
        /// Number of mazes in the catalog.
        total: usize,
    },
    /// A layout failed validation while the catalog was being built.
    #[error("maze {index} is malformed")]
    Layout {
        /// Zero-based position of the layout in the catalog.
        index: usize,
        /// Validation failure.
        #[source]
        source: LayoutError,
    },
}

/// Ordered set of validated mazes and the cursor into it.
///
/// Layouts are parsed once, when the catalog is built. The cursor only moves forward: it counts
/// how many mazes have been handed out, so it equals the 1-based number of the maze currently
/// being played.
#[derive(Clone, Debug)]
pub(crate) struct MazeCatalog {
    /// Parsed mazes in play order.
    mazes: Vec<Maze>,
    /// Number of mazes handed out so far.
    cursor: usize,
}

impl Default for MazeCatalog {
    fn default() -> Self {
        Self::new(&BUILTIN_LAYOUTS).expect("built-in layouts are well formed")
    }
}

impl MazeCatalog {
    /// Builds a catalog from text layouts, validating each of them.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Layout`] for the first layout that fails to parse.
    pub(crate) fn new(layouts: &[&str]) -> Result<Self, CatalogError> {
        let mazes = layouts
            .iter()
            .enumerate()
            .map(|(index, layout)| {
                Maze::parse(layout).map_err(|source| CatalogError::Layout { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { mazes, cursor: 0 })
    }

    /// Hands out a fresh copy of the next maze together with its start position.
    ///
    /// The cursor advances by one on success and never moves back.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Exhausted`] once every maze has been handed out.
    pub(crate) fn next_maze(&mut self) -> Result<(Grid, Position), CatalogError> {
        let maze = self
            .mazes
            .get(self.cursor)
            .ok_or_else(|| CatalogError::Exhausted {
                total: self.mazes.len(),
            })?;
        self.cursor += 1;

        info!(
            maze = self.cursor,
            total = self.mazes.len(),
            start = %maze.start,
            exit = %maze.exit,
            "maze loaded"
        );

        Ok((maze.grid.clone(), maze.start))
    }

    /// Returns whether another call to [`next_maze`](Self::next_maze) would succeed.
    pub(crate) fn has_next(&self) -> bool {
        self.cursor < self.mazes.len()
    }

    /// Returns the number of mazes in the catalog.
    pub(crate) fn total(&self) -> usize {
        self.mazes.len()
    }

    /// Returns the number of mazes handed out so far.
    pub(crate) const fn current(&self) -> usize {
        self.cursor
    }
}
