//! Game session state machine.
//!
//! This module contains the [`GameSession`], which owns the maze catalog, the grid being played,
//! the player position and the timer. Frontends feed it raw input lines or directions and render
//! whatever it reports back.

use std::{io, time::Duration};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::{CatalogError, MazeCatalog},
    maze::{Cell, Grid, Position},
    timer::{ElapsedTime, Timer, TICK},
    types::{Command, Direction},
};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// Created but not started; no maze is loaded and the timer is idle.
    AwaitingStart,
    /// Playing the maze with the given zero-based index.
    Playing(usize),
    /// Every maze was cleared in the given time.
    Won(Duration),
    /// The player gave up.
    Quit,
}

/// Result of a single movement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// The target cell lies outside the grid; nothing changed.
    OutOfBounds,
    /// The target cell is a wall; nothing changed.
    Blocked,
    /// The player now stands on the given cell.
    Moved(Position),
    /// The exit was reached and the maze with the given 1-based number is now loaded.
    Cleared {
        /// Number of the maze that was just loaded.
        next: usize,
    },
    /// The exit of the last maze was reached in the given time.
    Won(Duration),
}

/// Result of interpreting one line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnOutcome {
    /// The line was empty; the player is simply prompted again.
    Ignored,
    /// The line started with a character that is not a command.
    TryAgain(char),
    /// The line was a movement command.
    Move(MoveOutcome),
    /// The line was the quit command.
    Quit,
}

/// Failures reported by the [`GameSession`].
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    /// [`GameSession::start`] was called on a session that already started.
    #[error("the session has already started")]
    AlreadyStarted,
    /// Input was submitted while no maze is being played.
    #[error("no maze is being played")]
    NotPlaying,
    /// The catalog could not provide a maze.
    #[error("maze catalog failure")]
    Catalog(#[from] CatalogError),
    /// The timer thread could not be spawned.
    #[error("failed to start the timer")]
    Timer(#[from] io::Error),
}

/// A single playthrough of the catalog.
#[derive(Debug)]
pub(crate) struct GameSession {
    /// Mazes still to be played, together with the cursor into them.
    catalog: MazeCatalog,
    /// Grid of the maze being played.
    grid: Grid,
    /// Cell the player stands on. Always a walkable cell of `grid` while playing.
    position: Position,
    /// Current lifecycle state.
    state: SessionState,
    /// Time elapsed since the session started, as last written by the timer.
    elapsed: ElapsedTime,
    /// Running timer, present between start and the end of the session.
    timer: Option<Timer>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(MazeCatalog::default())
    }
}

impl GameSession {
    /// Creates a session over the given catalog, waiting to be started.
    pub(crate) fn new(catalog: MazeCatalog) -> Self {
        Self {
            catalog,
            grid: Grid::default(),
            position: Position::default(),
            state: SessionState::AwaitingStart,
            elapsed: ElapsedTime::default(),
            timer: None,
        }
    }

    /// Loads the first maze and starts the timer.
    ///
    /// # Errors
    ///
    /// Fails if the session was already started, if the catalog is empty or if the timer thread
    /// cannot be spawned.
    pub(crate) fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingStart {
            return Err(SessionError::AlreadyStarted);
        }

        (self.grid, self.position) = self.catalog.next_maze()?;
        self.timer = Some(Timer::start(self.elapsed.clone(), TICK)?);
        self.state = SessionState::Playing(0);
        info!(total = self.catalog.total(), "session started");

        Ok(())
    }

    /// Interprets one line of player input.
    ///
    /// Only the first character matters and it is compared case-insensitively. Unknown
    /// characters leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPlaying`] when no maze is being played.
    pub(crate) fn handle_input(&mut self, line: &str) -> Result<TurnOutcome, SessionError> {
        if !matches!(self.state, SessionState::Playing(_)) {
            return Err(SessionError::NotPlaying);
        }

        let Some(first) = line.chars().next() else {
            return Ok(TurnOutcome::Ignored);
        };

        match Command::from_char(first) {
            Some(Command::Move(direction)) => self.submit_move(direction).map(TurnOutcome::Move),
            Some(Command::Quit) => {
                self.quit();
                Ok(TurnOutcome::Quit)
            }
            None => {
                debug!(input = ?first, "unrecognised command");
                Ok(TurnOutcome::TryAgain(first))
            }
        }
    }

    /// Attempts to move the player one cell.
    ///
    /// Moves leaving the grid or hitting a wall are rejected without touching the position. An
    /// accepted move onto the exit loads the next maze, or ends the session once the catalog is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPlaying`] when no maze is being played.
    pub(crate) fn submit_move(&mut self, direction: Direction) -> Result<MoveOutcome, SessionError> {
        let SessionState::Playing(index) = self.state else {
            return Err(SessionError::NotPlaying);
        };

        let Some(candidate) = self.grid.step(self.position, direction) else {
            debug!(?direction, from = %self.position, "move out of bounds");
            return Ok(MoveOutcome::OutOfBounds);
        };

        let cell = self.grid.cell(candidate);
        if !cell.is_some_and(Cell::is_walkable) {
            debug!(?direction, from = %self.position, "move blocked");
            return Ok(MoveOutcome::Blocked);
        }

        self.position = candidate;
        debug!(?direction, to = %candidate, "moved");

        if cell != Some(Cell::Exit) {
            return Ok(MoveOutcome::Moved(candidate));
        }

        match self.catalog.next_maze() {
            Ok((grid, start)) => {
                self.grid = grid;
                self.position = start;
                self.state = SessionState::Playing(index + 1);
                info!(cleared = index + 1, "maze cleared");

                Ok(MoveOutcome::Cleared {
                    next: self.catalog.current(),
                })
            }
            Err(CatalogError::Exhausted { .. }) => {
                let elapsed = self.stop_timer();
                self.state = SessionState::Won(elapsed);
                info!(elapsed_ms = elapsed.as_millis(), "every maze cleared");

                Ok(MoveOutcome::Won(elapsed))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Abandons the session from whatever state it is in and stops the timer.
    pub(crate) fn quit(&mut self) {
        let elapsed = self.stop_timer();
        self.state = SessionState::Quit;
        info!(elapsed_ms = elapsed.as_millis(), "session quit");
    }

    /// Stops the timer if it is running and returns the last elapsed time.
    fn stop_timer(&mut self) -> Duration {
        self.timer
            .take()
            .map_or_else(|| self.elapsed.get(), |mut timer| timer.stop())
    }

    /// Returns the current lifecycle state.
    pub(crate) const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the grid being played.
    pub(crate) const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player position.
    pub(crate) const fn position(&self) -> Position {
        self.position
    }

    /// Returns the last elapsed time written by the timer.
    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Returns the catalog, for maze counters.
    pub(crate) const fn catalog(&self) -> &MazeCatalog {
        &self.catalog
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{thread, time::Instant};

    use super::*;
    use crate::{
        maze::{Maze, BUILTIN_LAYOUTS},
        pathfinding,
    };

    /// Converts a path of adjacent positions into the moves that walk it.
    pub(crate) fn directions_along(path: &[Position]) -> Vec<Direction> {
        path.windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Direction::ALL
                    .into_iter()
                    .find(|direction| {
                        let (rows, cols) = direction.delta();
                        from.row.checked_add_signed(rows) == Some(to.row)
                            && from.col.checked_add_signed(cols) == Some(to.col)
                    }),
                _ => None,
            })
            .collect()
    }

    /// Returns the moves solving the built-in maze with the given index.
    pub(crate) fn solution(index: usize) -> Vec<Direction> {
        let layout = BUILTIN_LAYOUTS.get(index).expect("built-in maze index");
        let maze = Maze::parse(layout).expect("built-in maze should parse");
        let path =
            pathfinding::shortest_path(&maze.grid, maze.start, maze.exit).expect("maze is solvable");

        directions_along(&path)
    }

    fn started() -> GameSession {
        let mut session = GameSession::default();
        session.start().expect("session should start");
        session
    }

    #[test]
    fn test_new_session_awaits_start() {
        let session = GameSession::default();

        assert_eq!(session.state(), SessionState::AwaitingStart);
        assert_eq!(session.catalog().current(), 0);
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_start_loads_first_maze() {
        let session = started();

        assert_eq!(session.state(), SessionState::Playing(0));
        assert_eq!(session.position(), Position::new(1, 1));
        assert_eq!(session.grid().cell(session.position()), Some(Cell::Start));
        assert_eq!(session.catalog().current(), 1);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut session = started();

        assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
        assert_eq!(session.catalog().current(), 1);
    }

    #[test]
    fn test_start_with_empty_catalog_fails() {
        let catalog = MazeCatalog::new(&[]).expect("an empty catalog is valid");
        let mut session = GameSession::new(catalog);

        assert!(matches!(
            session.start(),
            Err(SessionError::Catalog(CatalogError::Exhausted { total: 0 }))
        ));
        assert_eq!(session.state(), SessionState::AwaitingStart);
    }

    #[test]
    fn test_input_before_start_is_rejected() {
        let mut session = GameSession::default();

        assert!(matches!(
            session.handle_input("d"),
            Err(SessionError::NotPlaying)
        ));
        assert!(matches!(
            session.submit_move(Direction::Right),
            Err(SessionError::NotPlaying)
        ));
    }

    #[test]
    fn test_wall_blocks_move() {
        let mut session = started();

        for direction in [Direction::Up, Direction::Down, Direction::Left] {
            assert_eq!(
                session.submit_move(direction).expect("session is playing"),
                MoveOutcome::Blocked,
                "{direction:?} from the start is a wall"
            );
            assert_eq!(session.position(), Position::new(1, 1));
        }
    }

    #[test]
    fn test_out_of_bounds_move_is_rejected() {
        let catalog = MazeCatalog::new(&["S E"]).expect("layout should parse");
        let mut session = GameSession::new(catalog);
        session.start().expect("session should start");

        for direction in [Direction::Up, Direction::Down, Direction::Left] {
            assert_eq!(
                session.submit_move(direction).expect("session is playing"),
                MoveOutcome::OutOfBounds,
                "{direction:?} leaves a single-row grid"
            );
            assert_eq!(session.position(), Position::new(0, 0));
        }
    }

    #[test]
    fn test_ragged_row_end_is_out_of_bounds() {
        let catalog = MazeCatalog::new(&["#####\n#S  \n#E###"]).expect("layout should parse");
        let mut session = GameSession::new(catalog);
        session.start().expect("session should start");

        for _ in 0..3 {
            let _ = session
                .submit_move(Direction::Right)
                .expect("session is playing");
        }

        assert_eq!(session.position(), Position::new(1, 3));
        assert_eq!(
            session.submit_move(Direction::Right).expect("session is playing"),
            MoveOutcome::OutOfBounds
        );
    }

    #[test]
    fn test_accepted_move_updates_position() {
        let mut session = started();

        assert_eq!(
            session.submit_move(Direction::Right).expect("session is playing"),
            MoveOutcome::Moved(Position::new(1, 2))
        );
        assert_eq!(session.position(), Position::new(1, 2));
    }

    #[test]
    fn test_first_maze_solution_loads_second_maze() {
        let mut session = started();
        let moves = solution(0);
        let (last, walk) = moves.split_last().expect("solution is not empty");

        for direction in walk {
            assert!(matches!(
                session.submit_move(*direction).expect("session is playing"),
                MoveOutcome::Moved(_)
            ));
        }
        assert_eq!(session.position(), Position::new(9, 11));

        assert_eq!(
            session.submit_move(*last).expect("session is playing"),
            MoveOutcome::Cleared { next: 2 }
        );
        assert_eq!(session.state(), SessionState::Playing(1));
        assert_eq!(session.catalog().current(), 2);
        assert_eq!(session.position(), Position::new(1, 1));
        assert_eq!(session.grid().height(), 15);
    }

    #[test]
    fn test_clearing_every_maze_wins() {
        let mut session = started();

        for index in 0..2 {
            for direction in solution(index) {
                let _ = session.submit_move(direction).expect("session is playing");
            }
        }
        let moves = solution(2);
        let (last, walk) = moves.split_last().expect("solution is not empty");
        for direction in walk {
            let _ = session.submit_move(*direction).expect("session is playing");
        }

        let outcome = session.submit_move(*last).expect("session is playing");
        let MoveOutcome::Won(elapsed) = outcome else {
            panic!("expected a win, got {outcome:?}");
        };

        assert_eq!(session.state(), SessionState::Won(elapsed));
        assert!(!session.catalog().has_next());
        assert!(matches!(
            session.handle_input("w"),
            Err(SessionError::NotPlaying)
        ));
    }

    #[test]
    fn test_unknown_command_changes_nothing() {
        let mut session = started();

        assert_eq!(
            session.handle_input("Z").expect("session is playing"),
            TurnOutcome::TryAgain('Z')
        );
        assert_eq!(session.position(), Position::new(1, 1));
        assert_eq!(session.state(), SessionState::Playing(0));
    }

    #[test]
    fn test_empty_input_is_ignored() {
        let mut session = started();

        assert_eq!(
            session.handle_input("").expect("session is playing"),
            TurnOutcome::Ignored
        );
        assert_eq!(session.state(), SessionState::Playing(0));
    }

    #[test]
    fn test_input_uses_first_character_case_insensitively() {
        let mut session = started();

        assert_eq!(
            session.handle_input("dance").expect("session is playing"),
            TurnOutcome::Move(MoveOutcome::Moved(Position::new(1, 2)))
        );
        assert_eq!(
            session.handle_input("A").expect("session is playing"),
            TurnOutcome::Move(MoveOutcome::Moved(Position::new(1, 1)))
        );
    }

    #[test]
    fn test_quit_command_ends_session() {
        let mut session = started();

        assert_eq!(
            session.handle_input("q").expect("session is playing"),
            TurnOutcome::Quit
        );
        assert_eq!(session.state(), SessionState::Quit);
        assert!(matches!(
            session.handle_input("d"),
            Err(SessionError::NotPlaying)
        ));
    }

    #[test]
    fn test_quit_before_start() {
        let mut session = GameSession::default();

        session.quit();

        assert_eq!(session.state(), SessionState::Quit);
    }

    #[test]
    fn test_quit_freezes_elapsed_time() {
        let mut session = started();

        session.quit();
        let frozen = session.elapsed();
        thread::sleep(Duration::from_millis(1100));

        assert_eq!(session.elapsed(), frozen);
    }

    #[test]
    fn test_timer_runs_without_input() {
        let started_at = Instant::now();
        let session = started();

        thread::sleep(Duration::from_millis(1500));
        let millis = session.elapsed().as_millis();

        assert!(started_at.elapsed() < Duration::from_secs(2));
        assert!((1000..2000).contains(&millis), "got {millis} ms");
        assert_eq!(session.position(), Position::new(1, 1));
    }
}
