//! A timed maze game for the terminal.
//!
//! The player walks through a fixed series of labyrinths, one after another, while a background
//! timer keeps track of how long the whole run takes. The game can be played in a full-screen
//! interface or line by line on standard input and output.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod catalog;
mod cli;
mod console;
mod events;
mod logging;
mod maze;
mod pathfinding;
mod render;
mod session;
mod timer;
mod types;
mod ui;

pub use app::App;
pub use cli::Cli;
pub use console::run_plain;
pub use logging::init as init_logging;
