//! This crate contains the source code for the binary for the game labyrintime.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrintime::{init_logging, run_plain, App, Cli};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.plain)?;

    if cli.plain {
        return run_plain(&cli);
    }

    let mut terminal = ratatui::init();
    let result = App::new(&cli).run(&mut terminal);
    ratatui::restore();

    result
}
