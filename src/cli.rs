//! Command line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// A timed maze game played through a fixed series of labyrinths.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Play line by line on standard input and output instead of the full-screen interface.
    #[arg(long)]
    pub plain: bool,
    /// Pause after clearing a labyrinth before the next one is shown, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub pause_ms: u64,
    /// Append diagnostics to this file. The `RUST_LOG` environment variable filters them.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Returns the pause shown between two labyrinths.
    pub const fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}
