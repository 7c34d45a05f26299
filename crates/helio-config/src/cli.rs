//! Command-line argument parsing for Helio.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Helio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "helio", about = "Animated orrery: planets on fixed ellipses around a spinning sun")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Milliseconds between frames for the fixed-step clock.
    #[arg(long)]
    pub frame_ms: Option<f64>,

    /// Drive frames from the wall clock instead of a fixed step.
    #[arg(long)]
    pub realtime: bool,

    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the final body positions as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(frames) = args.frames {
            self.simulation.frames = frames;
        }
        if let Some(ms) = args.frame_ms {
            self.simulation.frame_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
