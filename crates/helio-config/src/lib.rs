//! Configuration system for Helio.
//!
//! Holds the static body table and the presentation settings around it,
//! persisted to disk as RON. Supports CLI overrides via clap, change detection
//! on the config file, and forward/backward compatible serialization.

mod bodies;
mod cli;
mod config;
mod error;

pub use bodies::{BodyConfig, RingConfig, SatelliteConfig, SunConfig, default_bodies};
pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, SimulationConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
