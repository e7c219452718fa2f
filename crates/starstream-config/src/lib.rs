//! Configuration system for the Starstream engine.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and validation
//! that rejects values the streaming core could not be built from.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, UniverseConfig, WindowConfig};
pub use error::ConfigError;
