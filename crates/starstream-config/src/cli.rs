//! Command-line argument parsing for Starstream.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Starstream command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "starstream", about = "Starstream parallax space-flight demo")]
pub struct CliArgs {
    /// Viewport width in world units.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in world units.
    #[arg(long)]
    pub height: Option<u32>,

    /// Star pool size.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Planet pool size.
    #[arg(long)]
    pub planets: Option<u32>,

    /// Parallax vanishing point.
    #[arg(long)]
    pub vanishing_point: Option<f32>,

    /// Ship speed cap in world units per second.
    #[arg(long)]
    pub max_speed: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
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
        if let Some(stars) = args.stars {
            self.universe.star_count = stars;
        }
        if let Some(planets) = args.planets {
            self.universe.planet_count = planets;
        }
        if let Some(vp) = args.vanishing_point {
            self.universe.vanishing_point = vp;
        }
        if let Some(speed) = args.max_speed {
            self.universe.max_speed = speed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
