//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level Starstream configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport and render-window settings.
    pub window: WindowConfig,
    /// Universe/streaming settings.
    pub universe: UniverseConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration. The render window the streaming core keeps
/// entities alive in is the viewport plus `margin` on every side, so sprites
/// never pop in or out exactly at the visible edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in world units.
    pub width: u32,
    /// Viewport height in world units.
    pub height: u32,
    /// Extra margin added to every side of the render window.
    pub margin: f32,
}

/// Universe configuration, mirroring the runtime-tunable panel: changing any
/// of these at runtime triggers a full environment reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UniverseConfig {
    /// Star pool size, and therefore star density.
    pub star_count: u32,
    /// Planet pool size, and therefore planet density.
    pub planet_count: u32,
    /// Depth at which parallax displacement and visual scale reach zero.
    pub vanishing_point: f32,
    /// Ship speed cap in world units per second.
    pub max_speed: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log per-tick spawn/retire statistics during flight.
    pub show_tick_stats: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            margin: 120.0,
        }
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            star_count: 1000,
            planet_count: 100,
            vanishing_point: 10.0,
            max_speed: 300.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_tick_stats: false,
        }
    }
}

// --- Load / Save / Reload / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the streaming core cannot be built from, before any
    /// tick executes. The rules mirror the core's own construction checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            reason: reason.to_string(),
        };
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window extent must be positive"));
        }
        if !self.window.margin.is_finite() || self.window.margin < 0.0 {
            return Err(invalid("window margin must not be negative"));
        }
        if self.universe.star_count == 0 {
            return Err(invalid("star count must be positive"));
        }
        if self.universe.planet_count == 0 {
            return Err(invalid("planet count must be positive"));
        }
        if !self.universe.vanishing_point.is_finite() || self.universe.vanishing_point <= 0.0 {
            return Err(invalid("vanishing point must be positive"));
        }
        if !self.universe.max_speed.is_finite() || self.universe.max_speed <= 0.0 {
            return Err(invalid("max speed must be positive"));
        }
        Ok(())
    }
}
