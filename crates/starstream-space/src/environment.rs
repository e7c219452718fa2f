//! The environment facade: one star layer, one planet layer, and the
//! runtime-tunable settings surface that mirrors the host's debug panel.

use glam::Vec2;
use starstream_math::Rect;

use crate::entity::EntityKind;
use crate::error::SpaceError;
use crate::layer::{EnvironmentLayer, LayerParams, TickStats};

// Depth bands as fractions of the vanishing point: stars far, planets near.
const STAR_DEPTH_BAND: (f32, f32) = (0.9, 0.99);
const PLANET_DEPTH_BAND: (f32, f32) = (0.1, 0.5);

// Travel distance between spawns. Planets are rare; stars stream steadily.
const STAR_SPAWN_INTERVAL: (f32, f32) = (20.0, 60.0);
const PLANET_SPAWN_INTERVAL: (f32, f32) = (120.0, 360.0);

// Intrinsic sprite footprints and post-scale size floors, in world units.
const STAR_BASE_SIZE: (f32, f32) = (2.0, 20.0);
const PLANET_BASE_SIZE: (f32, f32) = (20.0, 220.0);
const STAR_MIN_EXTENT: f32 = 1.0;
const PLANET_MIN_EXTENT: f32 = 8.0;

/// The recognized runtime-tunable options. Changing any field through
/// [`Environment::apply_settings`] triggers a full reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseSettings {
    /// Star pool size, and therefore star density.
    pub star_count: usize,
    /// Planet pool size, and therefore planet density.
    pub planet_count: usize,
    /// Controls the parallax falloff curve for both layers.
    pub vanishing_point: f32,
    /// Ship speed cap. Consumed by the flight model, not the tick itself,
    /// but kept on the reset surface like the rest of the panel.
    pub max_speed: f32,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            star_count: 1000,
            planet_count: 100,
            vanishing_point: 10.0,
            max_speed: 300.0,
        }
    }
}

impl UniverseSettings {
    /// Reject settings the layers could not be built from.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.star_count == 0 {
            return Err(SpaceError::invalid("star count must be positive"));
        }
        if self.planet_count == 0 {
            return Err(SpaceError::invalid("planet count must be positive"));
        }
        if !self.vanishing_point.is_finite() || self.vanishing_point <= 0.0 {
            return Err(SpaceError::invalid("vanishing point must be positive"));
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(SpaceError::invalid("max speed must be positive"));
        }
        Ok(())
    }
}

/// Owns the star and planet layers and drives them as one unit.
#[derive(Debug)]
pub struct Environment {
    settings: UniverseSettings,
    window: Rect,
    stars: EnvironmentLayer,
    planets: EnvironmentLayer,
    seed: Option<u64>,
}

impl Environment {
    /// Build and immediately populate both layers.
    pub fn new(window: Rect, settings: UniverseSettings) -> Result<Self, SpaceError> {
        Self::build(window, settings, None)
    }

    /// Build with a fixed seed, for reproducible tests and demos. Each layer
    /// derives its own stream from the seed.
    pub fn with_seed(
        window: Rect,
        settings: UniverseSettings,
        seed: u64,
    ) -> Result<Self, SpaceError> {
        Self::build(window, settings, Some(seed))
    }

    fn build(
        window: Rect,
        settings: UniverseSettings,
        seed: Option<u64>,
    ) -> Result<Self, SpaceError> {
        settings.validate()?;
        if window.is_degenerate() {
            return Err(SpaceError::invalid("render window has no area"));
        }
        let mut stars = match seed {
            Some(seed) => EnvironmentLayer::with_seed(Self::star_params(&settings, window), seed)?,
            None => EnvironmentLayer::new(Self::star_params(&settings, window))?,
        };
        let mut planets = match seed {
            Some(seed) => {
                EnvironmentLayer::with_seed(Self::planet_params(&settings, window), seed ^ 1)?
            }
            None => EnvironmentLayer::new(Self::planet_params(&settings, window))?,
        };
        stars.populate();
        planets.populate();
        Ok(Self {
            settings,
            window,
            stars,
            planets,
            seed,
        })
    }

    fn star_params(settings: &UniverseSettings, window: Rect) -> LayerParams {
        let vp = settings.vanishing_point;
        LayerParams {
            kind: EntityKind::Star,
            pool_size: settings.star_count,
            vanishing_point: vp,
            depth_band: (STAR_DEPTH_BAND.0 * vp)..=(STAR_DEPTH_BAND.1 * vp),
            spawn_interval: STAR_SPAWN_INTERVAL.0..=STAR_SPAWN_INTERVAL.1,
            base_size: STAR_BASE_SIZE.0..=STAR_BASE_SIZE.1,
            min_extent: STAR_MIN_EXTENT,
            window,
        }
    }

    fn planet_params(settings: &UniverseSettings, window: Rect) -> LayerParams {
        let vp = settings.vanishing_point;
        LayerParams {
            kind: EntityKind::Planet,
            pool_size: settings.planet_count,
            vanishing_point: vp,
            depth_band: (PLANET_DEPTH_BAND.0 * vp)..=(PLANET_DEPTH_BAND.1 * vp),
            spawn_interval: PLANET_SPAWN_INTERVAL.0..=PLANET_SPAWN_INTERVAL.1,
            base_size: PLANET_BASE_SIZE.0..=PLANET_BASE_SIZE.1,
            min_extent: PLANET_MIN_EXTENT,
            window,
        }
    }

    /// Run one simulation tick over both layers.
    pub fn tick(&mut self, velocity: Vec2, dt: f32) -> TickStats {
        let mut stats = self.stars.tick(velocity, dt);
        stats.absorb(self.planets.tick(velocity, dt));
        stats
    }

    /// Apply new settings. Returns `Ok(true)` and performs a full reset if
    /// anything changed: active entities return to their pools, pools are
    /// rebuilt to the new sizes, and both layers repopulate from scratch.
    pub fn apply_settings(&mut self, settings: UniverseSettings) -> Result<bool, SpaceError> {
        if settings == self.settings {
            return Ok(false);
        }
        let rebuilt = Self::build(self.window, settings, self.seed)?;
        *self = rebuilt;
        Ok(true)
    }

    /// The current settings.
    pub fn settings(&self) -> UniverseSettings {
        self.settings
    }

    /// The render window both layers stream against.
    pub fn window(&self) -> Rect {
        self.window
    }

    /// Both layers, far to near, for the renderer.
    pub fn layers(&self) -> [&EnvironmentLayer; 2] {
        [&self.stars, &self.planets]
    }

    /// The far star layer.
    pub fn star_layer(&self) -> &EnvironmentLayer {
        &self.stars
    }

    /// The near planet layer.
    pub fn planet_layer(&self) -> &EnvironmentLayer {
        &self.planets
    }

    /// Mutable star layer, for the flag-only culler.
    pub fn star_layer_mut(&mut self) -> &mut EnvironmentLayer {
        &mut self.stars
    }

    /// Mutable planet layer, for the flag-only culler.
    pub fn planet_layer_mut(&mut self) -> &mut EnvironmentLayer {
        &mut self.planets
    }

    /// Total constructed entities across both layers: constant between
    /// resets, equal to `star_count + planet_count`.
    pub fn total_constructed(&self) -> usize {
        self.stars.total() + self.planets.total()
    }

    /// Entities currently live across both layers.
    pub fn live_count(&self) -> usize {
        self.stars.live_count() + self.planets.live_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::new(Vec2::new(-500.0, -500.0), Vec2::new(500.0, 500.0))
    }

    fn small_settings() -> UniverseSettings {
        UniverseSettings {
            star_count: 20,
            planet_count: 5,
            ..UniverseSettings::default()
        }
    }

    #[test]
    fn test_new_populates_both_layers() {
        let env = Environment::with_seed(window(), small_settings(), 42).unwrap();
        assert_eq!(env.star_layer().live_count(), 20);
        assert_eq!(env.planet_layer().live_count(), 5);
        assert_eq!(env.total_constructed(), 25);
    }

    #[test]
    fn test_rejects_zero_counts() {
        let settings = UniverseSettings {
            star_count: 0,
            ..small_settings()
        };
        assert!(matches!(
            Environment::new(window(), settings),
            Err(SpaceError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_window() {
        let flat = Rect::new(Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert!(Environment::new(flat, small_settings()).is_err());
    }

    #[test]
    fn test_conservation_across_many_ticks() {
        let mut env = Environment::with_seed(window(), small_settings(), 7).unwrap();
        for _ in 0..500 {
            env.tick(Vec2::new(120.0, -75.0), 1.0 / 60.0);
            assert_eq!(env.total_constructed(), 25);
        }
    }

    #[test]
    fn test_apply_identical_settings_is_a_no_op() {
        let mut env = Environment::with_seed(window(), small_settings(), 7).unwrap();
        let reset = env.apply_settings(small_settings()).unwrap();
        assert!(!reset);
        assert_eq!(env.total_constructed(), 25);
    }

    #[test]
    fn test_apply_changed_settings_resets_and_resizes() {
        let mut env = Environment::with_seed(window(), small_settings(), 7).unwrap();
        env.tick(Vec2::new(50.0, 0.0), 1.0);

        let bigger = UniverseSettings {
            star_count: 40,
            ..small_settings()
        };
        let reset = env.apply_settings(bigger).unwrap();
        assert!(reset);
        assert_eq!(env.total_constructed(), 45);
        // Repopulated from scratch: everything live again.
        assert_eq!(env.live_count(), 45);
        assert_eq!(env.settings().star_count, 40);
    }

    #[test]
    fn test_max_speed_change_alone_still_resets() {
        // Mirrors the host panel: any field change rebuilds the world.
        let mut env = Environment::with_seed(window(), small_settings(), 7).unwrap();
        let tweaked = UniverseSettings {
            max_speed: 150.0,
            ..small_settings()
        };
        assert!(env.apply_settings(tweaked).unwrap());
        assert_eq!(env.settings().max_speed, 150.0);
    }

    #[test]
    fn test_apply_invalid_settings_keeps_old_state() {
        let mut env = Environment::with_seed(window(), small_settings(), 7).unwrap();
        let bad = UniverseSettings {
            vanishing_point: -1.0,
            ..small_settings()
        };
        assert!(env.apply_settings(bad).is_err());
        assert_eq!(env.settings(), small_settings());
        assert_eq!(env.total_constructed(), 25);
    }

    #[test]
    fn test_draw_order_puts_planets_above_stars() {
        let env = Environment::with_seed(window(), small_settings(), 11).unwrap();
        let max_star_order = env
            .star_layer()
            .active()
            .iter()
            .map(|e| e.draw_order)
            .fold(f32::MIN, f32::max);
        let min_planet_order = env
            .planet_layer()
            .active()
            .iter()
            .map(|e| e.draw_order)
            .fold(f32::MAX, f32::min);
        assert!(
            min_planet_order > max_star_order,
            "near-band planets must draw above far-band stars \
             ({min_planet_order} vs {max_star_order})"
        );
    }
}
