//! Per-depth-band environment layers: movement, retirement, and spawning.
//!
//! A layer owns one active list and one pool of entities sharing a depth
//! band. Each tick it copies the ship's velocity, drifts every live entity by
//! its parallax-scaled share of the displacement, retires entities that leave
//! the render window back into the pool, and spends accumulated travel
//! distance against a spawn countdown to trigger edge spawns.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starstream_math::{Rect, parallax_delta, visual_scale};
use tracing::warn;

use crate::entity::{Entity, EntityKind};
use crate::error::SpaceError;
use crate::pool::Pool;
use crate::spawn::{edge_spawn_position, scatter_position};

/// Configuration for one environment layer.
#[derive(Debug, Clone)]
pub struct LayerParams {
    /// Which entity kind this layer streams.
    pub kind: EntityKind,
    /// Number of entities constructed up front; the hard cap on
    /// concurrently-live entities.
    pub pool_size: usize,
    /// Depth at which parallax displacement and visual scale reach zero.
    pub vanishing_point: f32,
    /// Depth band entities spawn into. Must lie strictly between zero and
    /// the vanishing point.
    pub depth_band: RangeInclusive<f32>,
    /// Travel distance between spawns; each countdown reset draws uniformly
    /// from this range.
    pub spawn_interval: RangeInclusive<f32>,
    /// Per-axis intrinsic sprite footprint range, drawn at construction.
    pub base_size: RangeInclusive<f32>,
    /// Aspect-preserving floor on the smaller post-scale dimension.
    pub min_extent: f32,
    /// Render window; entities outside it retire to the pool.
    pub window: Rect,
}

impl LayerParams {
    /// Reject invalid parameters before any entity is constructed.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.pool_size == 0 {
            return Err(SpaceError::invalid("pool size must be positive"));
        }
        if !self.vanishing_point.is_finite() || self.vanishing_point <= 0.0 {
            return Err(SpaceError::invalid("vanishing point must be positive"));
        }
        if self.window.is_degenerate() {
            return Err(SpaceError::invalid("render window has no area"));
        }
        let (depth_min, depth_max) = (*self.depth_band.start(), *self.depth_band.end());
        if depth_min <= 0.0 || depth_min > depth_max {
            return Err(SpaceError::invalid("depth band is empty or non-positive"));
        }
        if depth_max >= self.vanishing_point {
            return Err(SpaceError::invalid(
                "depth band must stay below the vanishing point",
            ));
        }
        let (spawn_min, spawn_max) = (*self.spawn_interval.start(), *self.spawn_interval.end());
        if spawn_min <= 0.0 || spawn_min > spawn_max {
            return Err(SpaceError::invalid(
                "spawn interval must be positive and ordered",
            ));
        }
        let (size_min, size_max) = (*self.base_size.start(), *self.base_size.end());
        if size_min <= 0.0 || size_min > size_max {
            return Err(SpaceError::invalid(
                "base size range must be positive and ordered",
            ));
        }
        if self.min_extent < 0.0 {
            return Err(SpaceError::invalid("minimum extent must not be negative"));
        }
        Ok(())
    }
}

/// What one tick did, aggregated across retirement and spawning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Entities spawned at the window edge this tick.
    pub spawned: u32,
    /// Entities retired into the pool this tick.
    pub retired: u32,
    /// Spawn triggers dropped because the pool was empty.
    pub skipped_spawns: u32,
}

impl TickStats {
    /// Fold another layer's stats into this one.
    pub fn absorb(&mut self, other: TickStats) {
        self.spawned += other.spawned;
        self.retired += other.retired;
        self.skipped_spawns += other.skipped_spawns;
    }
}

/// One streaming layer: an active list, a pool, and a spawn countdown.
#[derive(Debug)]
pub struct EnvironmentLayer {
    params: LayerParams,
    /// Ship velocity copied in at the start of every tick.
    velocity: Vec2,
    active: Vec<Entity>,
    pool: Pool<Entity>,
    /// Remaining travel distance until the next spawn trigger.
    spawn_countdown: f32,
    rng: ChaCha8Rng,
}

impl EnvironmentLayer {
    /// Build a layer, constructing `pool_size` entities into its pool.
    pub fn new(params: LayerParams) -> Result<Self, SpaceError> {
        Self::from_rng(params, ChaCha8Rng::from_os_rng())
    }

    /// Build a layer with a fixed seed, for reproducible tests and demos.
    pub fn with_seed(params: LayerParams, seed: u64) -> Result<Self, SpaceError> {
        Self::from_rng(params, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(params: LayerParams, mut rng: ChaCha8Rng) -> Result<Self, SpaceError> {
        params.validate()?;
        let mut pool = Pool::with_capacity(params.pool_size);
        for _ in 0..params.pool_size {
            let base_size = Vec2::new(
                rng.random_range(params.base_size.clone()),
                rng.random_range(params.base_size.clone()),
            );
            pool.add(Entity::new(params.kind, base_size, &mut rng));
        }
        let spawn_countdown = *params.spawn_interval.end();
        Ok(Self {
            params,
            velocity: Vec2::ZERO,
            active: Vec::new(),
            pool,
            spawn_countdown,
            rng,
        })
    }

    /// Run one simulation tick: move, retire, then maybe spawn.
    pub fn tick(&mut self, velocity: Vec2, dt: f32) -> TickStats {
        let mut stats = TickStats::default();
        self.velocity = velocity;
        let raw_delta = velocity * dt;
        let travel = raw_delta.length();

        for entity in &mut self.active {
            entity.position +=
                parallax_delta(raw_delta, entity.depth, self.params.vanishing_point);
        }

        // Swap-remove scan: the entity swapped into slot `i` is re-examined
        // before the index advances, so retirement never skips a neighbor.
        let mut i = 0;
        while i < self.active.len() {
            if self.params.window.contains(self.active[i].position) {
                i += 1;
            } else {
                let mut entity = self.active.swap_remove(i);
                entity.attached = false;
                entity.renderable = false;
                self.pool.add(entity);
                stats.retired += 1;
            }
        }

        // A zero-magnitude displacement spends no travel and spawns nothing.
        if travel > 0.0 {
            self.spawn_countdown -= travel;
            if self.spawn_countdown <= 0.0 {
                // Exactly one spawn per crossing; a long frame does not burst.
                self.spawn_countdown = self.rng.random_range(self.params.spawn_interval.clone());
                match self.spawn_at_edge(raw_delta) {
                    Ok(()) => stats.spawned += 1,
                    Err(err) => {
                        warn!(kind = ?self.params.kind, %err, "spawn skipped");
                        stats.skipped_spawns += 1;
                    }
                }
            }
        }

        stats
    }

    /// Spawn one entity on the window edge ahead of `delta`.
    pub fn spawn_at_edge(&mut self, delta: Vec2) -> Result<(), SpaceError> {
        let position = edge_spawn_position(delta, &self.params.window, &mut self.rng);
        self.spawn_at(position)
    }

    /// Spawn one entity at an explicit position, drawing a fresh depth from
    /// the layer band and re-deriving its scale-dependent fields.
    ///
    /// Fails with [`SpaceError::PoolExhausted`] on an empty pool, leaving the
    /// active list untouched.
    pub fn spawn_at(&mut self, position: Vec2) -> Result<(), SpaceError> {
        let mut entity = self.pool.get().map_err(|_| SpaceError::PoolExhausted {
            kind: self.params.kind,
        })?;

        let vp = self.params.vanishing_point;
        let depth = self.rng.random_range(self.params.depth_band.clone());
        let scale = visual_scale(depth, vp);

        entity.depth = depth;
        entity.visual_scale = scale;
        let mut size = entity.base_size * scale;
        let smaller = size.min_element();
        if smaller < self.params.min_extent && smaller > 0.0 {
            // Scale both axes by the same ratio to preserve aspect.
            size *= self.params.min_extent / smaller;
        }
        entity.size = size;
        entity.draw_order = vp - depth;
        entity.position = position;
        entity.attached = true;
        entity.renderable = true;

        self.active.push(entity);
        Ok(())
    }

    /// Initial population: spawn every pooled entity scattered uniformly
    /// over the render window. Returns how many spawned.
    pub fn populate(&mut self) -> usize {
        let mut spawned = 0;
        while !self.pool.is_empty() {
            let position = scatter_position(&self.params.window, &mut self.rng);
            if self.spawn_at(position).is_err() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Entities currently live, with resolved position, size, draw order,
    /// and visibility, for an external renderer.
    pub fn active(&self) -> &[Entity] {
        &self.active
    }

    /// Mutable view of the live entities, for the flag-only culler.
    pub fn active_mut(&mut self) -> &mut [Entity] {
        &mut self.active
    }

    /// The velocity copied in by the latest tick.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Number of entities resting in the pool.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of entities currently live.
    pub fn live_count(&self) -> usize {
        self.active.len()
    }

    /// Live plus pooled: constant for the life of the layer.
    pub fn total(&self) -> usize {
        self.active.len() + self.pool.len()
    }

    /// The layer's configuration.
    pub fn params(&self) -> &LayerParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_params() -> LayerParams {
        LayerParams {
            kind: EntityKind::Star,
            pool_size: 5,
            vanishing_point: 10.0,
            depth_band: 9.0..=9.0,
            spawn_interval: 10.0..=10.0,
            base_size: 2.0..=20.0,
            min_extent: 1.0,
            window: Rect::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0)),
        }
    }

    #[test]
    fn test_rejects_zero_pool_size() {
        let params = LayerParams {
            pool_size: 0,
            ..star_params()
        };
        assert!(matches!(
            EnvironmentLayer::with_seed(params, 1),
            Err(SpaceError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_vanishing_point() {
        let params = LayerParams {
            vanishing_point: 0.0,
            ..star_params()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_depth_band_reaching_vanishing_point() {
        let params = LayerParams {
            depth_band: 9.0..=10.0,
            ..star_params()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_window() {
        let params = LayerParams {
            window: Rect::new(Vec2::ZERO, Vec2::new(100.0, 0.0)),
            ..star_params()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_construction_fills_the_pool() {
        let layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        assert_eq!(layer.pool_len(), 5);
        assert_eq!(layer.live_count(), 0);
        assert_eq!(layer.total(), 5);
    }

    #[test]
    fn test_populate_scatters_everything_in_window() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        assert_eq!(layer.populate(), 5);
        assert_eq!(layer.pool_len(), 0);
        assert_eq!(layer.live_count(), 5);
        for entity in layer.active() {
            assert!(layer.params().window.contains(entity.position));
            assert!(entity.attached);
            assert!(entity.renderable);
            assert!((9.0 - entity.depth).abs() < 1e-6);
            assert!((entity.draw_order - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_spawned_entity_scale_and_floor() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 11).unwrap();
        layer.populate();
        for entity in layer.active() {
            // depth 9, vp 10 -> scale 0.1
            assert!((entity.visual_scale - 0.1).abs() < 1e-5);
            let smaller = entity.size.min_element();
            assert!(
                smaller >= layer.params().min_extent - 1e-5,
                "size floor violated: {smaller}"
            );
            // Aspect preserved by the floor correction.
            let base_aspect = entity.base_size.x / entity.base_size.y;
            let aspect = entity.size.x / entity.size.y;
            assert!(
                (aspect - base_aspect).abs() < 1e-4,
                "aspect changed: {base_aspect} -> {aspect}"
            );
        }
    }

    #[test]
    fn test_tick_moves_entities_by_parallax() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        layer.spawn_at(Vec2::ZERO).unwrap();
        layer.tick(Vec2::new(0.0, -5.0), 1.0);
        let entity = &layer.active()[0];
        // depth 9, vp 10: applied delta is ~10% of the raw delta.
        assert!(entity.position.x.abs() < 1e-6);
        assert!((entity.position.y - (-0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_retirement_returns_entity_to_pool() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        layer.spawn_at(Vec2::new(0.0, -99.9)).unwrap();
        assert_eq!(layer.pool_len(), 4);

        // Drift in -y until the entity leaves the window.
        let mut retired_tick = None;
        for tick in 0..40 {
            let stats = layer.tick(Vec2::new(0.0, -5.0), 1.0);
            assert_eq!(layer.total(), 5, "conservation broken at tick {tick}");
            if stats.retired > 0 {
                retired_tick = Some(tick);
                break;
            }
        }
        assert!(retired_tick.is_some(), "entity never retired");
        assert_eq!(layer.pool_len(), 5);
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn test_survivors_always_satisfy_window_predicate() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 9).unwrap();
        layer.populate();
        for _ in 0..200 {
            layer.tick(Vec2::new(-40.0, 25.0), 0.25);
            for entity in layer.active() {
                assert!(layer.params().window.contains(entity.position));
            }
            assert_eq!(layer.total(), 5);
        }
    }

    #[test]
    fn test_countdown_triggers_one_spawn_per_crossing() {
        // spawn_interval fixed at 10 units of travel.
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        // 4 units per tick: crossings at ticks 3, 5 (countdown starts at 10).
        let mut spawned = 0;
        for _ in 0..3 {
            spawned += layer.tick(Vec2::new(4.0, 0.0), 1.0).spawned;
        }
        assert_eq!(spawned, 1, "first crossing should spawn exactly once");

        // A single huge frame still spawns once, not a burst.
        let stats = layer.tick(Vec2::new(500.0, 0.0), 1.0);
        assert_eq!(stats.spawned, 1);
    }

    #[test]
    fn test_zero_displacement_never_spawns() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        for _ in 0..100 {
            let stats = layer.tick(Vec2::ZERO, 1.0);
            assert_eq!(stats, TickStats::default());
        }
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn test_exhausted_pool_skips_spawn_without_mutating_active() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        for _ in 0..5 {
            layer.spawn_at(Vec2::ZERO).unwrap();
        }
        assert_eq!(layer.pool_len(), 0);
        let live_before = layer.live_count();

        // Enough travel to cross the countdown while the pool is dry. The
        // live entities sit at the window center, so this tick cannot retire
        // any of them first.
        let stats = layer.tick(Vec2::new(11.0, 0.0), 1.0);
        assert_eq!(stats.skipped_spawns, 1);
        assert_eq!(stats.spawned, 0);
        assert_eq!(layer.live_count(), live_before);
        assert_eq!(layer.total(), 5);
    }

    #[test]
    fn test_spawn_at_on_empty_pool_reports_kind() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        layer.populate();
        let err = layer.spawn_at(Vec2::ZERO).unwrap_err();
        assert!(matches!(
            err,
            SpaceError::PoolExhausted {
                kind: EntityKind::Star
            }
        ));
    }

    #[test]
    fn test_velocity_is_copied_each_tick() {
        let mut layer = EnvironmentLayer::with_seed(star_params(), 3).unwrap();
        layer.tick(Vec2::new(3.0, -4.0), 1.0 / 60.0);
        assert_eq!(layer.velocity(), Vec2::new(3.0, -4.0));
    }
}
