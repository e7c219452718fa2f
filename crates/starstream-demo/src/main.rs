//! Headless Starstream demo: exercises the streaming core without a window.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Runs a sequence of logged demonstrations — parallax falloff, pool
//! recycling, render-zone culling — then a scripted flight over the streaming
//! environment with a mid-flight settings change and a conservation audit.
//!
//! Run with `cargo run -p starstream-demo`.
//! Run with `cargo run -p starstream-demo -- --stars 5000` to override density.

use clap::Parser;
use glam::Vec2;
use rand::Rng;
use starstream_config::{CliArgs, Config};
use starstream_math::{Rect, parallax, visual_scale};
use starstream_ship::{BoostLevel, InputSnapshot, ShipConfig, ShipState, boost_level, update_ship};
use starstream_space::{
    EntityKind, Environment, EnvironmentLayer, LayerParams, RenderZone, TickStats,
    UniverseSettings,
};
use tracing::{debug, error, info, warn};

const TICK_RATE: f32 = 60.0;
const DT: f32 = 1.0 / TICK_RATE;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("starstream")));

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|err| {
            eprintln!("config load failed ({err}), using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    starstream_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    if let Err(err) = config.validate() {
        error!("refusing to start: {err}");
        std::process::exit(1);
    }

    info!("Starstream — parallax space-flight demo");
    info!(
        "Viewport: {}x{} (+{} margin) | stars: {} | planets: {} | vp: {} | max speed: {}",
        config.window.width,
        config.window.height,
        config.window.margin,
        config.universe.star_count,
        config.universe.planet_count,
        config.universe.vanishing_point,
        config.universe.max_speed,
    );

    let seed: u64 = rand::rng().random();
    info!(seed, "universe seed for this run");

    demonstrate_parallax(&config);
    demonstrate_pool_recycling(seed);
    demonstrate_render_zone(&config, seed);

    if let Err(err) = run_flight(&config, seed) {
        error!("flight aborted: {err}");
        std::process::exit(1);
    }

    info!("demo complete");
}

/// The render window: viewport plus margin on every side, centered on the
/// viewpoint.
fn render_window(config: &Config) -> Rect {
    let half = Vec2::new(config.window.width as f32, config.window.height as f32) * 0.5;
    Rect::from_center_half_extents(Vec2::ZERO, half + Vec2::splat(config.window.margin))
}

fn universe_settings(config: &Config) -> UniverseSettings {
    UniverseSettings {
        star_count: config.universe.star_count as usize,
        planet_count: config.universe.planet_count as usize,
        vanishing_point: config.universe.vanishing_point,
        max_speed: config.universe.max_speed,
    }
}

/// Show how apparent displacement and scale fall off across the depth range.
fn demonstrate_parallax(config: &Config) {
    info!("--- parallax falloff ---");
    let vp = config.universe.vanishing_point;
    let raw = 10.0;
    for fraction in [0.1, 0.3, 0.5, 0.7, 0.9, 0.99, 1.0] {
        let depth = vp * fraction;
        let applied = parallax(raw, depth, vp);
        let scale = visual_scale(depth, vp);
        info!(
            "depth {depth:>6.2} ({:>3.0}% of vp): raw {raw} applies as {applied:>6.3}, \
             unit sprite scales to {scale:.3}",
            fraction * 100.0
        );
    }
}

/// A single far star drifting out of a small window and back into its pool.
fn demonstrate_pool_recycling(seed: u64) {
    info!("--- pool recycling ---");
    let params = LayerParams {
        kind: EntityKind::Star,
        pool_size: 5,
        vanishing_point: 10.0,
        depth_band: 9.0..=9.0,
        spawn_interval: 10_000.0..=10_000.0,
        base_size: 2.0..=20.0,
        min_extent: 1.0,
        window: Rect::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0)),
    };
    let mut layer = match EnvironmentLayer::with_seed(params, seed) {
        Ok(layer) => layer,
        Err(err) => {
            warn!("demonstration layer rejected: {err}");
            return;
        }
    };

    if let Err(err) = layer.spawn_at(Vec2::new(0.0, -90.0)) {
        warn!("spawn failed: {err}");
        return;
    }
    info!(
        "spawned 1 star at (0, -90); pool {} / total {}",
        layer.pool_len(),
        layer.total()
    );

    for tick in 1..=30 {
        let stats = layer.tick(Vec2::new(0.0, -5.0), 1.0);
        if stats.retired > 0 {
            info!(
                "tick {tick}: star left the window and retired; pool back to {}",
                layer.pool_len()
            );
            break;
        }
    }
    info!(
        "conservation: {} live + {} pooled = {} constructed",
        layer.live_count(),
        layer.pool_len(),
        layer.total()
    );
}

/// The flag-only culler variant: visibility toggles, nothing recycles.
fn demonstrate_render_zone(config: &Config, seed: u64) {
    info!("--- render-zone culling ---");
    let window = render_window(config);
    let mut env = match Environment::with_seed(window, universe_settings(config), seed) {
        Ok(env) => env,
        Err(err) => {
            warn!("environment rejected: {err}");
            return;
        }
    };

    // Screen bounds without the margin: entities living in the margin band
    // stay live but are flagged invisible.
    let screen = RenderZone::new(Rect::from_center_half_extents(
        Vec2::ZERO,
        Vec2::new(config.window.width as f32, config.window.height as f32) * 0.5,
    ));
    let visible_stars = screen.apply(env.star_layer_mut().active_mut());
    let visible_planets = screen.apply(env.planet_layer_mut().active_mut());
    info!(
        "{} of {} stars and {} of {} planets visible inside the screen zone",
        visible_stars,
        env.star_layer().live_count(),
        visible_planets,
        env.planet_layer().live_count(),
    );
}

/// Scripted 60 Hz flight: thrust, turn, brake, pointer steer, a mid-flight
/// settings change, and a final conservation audit.
fn run_flight(config: &Config, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- scripted flight ---");
    let window = render_window(config);
    let settings = universe_settings(config);
    let mut env = Environment::with_seed(window, settings, seed)?;
    let mut expected_total = env.total_constructed();

    let ship_config = ShipConfig {
        max_speed: settings.max_speed,
        ..ShipConfig::default()
    };
    let mut ship = ShipState::new();

    let script: [(u32, &str, InputSnapshot); 6] = [
        (180, "full thrust", InputSnapshot {
            thrust_forward: true,
            ..InputSnapshot::idle()
        }),
        (240, "sustained burn", InputSnapshot {
            thrust_forward: true,
            ..InputSnapshot::idle()
        }),
        (90, "thrusting turn", InputSnapshot {
            thrust_forward: true,
            turn_right: true,
            ..InputSnapshot::idle()
        }),
        (60, "coast", InputSnapshot::idle()),
        (90, "brake", InputSnapshot {
            brake: true,
            ..InputSnapshot::idle()
        }),
        (150, "pointer steer", InputSnapshot {
            steer_target: Some(Vec2::new(-80.0, -60.0)),
            ..InputSnapshot::idle()
        }),
    ];

    let mut total_stats = TickStats::default();
    for (index, (ticks, label, input)) in script.iter().enumerate() {
        let mut phase_stats = TickStats::default();
        let mut last_boost = BoostLevel::Off;

        for _ in 0..*ticks {
            let flight = update_ship(&mut ship, &ship_config, DT, input);
            let stats = env.tick(ship.velocity, DT);
            phase_stats.absorb(stats);

            let boost = boost_level(ship.speed(), ship_config.max_speed);
            if boost != last_boost {
                debug!(?flight, ?boost, speed = ship.speed(), "boost level changed");
                last_boost = boost;
            }
            if config.debug.show_tick_stats && stats != TickStats::default() {
                debug!(
                    spawned = stats.spawned,
                    retired = stats.retired,
                    skipped = stats.skipped_spawns,
                    "tick stats"
                );
            }
            debug_assert_eq!(env.total_constructed(), expected_total);
        }

        info!(
            "phase '{label}': speed {:.1}, heading {:.2} rad, spawned {}, retired {}, \
             skipped {}",
            ship.speed(),
            ship.rotation,
            phase_stats.spawned,
            phase_stats.retired,
            phase_stats.skipped_spawns,
        );
        total_stats.absorb(phase_stats);

        // Halfway through, push a denser universe through the settings
        // surface, as the host's debug panel would.
        if index == 2 {
            let denser = UniverseSettings {
                star_count: settings.star_count + settings.star_count / 2,
                ..settings
            };
            let reset = env.apply_settings(denser)?;
            expected_total = env.total_constructed();
            info!(
                reset,
                stars = denser.star_count,
                "applied new universe settings mid-flight"
            );
        }
    }

    let live = env.live_count();
    let total = env.total_constructed();
    info!(
        "flight audit: {} live + {} pooled = {} constructed, \
         {} spawned / {} retired / {} skipped across the flight",
        live,
        total - live,
        total,
        total_stats.spawned,
        total_stats.retired,
        total_stats.skipped_spawns,
    );

    let expected_after_reset = env.settings().star_count + env.settings().planet_count;
    if total != expected_after_reset {
        return Err(format!(
            "conservation violated: {total} constructed, expected {expected_after_reset}"
        )
        .into());
    }
    Ok(())
}
