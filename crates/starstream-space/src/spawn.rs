//! Spawn-position selection at the periphery of the render window.

use glam::Vec2;
use rand::Rng;
use starstream_math::Rect;

/// Choose a spawn point on the window edge ahead of the direction of travel.
///
/// Entities drift with `delta` each tick, so they must enter on the edge they
/// will drift away from — never popping in at the viewpoint center:
/// - `delta.x == 0`: horizontal edge; `y = window.max.y` when travelling in
///   `-y`, else `window.min.y`; `x` uniform across the width.
/// - `delta.y == 0`: vertical edge; `x = window.max.x` when travelling in
///   `-x`, else `window.min.x`; `y` uniform across the height.
/// - both non-zero: a fair coin picks which edge, then the same rule applies.
/// - both zero: the horizontal-edge rule wins and `y = window.min.y`
///   (documented default for the stationary case).
pub fn edge_spawn_position<R: Rng>(delta: Vec2, window: &Rect, rng: &mut R) -> Vec2 {
    let horizontal_edge = if delta.x == 0.0 {
        true
    } else if delta.y == 0.0 {
        false
    } else {
        rng.random_bool(0.5)
    };

    if horizontal_edge {
        let y = if delta.y < 0.0 {
            window.max.y
        } else {
            window.min.y
        };
        Vec2::new(rng.random_range(window.min.x..=window.max.x), y)
    } else {
        let x = if delta.x < 0.0 {
            window.max.x
        } else {
            window.min.x
        };
        Vec2::new(x, rng.random_range(window.min.y..=window.max.y))
    }
}

/// Uniform position over the whole window.
///
/// Used only for initial population at startup and after a settings reset;
/// steady-state spawns go through [`edge_spawn_position`].
pub fn scatter_position<R: Rng>(window: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(window.min.x..=window.max.x),
        rng.random_range(window.min.y..=window.max.y),
    )
}
