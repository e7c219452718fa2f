//! The parallax displacement function: a 1D visual approximation of depth,
//! not a true perspective projection.
//!
//! A raw viewpoint displacement `delta` is mapped to the apparent on-screen
//! displacement of an entity at a given depth. Entities near the vanishing
//! point barely move (far-background illusion); entities at small depth move
//! almost the full raw delta (near-field illusion).

use glam::Vec2;

/// Apparent displacement of an entity at `depth` for a raw viewpoint
/// displacement of `delta`, given the layer's `vanishing_point`.
///
/// Computes `(vanishing_point - depth) * tan(atan2(delta, vanishing_point))`.
/// Pure and deterministic: identical inputs always yield identical outputs.
///
/// Degenerate inputs are defined, not rejected:
/// - `depth == vanishing_point` yields exactly `0.0` (a visually static
///   entity).
/// - `delta == 0.0` yields `0.0` for every depth.
/// - `depth > vanishing_point` yields a sign-flipped displacement. Layer
///   configuration validation keeps depth bands below the vanishing point,
///   so this never arises from the streaming code itself.
#[must_use]
pub fn parallax(delta: f32, depth: f32, vanishing_point: f32) -> f32 {
    let angle = delta.atan2(vanishing_point);
    (vanishing_point - depth) * angle.tan()
}

/// Applies [`parallax`] independently per axis to a 2D displacement.
#[must_use]
pub fn parallax_delta(delta: Vec2, depth: f32, vanishing_point: f32) -> Vec2 {
    Vec2::new(
        parallax(delta.x, depth, vanishing_point),
        parallax(delta.y, depth, vanishing_point),
    )
}

/// Apparent size of a unit length at `depth`: the spawn-time visual scale.
///
/// Defined as `parallax(1.0, depth, vanishing_point)`, which evaluates to
/// `(vanishing_point - depth) / vanishing_point` — 1.0 at the viewpoint,
/// falling linearly to 0.0 at the vanishing point.
#[must_use]
pub fn visual_scale(depth: f32, vanishing_point: f32) -> f32 {
    parallax(1.0, depth, vanishing_point)
}
