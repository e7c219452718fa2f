//! Ship kinematics: rotation, thrust, brake, and flight phase.

use glam::Vec2;

use crate::input::InputSnapshot;

/// Ship tuning parameters.
#[derive(Debug, Clone)]
pub struct ShipConfig {
    /// Speed cap in world units per second. Mirrors the universe panel's
    /// `max_speed` option.
    pub max_speed: f32,
    /// Acceleration along the thrust vector, units per second squared.
    pub thrust_accel: f32,
    /// Keyboard turn rate in radians per second.
    pub turn_rate: f32,
    /// Brake deceleration per velocity component, units per second squared.
    pub brake_decel: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            thrust_accel: 150.0,
            turn_rate: 3.0,
            brake_decel: 450.0,
        }
    }
}

/// Runtime ship state.
///
/// Rotation 0 means facing "up"; the world then drifts in `+y` under
/// forward thrust. There is no position: the viewpoint is the origin and
/// the environment moves instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipState {
    /// Heading in radians, clockwise from "up".
    pub rotation: f32,
    /// Accumulated velocity in world units per second.
    pub velocity: Vec2,
}

impl ShipState {
    /// A stationary ship facing up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current speed in world units per second.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// The per-tick viewpoint displacement handed to the environment.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        self.velocity * dt
    }
}

/// Flight phases derived from this tick's input and resulting speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    /// No thrust, no brake; drifting on residual velocity.
    Idle,
    /// Thrusting below the boost threshold.
    Accelerating,
    /// Braking with residual speed.
    Decelerating,
    /// Thrusting at or above 90% of the speed cap.
    Boosting,
}

/// World-space thrust direction for a heading: `(-sin r, cos r)`.
pub fn thrust_vector(rotation: f32) -> Vec2 {
    Vec2::new(-rotation.sin(), rotation.cos())
}

/// Advance the ship one tick and report its flight phase.
///
/// A pointer steer target snaps the heading toward the pointer
/// (`atan2(x, -y)`) and thrusts; otherwise turn keys rotate at `turn_rate`
/// and thrust keys accelerate along the heading. Braking bleeds each
/// velocity component toward zero, snapping exactly to zero rather than
/// overshooting across the sign. Speed is clamped to `max_speed` after
/// integration.
pub fn update_ship(
    state: &mut ShipState,
    config: &ShipConfig,
    dt: f32,
    input: &InputSnapshot,
) -> FlightPhase {
    if let Some(target) = input.steer_target {
        state.rotation = target.x.atan2(-target.y);
        state.velocity += thrust_vector(state.rotation) * config.thrust_accel * dt;
    } else {
        if input.turn_left {
            state.rotation -= config.turn_rate * dt;
        }
        if input.turn_right {
            state.rotation += config.turn_rate * dt;
        }
        if input.thrust_forward {
            state.velocity += thrust_vector(state.rotation) * config.thrust_accel * dt;
        }
        if input.thrust_reverse {
            state.velocity -= thrust_vector(state.rotation) * config.thrust_accel * dt;
        }
        if input.brake {
            let step = config.brake_decel * dt;
            state.velocity.x = brake_component(state.velocity.x, step);
            state.velocity.y = brake_component(state.velocity.y, step);
        }
    }

    let speed = state.speed();
    if speed > config.max_speed {
        state.velocity *= config.max_speed / speed;
    }

    flight_phase(state, config, input)
}

/// Bleed one velocity component toward zero without crossing the sign.
fn brake_component(v: f32, step: f32) -> f32 {
    if v > 0.0 {
        (v - step).max(0.0)
    } else if v < 0.0 {
        (v + step).min(0.0)
    } else {
        0.0
    }
}

fn flight_phase(state: &ShipState, config: &ShipConfig, input: &InputSnapshot) -> FlightPhase {
    let speed = state.speed();
    if input.brake && !input.is_thrusting() && speed > 0.0 {
        FlightPhase::Decelerating
    } else if input.is_thrusting() {
        if speed >= 0.9 * config.max_speed {
            FlightPhase::Boosting
        } else {
            FlightPhase::Accelerating
        }
    } else {
        FlightPhase::Idle
    }
}
