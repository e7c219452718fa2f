use glam::Vec2;

/// Immutable per-tick input snapshot.
///
/// The host captures its key and pointer state once per frame into this
/// struct; the flight model never reads mutable input flags directly. A
/// pointer steer target, when present, overrides keyboard steering entirely,
/// as pointer/touch control does in the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Accelerate along the ship's facing.
    pub thrust_forward: bool,
    /// Accelerate against the ship's facing.
    pub thrust_reverse: bool,
    /// Rotate counter-clockwise.
    pub turn_left: bool,
    /// Rotate clockwise.
    pub turn_right: bool,
    /// Bleed velocity toward zero.
    pub brake: bool,
    /// Pointer position relative to the ship; steers and thrusts toward it.
    pub steer_target: Option<Vec2>,
}

impl InputSnapshot {
    /// No keys held, no pointer down.
    pub fn idle() -> Self {
        Self::default()
    }

    /// True if any control would thrust this tick.
    pub fn is_thrusting(&self) -> bool {
        self.thrust_forward || self.thrust_reverse || self.steer_target.is_some()
    }
}
