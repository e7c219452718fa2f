//! Boost flame effect levels.
//!
//! The host draws one of three flame sprites behind the ship (or none);
//! which one is a pure function of how close the ship is to its speed cap.

/// Which boost flame sprite the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostLevel {
    /// No flame.
    Off,
    /// Short flame.
    Low,
    /// Medium flame.
    Med,
    /// Full flame.
    High,
}

/// Derive the flame level from current speed against the cap.
///
/// Cut points at 5%, 45%, and 85% of `max_speed`.
pub fn boost_level(speed: f32, max_speed: f32) -> BoostLevel {
    if max_speed <= 0.0 {
        return BoostLevel::Off;
    }
    let ratio = speed / max_speed;
    if ratio < 0.05 {
        BoostLevel::Off
    } else if ratio < 0.45 {
        BoostLevel::Low
    } else if ratio < 0.85 {
        BoostLevel::Med
    } else {
        BoostLevel::High
    }
}
