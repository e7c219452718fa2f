//! Host-side flight model: the collaborator that feeds the streaming core
//! its per-tick viewpoint displacement.
//!
//! The ship itself never moves on screen; thrust accumulates into a velocity
//! that the host hands to the environment each tick, and the world drifts
//! past. Velocity persists without input (no drag), in the Newtonian manner.

mod boost;
mod flight;
mod input;

pub use boost::{BoostLevel, boost_level};
pub use flight::{FlightPhase, ShipConfig, ShipState, thrust_vector, update_ship};
pub use input::InputSnapshot;
