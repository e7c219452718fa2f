//! Environment streaming and object pooling for the Starstream engine.
//!
//! Maintains the bounded-memory, effectively-unbounded-world illusion: stars
//! and planets are drawn from per-layer object pools, drift each tick by a
//! parallax-scaled share of the ship's displacement, retire back into their
//! pool when they leave the render window, and respawn at the window edge
//! ahead of the direction of travel.
//!
//! Everything here runs on a single thread, driven by one `tick` per frame.
//! A concurrent port would need a snapshot of the active lists or a per-layer
//! mutex around the active-list/pool pair, since retirement mutates the list
//! the renderer reads.

mod culling;
mod entity;
mod environment;
mod error;
mod layer;
mod pool;
mod spawn;

pub use culling::RenderZone;
pub use entity::{ATMOSPHERE_ALPHA, Entity, EntityKind, LIGHT_ALPHA, Visual};
pub use environment::{Environment, UniverseSettings};
pub use error::{PoolExhausted, SpaceError};
pub use layer::{EnvironmentLayer, LayerParams, TickStats};
pub use pool::Pool;
pub use spawn::{edge_spawn_position, scatter_position};
