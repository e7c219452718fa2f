//! Streaming-core error types.

use crate::entity::EntityKind;

/// Requested an entity from an empty pool.
///
/// Pools never grow on demand: entity construction is assumed expensive and
/// is kept out of the hot path, so callers must size pools up front for the
/// maximum concurrently-live count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pool exhausted")]
pub struct PoolExhausted;

/// Errors from the environment streaming core.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    /// A spawn was requested but the layer's pool had no entity to hand out.
    #[error("{kind:?} pool exhausted; spawn dropped")]
    PoolExhausted {
        /// Which layer's pool ran dry.
        kind: EntityKind,
    },

    /// Layer or settings validation failed before any tick ran.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the rejected value.
        reason: String,
    },
}

impl SpaceError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
